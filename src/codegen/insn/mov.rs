use crate::codegen::insn::Mov;
use crate::codegen::mem::MemOp;
use crate::codegen::{Asm, Reg64, Reg8};

// -- MOV : reg64 reg64

impl Mov<Reg64, Reg64> for Asm {
    fn mov(&mut self, op1: Reg64, op2: Reg64) {
        self.encode_rr(&[0x89], op1, op2);
    }
}

// -- MOV : load a cell byte into a reg8

impl Mov<Reg8, MemOp> for Asm {
    fn mov(&mut self, op1: Reg8, op2: MemOp) {
        self.encode_rm(&[0x8a], op1, op2);
    }
}

// -- MOV : store a reg8 into a cell byte

impl Mov<MemOp, Reg8> for Asm {
    fn mov(&mut self, op1: MemOp, op2: Reg8) {
        self.encode_mr(&[0x88], op1, op2);
    }
}
