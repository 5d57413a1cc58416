use crate::codegen::insn::Inc;
use crate::codegen::mem::MemOp;
use crate::codegen::{Asm, Reg64};

impl Inc<Reg64> for Asm {
    fn inc(&mut self, op1: Reg64) {
        self.encode_r(&[0xff], 0, op1);
    }
}

impl Inc<MemOp> for Asm {
    fn inc(&mut self, op1: MemOp) {
        self.encode_m(&[0xfe], 0, op1);
    }
}
