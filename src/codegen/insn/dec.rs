use crate::codegen::insn::Dec;
use crate::codegen::mem::MemOp;
use crate::codegen::{Asm, Reg64};

impl Dec<Reg64> for Asm {
    fn dec(&mut self, op1: Reg64) {
        self.encode_r(&[0xff], 1, op1);
    }
}

impl Dec<MemOp> for Asm {
    fn dec(&mut self, op1: MemOp) {
        self.encode_m(&[0xfe], 1, op1);
    }
}
