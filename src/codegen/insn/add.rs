use crate::codegen::insn::Add;
use crate::codegen::mem::MemOp;
use crate::codegen::{Asm, Imm8};

impl Add<MemOp, Imm8> for Asm {
    fn add(&mut self, op1: MemOp, op2: Imm8) {
        self.encode_mi(&[0x80], 0, op1, op2);
    }
}
