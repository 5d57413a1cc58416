use crate::codegen::insn::Cmp;
use crate::codegen::mem::MemOp;
use crate::codegen::{Asm, Imm8};

impl Cmp<MemOp, Imm8> for Asm {
    fn cmp(&mut self, op1: MemOp, op2: Imm8) {
        self.encode_mi(&[0x80], 0x7, op1, op2);
    }
}
