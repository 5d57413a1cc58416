use crate::codegen::insn::Sub;
use crate::codegen::mem::MemOp;
use crate::codegen::{Asm, Imm8};

impl Sub<MemOp, Imm8> for Asm {
    fn sub(&mut self, op1: MemOp, op2: Imm8) {
        self.encode_mi(&[0x80], 5, op1, op2);
    }
}
