use crate::codegen::insn::Pop;
use crate::codegen::{Asm, Reg64};

impl Pop<Reg64> for Asm {
    fn pop(&mut self, op1: Reg64) {
        self.encode_o(0x58, op1);
    }
}
