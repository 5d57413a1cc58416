use crate::codegen::insn::Push;
use crate::codegen::{Asm, Reg64};

impl Push<Reg64> for Asm {
    fn push(&mut self, op1: Reg64) {
        self.encode_o(0x50, op1);
    }
}
