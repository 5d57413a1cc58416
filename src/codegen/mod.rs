//! A small `x64` jit assembler, specialized to the handful of instructions a
//! Brainfuck native compiler needs: register-to-register moves, byte loads
//! and stores through a single base register, byte add/sub/cmp against an
//! immediate, increment/decrement, unconditional and flag-conditional jumps
//! to a [`Label`], and `call`/`ret`.

mod asm;
mod imm;
mod label;
mod mem;
mod reg;
mod rt;

pub mod insn;

pub use asm::Asm;
pub use imm::Imm8;
pub use label::Label;
pub use mem::MemOp;
pub use reg::{Reg64, Reg8};
pub use rt::CodeRuntime;
