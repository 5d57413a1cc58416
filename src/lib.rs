//! A tiered Brainfuck execution engine.
//!
//! Three backends share the same [`program::Program`] front end:
//!
//! - [`exec::interp::Interpreter`] walks the bracket-matched instruction
//!   stream directly, no machine code involved.
//! - [`exec::compiler::NativeCompiler`] lowers the whole program to `x64`
//!   machine code once, ahead of time, via [`bf_codegen`].
//! - [`exec::jit::JitCoordinator`] runs the interpreter until a loop proves
//!   itself hot, then promotes just that loop's body to compiled code and
//!   keeps running the rest through the interpreter.
//!
//! ```rust
//! use bfjit::exec::Executor;
//! use bfjit::exec::interp::Interpreter;
//! use bfjit::io::StdIo;
//! use bfjit::program::Program;
//!
//! let program = Program::parse(b"++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.")
//!     .expect("balanced brackets");
//! let mut io = StdIo::new();
//! let mut exec = Interpreter::new(&program);
//! exec.run(&mut io);
//! ```

pub mod codegen;

mod bf_codegen;
mod error;
pub mod exec;
pub mod io;
pub mod program;

pub use error::BfError;
pub use io::{FramePacer, IoAdapter, StdIo};
pub use program::Program;

/// Number of byte cells on the tape, shared by every backend.
pub const TAPE_SIZE: usize = 1024 * 1024;
