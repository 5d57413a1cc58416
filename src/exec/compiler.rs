//! Ahead-of-time Native Compiler executor: the whole program is lowered to
//! machine code once, at construction, and `run` simply invokes it.

use crate::bf_codegen::{self, CompiledRoutine};
use crate::error::BfError;
use crate::exec::Executor;
use crate::io::IoAdapter;
use crate::program::Program;
use crate::TAPE_SIZE;

/// Compiles the entire program to native code up front.
///
/// Unlike the JIT Coordinator, there is no fallback: a region that fails to
/// compile (mismatched brackets) is fatal, surfaced from [`NativeCompiler::new`]
/// rather than from `run`.
pub struct NativeCompiler {
    routine: CompiledRoutine,
    tape: Vec<u8>,
}

impl NativeCompiler {
    /// Compile `program`'s whole text to a single native routine.
    pub fn new(program: &Program<'_>) -> Result<NativeCompiler, BfError> {
        let routine = bf_codegen::compile_region(program.text(), 0)?;
        Ok(NativeCompiler {
            routine,
            tape: vec![0u8; TAPE_SIZE],
        })
    }

    /// The tape as left by the last `run`, for inspection in tests.
    pub fn tape(&self) -> &[u8] {
        &self.tape
    }
}

impl Executor for NativeCompiler {
    fn run<IO: IoAdapter>(&mut self, io: &mut IO) -> usize {
        let base = self.tape.as_mut_ptr();
        // SAFETY: `base` points at the start of a `TAPE_SIZE`-byte
        // allocation this `NativeCompiler` owns for the whole call.
        let end = unsafe { self.routine.call(io, base) };
        (end as usize).wrapping_sub(base as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder(Vec<u8>);

    impl IoAdapter for Recorder {
        fn write(&mut self, byte: u8) -> bool {
            self.0.push(byte);
            true
        }

        fn read(&mut self) -> u8 {
            0
        }
    }

    #[test]
    fn compiles_and_runs_add_loop() {
        let program = Program::parse(b"++++++++[>++++++++<-]>+.").unwrap();
        let mut exec = NativeCompiler::new(&program).unwrap();
        let mut io = Recorder(Vec::new());
        exec.run(&mut io);
        assert_eq!(io.0, b"A");
    }

    #[test]
    fn unbalanced_program_is_rejected_by_bracket_matcher_before_compile() {
        let err = Program::parse(b"[").unwrap_err();
        assert!(matches!(err, BfError::UnbalancedBracket { position: 0 }));
    }
}
