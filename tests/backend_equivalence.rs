//! Whole-program, cross-backend scenarios: the Interpreter, ahead-of-time
//! Native Compiler, and JIT Coordinator must agree on output and tape state
//! for every well-formed program (spec property "Backend equivalence").

use std::collections::VecDeque;

use bfjit::exec::compiler::NativeCompiler;
use bfjit::exec::interp::Interpreter;
use bfjit::exec::jit::JitCoordinator;
use bfjit::exec::Executor;
use bfjit::io::IoAdapter;
use bfjit::program::Program;

struct Recorder {
    out: Vec<u8>,
    input: VecDeque<u8>,
}

impl Recorder {
    fn with_input(input: &[u8]) -> Recorder {
        Recorder {
            out: Vec::new(),
            input: input.iter().copied().collect(),
        }
    }
}

impl IoAdapter for Recorder {
    fn write(&mut self, byte: u8) -> bool {
        self.out.push(byte);
        true
    }

    fn read(&mut self) -> u8 {
        self.input.pop_front().unwrap_or(0)
    }
}

/// Run `source` against all three backends with the same `input` and
/// assert they produce identical output and leave the first `tape_prefix`
/// tape cells identical.
fn assert_backends_agree(source: &[u8], input: &[u8], tape_prefix: usize) {
    let interp_program = Program::parse(source).unwrap();
    let mut interp = Interpreter::new(&interp_program);
    let mut interp_io = Recorder::with_input(input);
    interp.run(&mut interp_io);

    let compiler_program = Program::parse(source).unwrap();
    let mut compiler = NativeCompiler::new(&compiler_program).unwrap();
    let mut compiler_io = Recorder::with_input(input);
    compiler.run(&mut compiler_io);

    let jit_program = Program::parse(source).unwrap();
    let mut jit = JitCoordinator::new(&jit_program);
    let mut jit_io = Recorder::with_input(input);
    jit.run(&mut jit_io);

    assert_eq!(interp_io.out, compiler_io.out, "interpreter vs compiler output");
    assert_eq!(interp_io.out, jit_io.out, "interpreter vs jit output");
    assert_eq!(
        interp.tape()[..tape_prefix],
        compiler.tape()[..tape_prefix],
        "interpreter vs compiler tape"
    );
    assert_eq!(
        interp.tape()[..tape_prefix],
        jit.tape()[..tape_prefix],
        "interpreter vs jit tape"
    );
}

#[test]
fn scenario_1_add_loop_prints_capital_a() {
    assert_backends_agree(b"++++++++[>++++++++<-]>+.", b"", 4);
}

#[test]
fn scenario_2_echoes_three_input_bytes() {
    assert_backends_agree(b",.,.,.", b"abc", 1);
}

#[test]
fn scenario_3_cat_until_eof() {
    assert_backends_agree(b",[.,]", b"Hi!", 1);
}

#[test]
fn scenario_6_orphan_close_bracket_is_a_no_op() {
    assert_backends_agree(b"]+.", b"", 1);
}

#[test]
fn hello_world_agrees_across_all_three_backends() {
    // Nested loops, each evaluated well past the JIT's promotion threshold,
    // so this scenario exercises the JIT's native path as well as the
    // ahead-of-time compiler and the plain interpreter.
    let source = b"++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
    assert_backends_agree(source, b"", 8);
}

#[test]
fn empty_program_leaves_data_pointer_at_origin() {
    assert_backends_agree(b"", b"", 1);
}

#[test]
fn unmatched_open_bracket_is_rejected_by_init_before_any_backend_runs() {
    use bfjit::BfError;

    let err = Program::parse(b"[").unwrap_err();
    assert!(matches!(err, BfError::UnbalancedBracket { position: 0 }));
}

#[test]
fn loop_promoted_under_jit_still_matches_interpreter_tape() {
    // 30 decrements crosses the JIT's hard-coded hit-count threshold (20)
    // while the loop is still running, promoting it to native code
    // mid-execution; the tape must still match the plain interpreter.
    let source = [b"+".repeat(30), b"[-]".to_vec(), b">+.".to_vec()].concat();
    assert_backends_agree(&source, b"", 2);
}
