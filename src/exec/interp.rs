//! Direct interpreter: dispatch on each command, return stack for `[`/`]`.

use crate::exec::Executor;
use crate::io::IoAdapter;
use crate::program::Program;
use crate::TAPE_SIZE;

/// Plain dispatch loop over the program text. No machine code involved.
pub struct Interpreter<'a> {
    program: &'a Program<'a>,
    tape: Vec<u8>,
    ptr: *mut u8,
}

impl<'a> Interpreter<'a> {
    /// Build an interpreter over `program`, with a fresh zero-initialized
    /// tape of [`TAPE_SIZE`] bytes and the data pointer at its first cell.
    pub fn new(program: &'a Program<'a>) -> Interpreter<'a> {
        let mut tape = vec![0u8; TAPE_SIZE];
        let ptr = tape.as_mut_ptr();
        Interpreter { program, tape, ptr }
    }

    /// The tape as left by the last `run`, for inspection in tests.
    pub fn tape(&self) -> &[u8] {
        &self.tape
    }
}

impl Executor for Interpreter<'_> {
    fn run<IO: IoAdapter>(&mut self, io: &mut IO) -> usize {
        let text = self.program.text();
        let mut cursor = 0usize;
        let mut return_stack: Vec<usize> = Vec::new();

        while cursor < text.len() {
            match text[cursor] {
                b'>' => {
                    self.ptr = self.ptr.wrapping_add(1);
                    cursor += 1;
                }
                b'<' => {
                    self.ptr = self.ptr.wrapping_sub(1);
                    cursor += 1;
                }
                b'+' => {
                    // SAFETY: `ptr` always points somewhere into `self.tape`'s
                    // allocation for any well-behaved program; per spec.md's
                    // unchecked-pointer-movement Non-goal, no range check is
                    // performed here, matching the compiled-code path.
                    unsafe { *self.ptr = (*self.ptr).wrapping_add(1) };
                    cursor += 1;
                }
                b'-' => {
                    unsafe { *self.ptr = (*self.ptr).wrapping_sub(1) };
                    cursor += 1;
                }
                b'.' => {
                    io.write(unsafe { *self.ptr });
                    cursor += 1;
                }
                b',' => {
                    unsafe { *self.ptr = io.read() };
                    cursor += 1;
                }
                b'[' => {
                    if unsafe { *self.ptr } != 0 {
                        return_stack.push(cursor);
                        cursor += 1;
                    } else {
                        cursor = self.program.loop_at(cursor).after_end;
                    }
                }
                b']' => {
                    if let Some(start) = return_stack.pop() {
                        cursor = start;
                    } else {
                        cursor += 1;
                    }
                }
                _ => cursor += 1,
            }
        }

        (self.ptr as usize).wrapping_sub(self.tape.as_ptr() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::StdIo;

    struct Recorder {
        out: Vec<u8>,
        input: std::collections::VecDeque<u8>,
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

    #[test]
    fn add_eight_times_eight_plus_one_is_capital_a() {
        let program = Program::parse(b"++++++++[>++++++++<-]>+.").unwrap();
        let mut interp = Interpreter::new(&program);
        let mut io = Recorder {
            out: Vec::new(),
            input: Default::default(),
        };
        interp.run(&mut io);
        assert_eq!(io.out, b"A");
    }

    #[test]
    fn echoes_input_byte_for_byte() {
        let program = Program::parse(b",.,.,.").unwrap();
        let mut interp = Interpreter::new(&program);
        let mut io = Recorder {
            out: Vec::new(),
            input: b"abc".iter().copied().collect(),
        };
        interp.run(&mut io);
        assert_eq!(io.out, b"abc");
    }

    #[test]
    fn reads_until_eof_then_stops_on_zero() {
        let program = Program::parse(b",[.,]").unwrap();
        let mut interp = Interpreter::new(&program);
        let mut io = Recorder {
            out: Vec::new(),
            input: b"Hi!".iter().copied().collect(),
        };
        interp.run(&mut io);
        assert_eq!(io.out, b"Hi!");
    }

    #[test]
    fn cell_wraps_at_byte_boundary() {
        let program = Program::parse(b"-.").unwrap();
        let mut interp = Interpreter::new(&program);
        let mut io = Recorder {
            out: Vec::new(),
            input: Default::default(),
        };
        interp.run(&mut io);
        assert_eq!(io.out, [0xff]);
    }

    #[test]
    fn orphan_close_bracket_is_a_no_op() {
        let program = Program::parse(b"]+.").unwrap();
        let mut interp = Interpreter::new(&program);
        let mut io = Recorder {
            out: Vec::new(),
            input: Default::default(),
        };
        interp.run(&mut io);
        assert_eq!(io.out, [0x01]);
    }

    #[test]
    fn unused_stdio_adapter_compiles_against_the_same_trait() {
        let program = Program::parse(b"").unwrap();
        let mut interp = Interpreter::new(&program);
        let mut io = StdIo::new();
        interp.run(&mut io);
    }
}
