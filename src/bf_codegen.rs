//! Brainfuck region lowering onto the `codegen` x64 assembler.
//!
//! Implements the Native ABI contract: a compiled routine takes two function
//! pointer/context pairs bridging to an [`crate::io::IoAdapter`] plus the
//! current data pointer, and returns the data pointer after running the
//! region to completion once.

use std::cell::RefCell;
use std::ffi::c_void;
use std::rc::Rc;

use crate::codegen::insn::{Add, Call, Cmp, Dec, Inc, Jnz, Jz, Mov, Pop, Push, Sub};
use crate::codegen::{Asm, CodeRuntime, Imm8, Label, MemOp, Reg64, Reg8};
use crate::error::BfError;
use crate::io::IoAdapter;

/// `extern "C" fn(*mut c_void, u8) -> u8` — write one byte, `1`/`0` for
/// success/failure (mirrors [`IoAdapter::write`]'s `bool`).
type WriteFn = extern "C" fn(*mut c_void, u8) -> u8;
/// `extern "C" fn(*mut c_void) -> u8` — read one byte, `0` on EOF.
type ReadFn = extern "C" fn(*mut c_void) -> u8;
/// The Native ABI entry point every compiled routine implements.
type Entry = extern "C" fn(WriteFn, ReadFn, *mut c_void, *mut c_void, *mut u8) -> *mut u8;

/// An opaque handle to a compiled Brainfuck region.
///
/// Owns the executable page backing the region; dropping it unmaps the page.
pub(crate) struct CompiledRoutine {
    runtime: CodeRuntime,
}

impl CompiledRoutine {
    /// Run the compiled region once, starting at `data_ptr`, and return the
    /// data pointer left by the routine.
    ///
    /// # Safety
    ///
    /// `data_ptr` must point into a live allocation with enough headroom in
    /// both directions for whatever the region does; the routine performs no
    /// bounds checking, matching the crate-wide unchecked tape Non-goal.
    pub(crate) unsafe fn call<IO: IoAdapter>(&self, io: &mut IO, data_ptr: *mut u8) -> *mut u8 {
        let entry: Entry = unsafe { self.runtime.as_fn() };
        let ctx = io as *mut IO as *mut c_void;
        entry(
            trampoline_write::<IO>,
            trampoline_read::<IO>,
            ctx,
            ctx,
            data_ptr,
        )
    }
}

extern "C" fn trampoline_write<IO: IoAdapter>(ctx: *mut c_void, byte: u8) -> u8 {
    let io = unsafe { &mut *(ctx as *mut IO) };
    u8::from(io.write(byte))
}

extern "C" fn trampoline_read<IO: IoAdapter>(ctx: *mut c_void) -> u8 {
    let io = unsafe { &mut *(ctx as *mut IO) };
    io.read()
}

/// Maximum run length folded into a single `add`/`sub mem, imm8`. A
/// Brainfuck cell wraps at 256 regardless of how many instructions realize
/// the change, so longer runs are simply chained.
const MAX_FOLD: usize = i8::MAX as usize;

/// Lower a balanced Brainfuck region (whole program, or a single `[...]`
/// region including both brackets) into a [`CompiledRoutine`].
///
/// `region_start` is the region's absolute position in the original program
/// text, used only to name the offending position on failure.
pub(crate) fn compile_region(region: &[u8], region_start: usize) -> Result<CompiledRoutine, BfError> {
    // Checked up front, before any `Label` exists: a `Label` panics on drop
    // if it was never bound, so an unbalanced region must be rejected before
    // the `[`/`]` loop below ever creates one, not partway through it.
    check_balanced(region, region_start)?;

    // Argument registers on entry (SystemV): rdi, rsi, rdx, rcx, r8.
    let arg_write_fn = Reg64::rdi;
    let arg_read_fn = Reg64::rsi;
    let arg_write_ctx = Reg64::rdx;
    let arg_read_ctx = Reg64::rcx;
    let arg_data_ptr = Reg64::r8;

    // VM state lives in callee-saved registers for the whole routine body,
    // so no register needs saving around the `.`/`,` calls.
    let data_ptr = Reg64::rbx;
    let write_fn = Reg64::r12;
    let write_ctx = Reg64::r13;
    let read_fn = Reg64::r14;
    let read_ctx = Reg64::r15;

    let cell = MemOp::indirect(data_ptr);

    let mut asm = Asm::new();

    // Prologue: save callee-saved registers, move args into place.
    for saved in [Reg64::rbx, Reg64::r12, Reg64::r13, Reg64::r14, Reg64::r15] {
        asm.push(saved);
    }
    asm.mov(data_ptr, arg_data_ptr);
    asm.mov(write_fn, arg_write_fn);
    asm.mov(write_ctx, arg_write_ctx);
    asm.mov(read_fn, arg_read_fn);
    asm.mov(read_ctx, arg_read_ctx);

    let mut label_stack: Vec<(Label, Label)> = Vec::new();

    let mut pc = 0;
    while pc < region.len() {
        match region[pc] {
            b'>' => asm.inc(data_ptr),
            b'<' => asm.dec(data_ptr),
            b'+' => {
                let cnt = region[pc..].iter().take_while(|&&b| b == b'+').count();
                fold_delta(&mut asm, cell, cnt, true);
                pc += cnt - 1;
            }
            b'-' => {
                let cnt = region[pc..].iter().take_while(|&&b| b == b'-').count();
                fold_delta(&mut asm, cell, cnt, false);
                pc += cnt - 1;
            }
            b'.' => {
                // arg1 = write_ctx, arg2 = current cell byte.
                asm.mov(Reg8::sil, cell);
                asm.mov(Reg64::rdi, write_ctx);
                asm.call(write_fn);
            }
            b',' => {
                // arg1 = read_ctx; result byte comes back in al.
                asm.mov(Reg64::rdi, read_ctx);
                asm.call(read_fn);
                asm.mov(cell, Reg8::al);
            }
            b'[' => {
                label_stack.push((Label::new(), Label::new()));
                let pair = label_stack.last_mut().unwrap();
                asm.cmp(cell, Imm8::from(0u8));
                asm.jz(&mut pair.0);
                asm.bind(&mut pair.1);
            }
            b']' => {
                // `check_balanced` has already guaranteed a matching `[` for
                // every `]` in `region`.
                let mut pair = label_stack.pop().expect("region was checked balanced above");
                asm.cmp(cell, Imm8::from(0u8));
                asm.jnz(&mut pair.1);
                asm.bind(&mut pair.0);
            }
            _ => {}
        }
        pc += 1;
    }
    debug_assert!(label_stack.is_empty(), "region was checked balanced above");

    // Epilogue: return the data pointer, restore callee-saved registers.
    asm.mov(Reg64::rax, data_ptr);
    for saved in [Reg64::r15, Reg64::r14, Reg64::r13, Reg64::r12, Reg64::rbx] {
        asm.pop(saved);
    }
    asm.ret();

    let runtime = CodeRuntime::new(asm.into_code());
    Ok(CompiledRoutine { runtime })
}

/// Reject a region with a `[` lacking a matching `]`, or a `]` lacking a
/// matching `[`, before `compile_region` creates any [`Label`].
///
/// `Label::drop` panics if a label was never bound, so letting an unbalanced
/// region reach the main lowering loop risks dropping an unbound loop-exit
/// label on the error path. Validating balance first means that loop only
/// ever runs over a region it can lower to completion.
fn check_balanced(region: &[u8], region_start: usize) -> Result<(), BfError> {
    let mut depth = 0usize;
    for &byte in region {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(BfError::Compile { region_start })?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(BfError::Compile { region_start });
    }
    Ok(())
}

fn fold_delta(asm: &mut Asm, cell: MemOp, cnt: usize, positive: bool) {
    let mut remaining = cnt;
    while remaining > 0 {
        let chunk = remaining.min(MAX_FOLD);
        if positive {
            asm.add(cell, Imm8::from(chunk as u8));
        } else {
            asm.sub(cell, Imm8::from(chunk as u8));
        }
        remaining -= chunk;
    }
}

/// Shared `RefCell<Option<Rc<CompiledRoutine>>>` slot type used by `program::LoopRecord`.
pub(crate) type CompiledSlot = RefCell<Option<Rc<CompiledRoutine>>>;
