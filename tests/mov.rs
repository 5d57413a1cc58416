use bfjit::codegen::insn::Mov;
use bfjit::codegen::{Asm, MemOp, Reg64::*, Reg8::*};

macro_rules! mov {
    ($op1:expr, $op2:expr) => {{
        let mut asm = Asm::new();
        asm.mov($op1, $op2);
        asm.into_code()
    }};
}

#[rustfmt::skip]
#[test]
fn mov_rr() {
    // Every reg64-to-reg64 move always carries REX.W, low registers included.
    assert_eq!(mov!(rcx, rdx), [0x48, 0x89, 0xd1]);
    assert_eq!(mov!(r11, rdx), [0x49, 0x89, 0xd3]);
    assert_eq!(mov!(rdi, r12), [0x4c, 0x89, 0xe7]);
    assert_eq!(mov!(r15, r12), [0x4d, 0x89, 0xe7]);
}

#[rustfmt::skip]
#[test]
fn mov_load_cell() {
    // mov r8, [base] — loading a Brainfuck cell into a call argument.
    assert_eq!(mov!(cl,   MemOp::indirect(rdx)), [0x40, 0x8a, 0x0a]);
    assert_eq!(mov!(sil,  MemOp::indirect(rbx)), [0x40, 0x8a, 0x33]);
    assert_eq!(mov!(al,   MemOp::indirect(r14)), [0x41, 0x8a, 0x06]);
    assert_eq!(mov!(r11l, MemOp::indirect(rsi)), [0x44, 0x8a, 0x1e]);
}

#[rustfmt::skip]
#[test]
fn mov_store_cell() {
    // mov [base], r8 — storing a call result byte into a Brainfuck cell.
    assert_eq!(mov!(MemOp::indirect(rdx), cl),   [0x40, 0x88, 0x0a]);
    assert_eq!(mov!(MemOp::indirect(rbx), al),   [0x40, 0x88, 0x03]);
    assert_eq!(mov!(MemOp::indirect(r14), dil),  [0x41, 0x88, 0x3e]);
    assert_eq!(mov!(MemOp::indirect(rsi), r11l), [0x44, 0x88, 0x1e]);
}
