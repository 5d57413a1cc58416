//! Register definitions used by the x64 encoder.
//!
//! Only the registers and widths the Brainfuck native compiler actually
//! emits are modeled: 64 bit general purpose registers (used for the data
//! pointer and the four I/O trampoline values) and a handful of 8 bit
//! registers (used to move a single Brainfuck cell value into/out of a call
//! argument).

/// Trait implemented by all register kinds, giving the encoder uniform
/// access to the bits it needs to build `REX`/`ModRM`/`SIB` bytes.
pub(crate) trait Reg: Copy {
    /// 3 bit register index (`ModRM.rm`/`.reg` or `SIB.base`/`.index`).
    fn idx(&self) -> u8;

    /// Whether this register requires a `REX` prefix to be addressable at
    /// all (e.g. `sil`/`dil`, or any register with index >= 8).
    fn need_rex(&self) -> bool;

    /// Whether `REX.W` (64 bit operand size) must be set for this register.
    fn rexw(&self) -> bool;

    /// Whether the register's index needs `REX.B`/`.R`/`.X` (index >= 8).
    fn is_ext(&self) -> bool {
        self.idx() >= 8
    }
}

macro_rules! impl_reg_enum {
    ($name:ident, $rexw:expr, $need_rex_always:expr, $( $variant:ident = $idx:expr ),+ $(,)?) => {
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            #[inline]
            pub(crate) const fn idx_of(self) -> u8 {
                match self {
                    $( $name::$variant => $idx ),+
                }
            }
        }

        impl Reg for $name {
            #[inline]
            fn idx(&self) -> u8 {
                self.idx_of()
            }

            #[inline]
            fn need_rex(&self) -> bool {
                $need_rex_always || self.idx() >= 8
            }

            #[inline]
            fn rexw(&self) -> bool {
                $rexw
            }
        }
    };
}

impl_reg_enum!(
    Reg64, true, false,
    rax = 0, rcx = 1, rdx = 2, rbx = 3, rsp = 4, rbp = 5, rsi = 6, rdi = 7,
    r8 = 8, r9 = 9, r10 = 10, r11 = 11, r12 = 12, r13 = 13, r14 = 14, r15 = 15,
);

impl Reg64 {
    /// Whether addressing through this register as a memory base needs a
    /// `SIB` byte (`rsp`/`r12`, whose `ModRM.rm == 0b100` is reinterpreted as
    /// "SIB follows" rather than as a plain register).
    pub(crate) fn need_sib(&self) -> bool {
        self.idx() & 0b111 == 0b100
    }

    /// Whether this register's low 3 bits collide with the `RIP`-relative
    /// addressing encoding (`rbp`/`r13` with `mod = 00`).
    pub(crate) fn is_pc_rel(&self) -> bool {
        self.idx() & 0b111 == 0b101
    }
}

// 8 bit registers that always require a REX prefix: either because their
// index is >= 8 (`r8l`..`r15l`), or because accessing their low byte without
// REX would instead address a legacy high-byte register (`ah`/`ch`/`dh`/`bh`
// at the same index). This crate never emits the legacy high-byte forms.
impl_reg_enum!(
    Reg8, false, true,
    al = 0, cl = 1, dl = 2, bl = 3, spl = 4, bpl = 5, sil = 6, dil = 7,
    r8l = 8, r9l = 9, r10l = 10, r11l = 11, r12l = 12, r13l = 13, r14l = 14, r15l = 15,
);
