//! Error taxonomy shared by the Bracket Matcher, Native Compiler, and CLI driver.

use thiserror::Error;

/// Failures surfaced across the public boundary of this crate.
#[derive(Debug, Error)]
pub enum BfError {
    /// `init` rejected a program with an unmatched `[`.
    #[error("unable to find loop end in block starting at position {position}")]
    UnbalancedBracket {
        /// Position of the offending `[` in the program text.
        position: usize,
    },

    /// The Native Compiler could not lower a balanced region to machine code.
    #[error("unable to compile region starting at position {region_start}")]
    Compile {
        /// Position of the first byte of the region that failed to compile.
        region_start: usize,
    },

    /// Program file could not be opened or read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
