//! Decoding error types.

use thiserror::Error;

/// Error type for instruction decoding.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Malformed encoding: conflicting prefixes, a register form where
    /// memory is mandatory, or an opcode that resolves to no operation
    /// (including bytes reserved for the unimplemented two-byte escape).
    #[error("invalid encoding at offset {offset}: {reason}")]
    InvalidEncoding { offset: usize, reason: String },

    /// A CPU mode or addressing form this decoder does not implement.
    #[error("unsupported feature: {reason}")]
    Unsupported { reason: String },

    /// The instruction ran past the end of the buffer or the
    /// per-instruction length bound.
    #[error("truncated instruction at offset {offset}: need {needed} bytes, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// An operand descriptor with no decoding path. This signals a
    /// coverage gap in the opcode tables, not bad input data.
    #[error("no decoding path for operand descriptor {spec}")]
    UnimplementedOperand { spec: &'static str },
}

impl DecodeError {
    /// Creates a new InvalidEncoding error.
    pub fn invalid_encoding(offset: usize, reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            offset,
            reason: reason.into(),
        }
    }

    /// Creates a new Unsupported error.
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }

    /// Creates a new Truncated error.
    pub fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        Self::Truncated {
            offset,
            needed,
            available,
        }
    }

    /// Creates a new UnimplementedOperand error.
    pub fn unimplemented_operand(spec: &'static str) -> Self {
        Self::UnimplementedOperand { spec }
    }
}
