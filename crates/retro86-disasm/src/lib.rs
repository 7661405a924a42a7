//! # retro86-disasm
//!
//! Instruction decoder for 16-bit real-address-mode x86.
//!
//! The decoder turns a caller-owned byte slice into a structured
//! [`Instruction`](retro86_core::Instruction): an operation mnemonic,
//! an ordered list of typed operands, and the encoded length. Nothing
//! is executed; nothing is retained between calls. Decoding is
//! synchronous, and because the opcode tables are immutable statics,
//! concurrent decodes on independent buffers are safe without locking.

pub mod error;
pub mod traits;
pub mod x86;

pub use error::DecodeError;
pub use traits::Disassembler;
pub use x86::X86Disassembler;
