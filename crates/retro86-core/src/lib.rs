//! # retro86-core
//!
//! Core abstractions for the retro86 decoder. This crate defines the
//! instruction model for 16-bit real-address-mode x86: operations,
//! operands, registers, and CPU mode/width attributes. It contains no
//! decoding logic; see `retro86-disasm` for that.

pub mod instruction;
pub mod mode;
pub mod operand;
pub mod register;

pub use instruction::{Instruction, Operation};
pub use mode::{CpuMode, Width};
pub use operand::{Immediate, MemoryRef, Operand};
pub use register::{Register, RegisterClass};
