//! 16-bit real-address-mode x86 instruction decoder.
//!
//! This module implements the classic one-byte opcode map:
//! - Legacy prefixes (lock/rep, segment overrides, operand/address size)
//! - ModR/M decoding with the 8086 16-bit addressing table
//! - Opcode extension groups keyed by the ModR/M REG field
//!
//! The two-byte (0x0F) map, SIB addressing, and REX/long-mode
//! encodings are out of scope and fail with typed errors.

mod cursor;
mod decoder;
mod modrm;
mod opcodes;
mod prefix;

pub use decoder::X86Disassembler;

use crate::traits::Disassembler;
use retro86_core::{CpuMode, Instruction};

/// Best-effort decode of a single instruction.
///
/// Collapses every failure, malformed input and unsupported feature
/// alike, into `None` so scanners can skip a byte and retry. Callers
/// that need to distinguish error kinds should use
/// [`Disassembler::decode_instruction`] instead.
pub fn decode(code: &[u8], offset: usize, mode: CpuMode) -> Option<Instruction> {
    let disasm = X86Disassembler::with_mode(mode);
    match disasm.decode_instruction(code, offset) {
        Ok(insn) => Some(insn),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro86_core::Operation;

    #[test]
    fn best_effort_decode_returns_an_instruction() {
        let insn = decode(&[0x90], 0, CpuMode::Real).unwrap();
        assert_eq!(insn.operation, Operation::Nop);
        assert_eq!(insn.length, 1);
    }

    #[test]
    fn best_effort_decode_collapses_every_failure_kind() {
        // Malformed encoding (two-byte escape)
        assert_eq!(decode(&[0x0F], 0, CpuMode::Real), None);
        // Truncated immediate
        assert_eq!(decode(&[0xB8], 0, CpuMode::Real), None);
        // Coverage gap (flags operand)
        assert_eq!(decode(&[0x9C], 0, CpuMode::Real), None);
        // Unsupported CPU mode, valid bytes
        assert_eq!(decode(&[0x90], 0, CpuMode::Long), None);
        assert_eq!(decode(&[0x90], 0, CpuMode::Protected), None);
    }
}
