//! Disassembler traits.

use crate::DecodeError;
use retro86_core::Instruction;

/// Trait for instruction decoders.
pub trait Disassembler {
    /// Decode a single instruction starting at `offset` within `code`.
    ///
    /// # Arguments
    /// * `code` - The raw byte region
    /// * `offset` - Index of the first byte of the instruction
    ///
    /// # Returns
    /// The decoded instruction; its `length` field tells the caller
    /// how far to advance to reach the next instruction.
    fn decode_instruction(&self, code: &[u8], offset: usize) -> Result<Instruction, DecodeError>;

    /// Returns the per-instruction length bound enforced by this decoder.
    fn max_instruction_size(&self) -> usize;

    /// Disassemble a block of code into instructions.
    fn disassemble_block(&self, code: &[u8]) -> Vec<Result<Instruction, DecodeError>> {
        let mut instructions = Vec::new();
        let mut offset = 0;

        while offset < code.len() {
            match self.decode_instruction(code, offset) {
                Ok(insn) => {
                    offset += insn.length;
                    instructions.push(Ok(insn));
                }
                Err(e) => {
                    // On error, skip one byte and continue
                    offset += 1;
                    instructions.push(Err(e));
                }
            }
        }

        instructions
    }
}
