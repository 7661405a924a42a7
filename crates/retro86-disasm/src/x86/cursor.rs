//! Bounded, position-tracking reader over the instruction bytes.

use super::modrm::ModRM;
use crate::error::DecodeError;
use retro86_core::Width;

/// Upper bound on the bytes one instruction may consume. Guards
/// against runaway reads on malformed input; real encodings stay far
/// below it.
pub const MAX_INSTRUCTION_LENGTH: usize = 100;

/// Reader over a caller-owned byte region, scoped to one decode call.
///
/// Every successful read advances the position counter; its final
/// value becomes the instruction's encoded length. The ModR/M byte is
/// parsed lazily and memoized because opcode-extension lookup and
/// operand decoding may both ask for it, but exactly one ModR/M byte
/// exists per instruction.
pub struct Cursor<'a> {
    code: &'a [u8],
    start: usize,
    pos: usize,
    limit: usize,
    modrm: Option<ModRM>,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor reading from `code[start..]`.
    pub fn new(code: &'a [u8], start: usize) -> Self {
        Self {
            code,
            start,
            pos: 0,
            limit: code.len().saturating_sub(start).min(MAX_INSTRUCTION_LENGTH),
            modrm: None,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Absolute offset of the next unread byte, for error reporting.
    pub fn offset(&self) -> usize {
        self.start + self.pos
    }

    /// Returns the next byte without advancing.
    pub fn peek(&self) -> Result<u8, DecodeError> {
        if self.pos >= self.limit {
            return Err(DecodeError::truncated(self.offset(), self.pos + 1, self.limit));
        }
        Ok(self.code[self.start + self.pos])
    }

    /// Consumes one prefix byte. Distinct from [`consume_opcode`]
    /// only for readability at the call site.
    ///
    /// [`consume_opcode`]: Self::consume_opcode
    pub fn consume_prefix(&mut self) -> Result<(), DecodeError> {
        self.take(1).map(|_| ())
    }

    /// Consumes one opcode byte.
    pub fn consume_opcode(&mut self) -> Result<(), DecodeError> {
        self.take(1).map(|_| ())
    }

    /// Reads a little-endian immediate of the given width,
    /// sign-extended to `i32`. Whether the value is then treated as
    /// signed is the decoder's decision, not the cursor's.
    pub fn read_immediate(&mut self, width: Width) -> Result<i32, DecodeError> {
        let bytes = self.take(width.bytes())?;
        Ok(match width {
            Width::W8 => bytes[0] as i8 as i32,
            Width::W16 => i16::from_le_bytes([bytes[0], bytes[1]]) as i32,
            Width::W32 => i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        })
    }

    /// Returns the instruction's ModR/M byte. The first request
    /// consumes one byte; later requests hit the cache.
    pub fn modrm(&mut self) -> Result<ModRM, DecodeError> {
        if let Some(modrm) = self.modrm {
            return Ok(modrm);
        }
        let byte = self.take(1)?[0];
        let modrm = ModRM::parse(byte);
        self.modrm = Some(modrm);
        Ok(modrm)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.pos + n > self.limit {
            return Err(DecodeError::truncated(self.offset(), self.pos + n, self.limit));
        }
        let at = self.start + self.pos;
        self.pos += n;
        Ok(&self.code[at..at + n])
    }
}
