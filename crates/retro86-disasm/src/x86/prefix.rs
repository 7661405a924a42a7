//! Legacy prefix parsing.

use super::cursor::Cursor;
use crate::error::DecodeError;
use retro86_core::register::reg;
use retro86_core::Register;

/// Accumulated legacy prefixes, one bit per prefix byte.
///
/// Prefixes fall into four groups; at most one prefix from each group
/// may appear on an instruction, in any order. A second prefix from an
/// already-seen group is a malformed encoding, not a silent override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Prefixes(u16);

const LOCK: u16 = 1 << 0;
const REPNE: u16 = 1 << 1;
const REPE: u16 = 1 << 2;
const SEG_ES: u16 = 1 << 3;
const SEG_CS: u16 = 1 << 4;
const SEG_SS: u16 = 1 << 5;
const SEG_DS: u16 = 1 << 6;
const SEG_FS: u16 = 1 << 7;
const SEG_GS: u16 = 1 << 8;
const OPERAND_SIZE: u16 = 1 << 9;
const ADDRESS_SIZE: u16 = 1 << 10;

const GROUP1: u16 = LOCK | REPNE | REPE;
const GROUP2: u16 = SEG_ES | SEG_CS | SEG_SS | SEG_DS | SEG_FS | SEG_GS;
const GROUP3: u16 = OPERAND_SIZE;
const GROUP4: u16 = ADDRESS_SIZE;

impl Prefixes {
    /// Consumes prefix bytes from the cursor until a non-prefix byte
    /// (the opcode) is seen.
    ///
    /// A buffer that ends mid-prefix-run is not an error here; the
    /// opcode fetch that follows reports the truncation.
    pub fn parse(cursor: &mut Cursor) -> Result<Prefixes, DecodeError> {
        let mut prefixes = Prefixes(0);
        loop {
            let byte = match cursor.peek() {
                Ok(byte) => byte,
                Err(_) => break,
            };
            let (bit, group) = match byte {
                0xF0 => (LOCK, GROUP1),
                0xF2 => (REPNE, GROUP1),
                0xF3 => (REPE, GROUP1),
                0x26 => (SEG_ES, GROUP2),
                0x2E => (SEG_CS, GROUP2),
                0x36 => (SEG_SS, GROUP2),
                0x3E => (SEG_DS, GROUP2),
                0x64 => (SEG_FS, GROUP2),
                0x65 => (SEG_GS, GROUP2),
                0x66 => (OPERAND_SIZE, GROUP3),
                0x67 => (ADDRESS_SIZE, GROUP4),
                _ => break,
            };
            if prefixes.0 & group != 0 {
                return Err(DecodeError::invalid_encoding(
                    cursor.offset(),
                    format!("prefix {byte:#04x} conflicts with an earlier prefix from the same group"),
                ));
            }
            cursor.consume_prefix()?;
            prefixes.0 |= bit;
        }
        Ok(prefixes)
    }

    pub fn has_operand_size_override(&self) -> bool {
        self.0 & OPERAND_SIZE != 0
    }

    pub fn has_address_size_override(&self) -> bool {
        self.0 & ADDRESS_SIZE != 0
    }

    /// The segment register named by a group-2 prefix, if any.
    pub fn segment_override(&self) -> Option<Register> {
        let index = match self.0 & GROUP2 {
            SEG_ES => reg::ES,
            SEG_CS => reg::CS,
            SEG_SS => reg::SS,
            SEG_DS => reg::DS,
            SEG_FS => reg::FS,
            SEG_GS => reg::GS,
            _ => return None,
        };
        Some(Register::segment(index))
    }
}
