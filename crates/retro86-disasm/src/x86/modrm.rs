//! ModR/M parsing and 16-bit effective-address decoding.

use super::cursor::Cursor;
use super::decoder::Context;
use crate::error::DecodeError;
use retro86_core::register::reg;
use retro86_core::{MemoryRef, Operand, Register, RegisterClass, Width};

/// The three fields of a ModR/M byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModRM {
    /// Bits 7-6: addressing mode.
    pub mod_: u8,
    /// Bits 5-3: register number or opcode extension.
    pub reg: u8,
    /// Bits 2-0: register number or addressing-table row.
    pub rm: u8,
}

impl ModRM {
    pub fn parse(byte: u8) -> Self {
        Self {
            mod_: byte >> 6,
            reg: (byte >> 3) & 0x7,
            rm: byte & 0x7,
        }
    }

    /// True when MOD=3, i.e. the r/m field names a register instead of
    /// a memory form.
    pub fn is_register(&self) -> bool {
        self.mod_ == 3
    }
}

/// Decodes a general-purpose register number at the given width.
///
/// For 8-bit operands, numbers 4-7 name the high-byte registers
/// AH/CH/DH/BH rather than a separate register file; the stored index
/// is the low-byte sibling's (0-3) with the high-byte flag set.
pub fn decode_gpr(index: u8, width: Width) -> Register {
    if width == Width::W8 && index >= 4 {
        Register::general_high(index - 4)
    } else {
        Register::general(index, width)
    }
}

/// Decodes the REG field of the ModR/M byte as a register operand.
pub fn decode_reg_operand(
    cursor: &mut Cursor,
    class: RegisterClass,
    width: Width,
) -> Result<Operand, DecodeError> {
    let modrm = cursor.modrm()?;
    let register = match class {
        RegisterClass::General => decode_gpr(modrm.reg, width),
        RegisterClass::Segment => Register::segment(modrm.reg),
    };
    Ok(Operand::Register(register))
}

/// Decodes the MOD+RM fields as a register or 16-bit memory operand.
///
/// `allow_register` is false for descriptors that mandate a memory
/// form (LEA, LES/LDS, far indirect jumps and calls); MOD=3 is then a
/// malformed encoding.
pub fn decode_rm_operand(
    cursor: &mut Cursor,
    ctx: &Context,
    width: Width,
    allow_register: bool,
) -> Result<Operand, DecodeError> {
    if ctx.address_size != Width::W16 {
        return Err(DecodeError::unsupported(
            "32-bit effective addressing (address-size override)",
        ));
    }
    let modrm = cursor.modrm()?;

    if modrm.is_register() {
        if !allow_register {
            return Err(DecodeError::invalid_encoding(
                cursor.offset(),
                "memory operand required, but the ModR/M byte encodes a register",
            ));
        }
        return Ok(Operand::Register(decode_gpr(modrm.rm, width)));
    }

    let segment = ctx.segment_override;

    // MOD=0, RM=6 is the direct-address escape: no base register, a
    // 16-bit displacement follows.
    if modrm.mod_ == 0 && modrm.rm == 6 {
        let displacement = cursor.read_immediate(Width::W16)?;
        return Ok(Operand::Memory(MemoryRef {
            segment,
            base: None,
            index: None,
            displacement,
            width,
        }));
    }

    let (base, index) = base_index_pair(modrm.rm);
    let displacement = match modrm.mod_ {
        1 => cursor.read_immediate(Width::W8)?,
        2 => cursor.read_immediate(Width::W16)?,
        _ => 0,
    };
    Ok(Operand::Memory(MemoryRef {
        segment,
        base: Some(Register::general(base, Width::W16)),
        index: index.map(|i| Register::general(i, Width::W16)),
        displacement,
        width,
    }))
}

/// The fixed 8086 base/index combinations, keyed by the RM field.
fn base_index_pair(rm: u8) -> (u8, Option<u8>) {
    match rm & 0x7 {
        0 => (reg::BX, Some(reg::SI)),
        1 => (reg::BX, Some(reg::DI)),
        2 => (reg::BP, Some(reg::SI)),
        3 => (reg::BP, Some(reg::DI)),
        4 => (reg::SI, None),
        5 => (reg::DI, None),
        6 => (reg::BP, None),
        _ => (reg::BX, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        Context::new(retro86_core::CpuMode::Real)
    }

    fn rm_operand(bytes: &[u8], width: Width) -> Result<(Operand, usize), DecodeError> {
        let mut cursor = Cursor::new(bytes, 0);
        let operand = decode_rm_operand(&mut cursor, &ctx(), width, true)?;
        Ok((operand, cursor.position()))
    }

    #[test]
    fn field_extraction() {
        let modrm = ModRM::parse(0b10_011_101);
        assert_eq!((modrm.mod_, modrm.reg, modrm.rm), (2, 3, 5));
        assert!(!modrm.is_register());
        assert!(ModRM::parse(0xC0).is_register());
    }

    #[test]
    fn high_byte_rule() {
        assert_eq!(decode_gpr(0, Width::W8).name(), "al");
        assert_eq!(decode_gpr(3, Width::W8).name(), "bl");
        let ah = decode_gpr(4, Width::W8);
        assert!(ah.high_byte);
        assert_eq!(ah.index, 0);
        assert_eq!(ah.name(), "ah");
        assert_eq!(decode_gpr(7, Width::W8).name(), "bh");
        // No high-byte aliasing at 16 bits.
        assert_eq!(decode_gpr(4, Width::W16).name(), "sp");
    }

    #[test]
    fn register_form() {
        let (operand, consumed) = rm_operand(&[0xC3], Width::W16).unwrap();
        assert_eq!(operand, Operand::reg(Register::general(reg::BX, Width::W16)));
        assert_eq!(consumed, 1);
    }

    #[test]
    fn register_form_rejected_when_memory_mandatory() {
        let mut cursor = Cursor::new(&[0xC3], 0);
        let err = decode_rm_operand(&mut cursor, &ctx(), Width::W16, false).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEncoding { .. }));
    }

    #[test]
    fn base_index_no_displacement() {
        // mod=0 rm=0 -> [bx+si]
        let (operand, consumed) = rm_operand(&[0x00], Width::W16).unwrap();
        let Operand::Memory(mem) = operand else {
            panic!("expected memory operand");
        };
        assert_eq!(mem.base, Some(Register::general(reg::BX, Width::W16)));
        assert_eq!(mem.index, Some(Register::general(reg::SI, Width::W16)));
        assert_eq!(mem.displacement, 0);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn direct_address_escape() {
        // mod=0 rm=6 -> [disp16], not [bp]
        let (operand, consumed) = rm_operand(&[0x06, 0x10, 0x20], Width::W16).unwrap();
        let Operand::Memory(mem) = operand else {
            panic!("expected memory operand");
        };
        assert_eq!(mem.base, None);
        assert_eq!(mem.index, None);
        assert_eq!(mem.displacement, 0x2010);
        assert_eq!(consumed, 3);
    }

    #[test]
    fn bp_requires_mod_1_or_2() {
        // mod=1 rm=6 -> [bp+disp8]
        let (operand, consumed) = rm_operand(&[0x46, 0xF0], Width::W16).unwrap();
        let Operand::Memory(mem) = operand else {
            panic!("expected memory operand");
        };
        assert_eq!(mem.base, Some(Register::general(reg::BP, Width::W16)));
        assert_eq!(mem.index, None);
        assert_eq!(mem.displacement, -0x10);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn disp16_is_sign_extended() {
        // mod=2 rm=7 -> [bx+disp16]
        let (operand, consumed) = rm_operand(&[0x87, 0x00, 0x80], Width::W16).unwrap();
        let Operand::Memory(mem) = operand else {
            panic!("expected memory operand");
        };
        assert_eq!(mem.base, Some(Register::general(reg::BX, Width::W16)));
        assert_eq!(mem.displacement, -0x8000);
        assert_eq!(consumed, 3);
    }

    #[test]
    fn segment_override_attaches_to_memory() {
        let mut context = ctx();
        context.segment_override = Some(Register::segment(reg::ES));
        let mut cursor = Cursor::new(&[0x07], 0);
        let operand = decode_rm_operand(&mut cursor, &context, Width::W8, true).unwrap();
        let Operand::Memory(mem) = operand else {
            panic!("expected memory operand");
        };
        assert_eq!(mem.segment, Some(Register::segment(reg::ES)));
        assert_eq!(mem.base, Some(Register::general(reg::BX, Width::W16)));
    }

    #[test]
    fn address_size_override_is_unsupported() {
        let mut context = ctx();
        context.address_size = Width::W32;
        let mut cursor = Cursor::new(&[0x00], 0);
        let err = decode_rm_operand(&mut cursor, &context, Width::W16, true).unwrap_err();
        assert!(matches!(err, DecodeError::Unsupported { .. }));
    }

    #[test]
    fn all_eight_memory_rows() {
        let expect = [
            (Some(reg::BX), Some(reg::SI)),
            (Some(reg::BX), Some(reg::DI)),
            (Some(reg::BP), Some(reg::SI)),
            (Some(reg::BP), Some(reg::DI)),
            (Some(reg::SI), None),
            (Some(reg::DI), None),
            (Some(reg::BP), None),
            (Some(reg::BX), None),
        ];
        for rm in 0u8..8 {
            // mod=1 so row 6 is [bp+disp8] rather than the escape.
            let (operand, _) = rm_operand(&[0x40 | rm, 0x01], Width::W16).unwrap();
            let Operand::Memory(mem) = operand else {
                panic!("expected memory operand for rm={rm}");
            };
            assert_eq!(mem.base.map(|r| r.index), expect[rm as usize].0);
            assert_eq!(mem.index.map(|r| r.index), expect[rm as usize].1);
        }
    }
}
