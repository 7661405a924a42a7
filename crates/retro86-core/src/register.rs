//! Register representation for 16-bit x86.

use crate::Width;

/// Register class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegisterClass {
    /// General purpose register (ax, bx, si, ...).
    General,
    /// Segment register (es, cs, ss, ds, fs, gs).
    Segment,
}

/// A concrete register operand.
///
/// Registers are identified by class, a 3-bit encoding index, and a
/// width. The `high_byte` flag marks the legacy 8-bit AH/CH/DH/BH
/// forms: those encode index 4-7 on the wire but address the high
/// byte of registers 0-3, so they carry `index` 0-3 plus the flag
/// rather than an index >= 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Register {
    /// The class of register.
    pub class: RegisterClass,
    /// Encoding index, 0-7.
    pub index: u8,
    /// Size of the register.
    pub width: Width,
    /// True for AH/CH/DH/BH.
    pub high_byte: bool,
}

/// Register encoding indices, in hardware encoding order.
pub mod reg {
    // General purpose (word order; byte registers share 0-3 + high flag)
    pub const AX: u8 = 0;
    pub const CX: u8 = 1;
    pub const DX: u8 = 2;
    pub const BX: u8 = 3;
    pub const SP: u8 = 4;
    pub const BP: u8 = 5;
    pub const SI: u8 = 6;
    pub const DI: u8 = 7;

    // Segment registers
    pub const ES: u8 = 0;
    pub const CS: u8 = 1;
    pub const SS: u8 = 2;
    pub const DS: u8 = 3;
    pub const FS: u8 = 4;
    pub const GS: u8 = 5;
}

impl Register {
    /// Creates a general-purpose register.
    pub fn general(index: u8, width: Width) -> Self {
        Self {
            class: RegisterClass::General,
            index,
            width,
            high_byte: false,
        }
    }

    /// Creates a high-byte register (AH/CH/DH/BH). `index` is 0-3.
    pub fn general_high(index: u8) -> Self {
        Self {
            class: RegisterClass::General,
            index,
            width: Width::W8,
            high_byte: true,
        }
    }

    /// Creates a segment register.
    pub fn segment(index: u8) -> Self {
        Self {
            class: RegisterClass::Segment,
            index,
            width: Width::W16,
            high_byte: false,
        }
    }

    /// Returns the canonical Intel name for this register.
    pub fn name(&self) -> &'static str {
        match self.class {
            RegisterClass::General => general_name(self.index, self.width, self.high_byte),
            RegisterClass::Segment => segment_name(self.index),
        }
    }
}

fn general_name(index: u8, width: Width, high_byte: bool) -> &'static str {
    if high_byte {
        return match index {
            reg::AX => "ah",
            reg::CX => "ch",
            reg::DX => "dh",
            reg::BX => "bh",
            _ => "unknown",
        };
    }
    match (index, width) {
        (reg::AX, Width::W8) => "al",
        (reg::CX, Width::W8) => "cl",
        (reg::DX, Width::W8) => "dl",
        (reg::BX, Width::W8) => "bl",

        (reg::AX, Width::W16) => "ax",
        (reg::CX, Width::W16) => "cx",
        (reg::DX, Width::W16) => "dx",
        (reg::BX, Width::W16) => "bx",
        (reg::SP, Width::W16) => "sp",
        (reg::BP, Width::W16) => "bp",
        (reg::SI, Width::W16) => "si",
        (reg::DI, Width::W16) => "di",

        (reg::AX, Width::W32) => "eax",
        (reg::CX, Width::W32) => "ecx",
        (reg::DX, Width::W32) => "edx",
        (reg::BX, Width::W32) => "ebx",
        (reg::SP, Width::W32) => "esp",
        (reg::BP, Width::W32) => "ebp",
        (reg::SI, Width::W32) => "esi",
        (reg::DI, Width::W32) => "edi",

        _ => "unknown",
    }
}

fn segment_name(index: u8) -> &'static str {
    match index {
        reg::ES => "es",
        reg::CS => "cs",
        reg::SS => "ss",
        reg::DS => "ds",
        reg::FS => "fs",
        reg::GS => "gs",
        _ => "unknown",
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_register_names() {
        assert_eq!(Register::general(reg::AX, Width::W16).name(), "ax");
        assert_eq!(Register::general(reg::DI, Width::W16).name(), "di");
        assert_eq!(Register::general(reg::AX, Width::W32).name(), "eax");
        assert_eq!(Register::general(reg::BX, Width::W8).name(), "bl");
    }

    #[test]
    fn high_byte_register_names() {
        assert_eq!(Register::general_high(reg::AX).name(), "ah");
        assert_eq!(Register::general_high(reg::BX).name(), "bh");
        assert_eq!(Register::general_high(reg::CX).width, Width::W8);
    }

    #[test]
    fn segment_register_names() {
        assert_eq!(Register::segment(reg::ES).name(), "es");
        assert_eq!(Register::segment(reg::GS).name(), "gs");
        assert_eq!(Register::segment(reg::DS).width, Width::W16);
    }
}
