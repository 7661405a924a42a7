//! CPU operating mode and operand/address width attributes.

/// CPU operating mode selected by the caller.
///
/// Only [`Real`](CpuMode::Real) is accepted by the decoder; the other
/// modes exist so callers can express intent and receive a typed
/// unsupported-feature error instead of a silent misdecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CpuMode {
    /// 16-bit real-address mode (8086 compatible).
    Real,
    /// 32-bit protected mode.
    Protected,
    /// 64-bit long mode.
    Long,
}

impl CpuMode {
    /// Returns the name of this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Protected => "protected",
            Self::Long => "long",
        }
    }
}

/// Operand or address width.
///
/// 64-bit widths are unrepresentable by construction; nothing in the
/// real-mode decoder can produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Width {
    /// 8 bits.
    W8,
    /// 16 bits.
    W16,
    /// 32 bits.
    W32,
}

impl Width {
    /// Returns the width in bits.
    pub fn bits(&self) -> u16 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
        }
    }

    /// Returns the width in bytes.
    pub fn bytes(&self) -> usize {
        match self {
            Self::W8 => 1,
            Self::W16 => 2,
            Self::W32 => 4,
        }
    }
}
