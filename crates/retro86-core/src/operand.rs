//! Instruction operand types.

use crate::{Register, Width};

/// An instruction operand.
///
/// Every operand is self-contained; none references another operand
/// or any decoder state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    /// Register operand.
    Register(Register),
    /// Immediate value.
    Immediate(Immediate),
    /// Memory reference.
    Memory(MemoryRef),
    /// Signed displacement relative to the end of the instruction.
    /// Resolving it against an address is the caller's concern.
    Relative { offset: i32 },
    /// Far pointer (segment:offset) encoded in the instruction.
    FarPointer { segment: u16, offset: u16 },
}

impl Operand {
    /// Creates a register operand.
    pub fn reg(reg: Register) -> Self {
        Self::Register(reg)
    }

    /// Creates an immediate operand.
    pub fn imm(value: i32, width: Width) -> Self {
        Self::Immediate(Immediate { value, width })
    }

    /// Returns true if this is a register operand.
    pub fn is_register(&self) -> bool {
        matches!(self, Self::Register(_))
    }

    /// Returns true if this is an immediate operand.
    pub fn is_immediate(&self) -> bool {
        matches!(self, Self::Immediate(_))
    }

    /// Returns true if this is a memory operand.
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory(_))
    }
}

/// Immediate value operand. The value is sign-extended to `i32` when
/// it is read off the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Immediate {
    /// The value.
    pub value: i32,
    /// Encoded size.
    pub width: Width,
}

/// Memory reference operand: `seg:[base + index + disp]` in 16-bit
/// addressing form. There is no scale factor; real mode predates SIB.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryRef {
    /// Segment override, if a prefix selected one.
    pub segment: Option<Register>,
    /// Base register (if any).
    pub base: Option<Register>,
    /// Index register (if any).
    pub index: Option<Register>,
    /// Signed displacement.
    pub displacement: i32,
    /// Access width.
    pub width: Width,
}

impl MemoryRef {
    /// Creates a memory reference with just a displacement (direct address).
    pub fn direct(displacement: i32, width: Width) -> Self {
        Self {
            segment: None,
            base: None,
            index: None,
            displacement,
            width,
        }
    }

    /// Creates a memory reference with a base register.
    pub fn base(base: Register, width: Width) -> Self {
        Self {
            segment: None,
            base: Some(base),
            index: None,
            displacement: 0,
            width,
        }
    }

    /// Sets the segment register.
    pub fn with_segment(mut self, segment: Register) -> Self {
        self.segment = Some(segment);
        self
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register(reg) => write!(f, "{}", reg.name()),
            Self::Immediate(imm) => {
                if imm.value < 0 {
                    write!(f, "-{:#x}", -(imm.value as i64))
                } else {
                    write!(f, "{:#x}", imm.value)
                }
            }
            Self::Memory(mem) => {
                if let Some(ref seg) = mem.segment {
                    write!(f, "{}:", seg.name())?;
                }
                write!(f, "[")?;
                let mut has_content = false;

                if let Some(ref base) = mem.base {
                    write!(f, "{}", base.name())?;
                    has_content = true;
                }

                if let Some(ref index) = mem.index {
                    if has_content {
                        write!(f, "+")?;
                    }
                    write!(f, "{}", index.name())?;
                    has_content = true;
                }

                if mem.displacement != 0 || !has_content {
                    if has_content {
                        if mem.displacement >= 0 {
                            write!(f, "+{:#x}", mem.displacement)?;
                        } else {
                            write!(f, "-{:#x}", -(mem.displacement as i64))?;
                        }
                    } else {
                        write!(f, "{:#x}", mem.displacement)?;
                    }
                }

                write!(f, "]")
            }
            Self::Relative { offset } => {
                if *offset >= 0 {
                    write!(f, "$+{:#x}", offset)
                } else {
                    write!(f, "$-{:#x}", -(*offset as i64))
                }
            }
            Self::FarPointer { segment, offset } => {
                write!(f, "{:#06x}:{:#06x}", segment, offset)
            }
        }
    }
}
