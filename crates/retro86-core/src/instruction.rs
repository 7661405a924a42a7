//! Decoded instruction representation.

use crate::Operand;

/// A decoded instruction.
///
/// Created fresh by every decode call and owned by the caller. The
/// decoder never returns a partial instruction: on failure the caller
/// gets an error and no `Instruction` at all.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// The operation mnemonic.
    pub operation: Operation,
    /// Operands in encoding order (0 to 4 of them).
    pub operands: Vec<Operand>,
    /// Total encoded length in bytes, prefixes included.
    pub length: usize,
}

impl Instruction {
    /// Creates an instruction with no operands.
    pub fn new(operation: Operation, length: usize) -> Self {
        Self {
            operation,
            operands: Vec::new(),
            length,
        }
    }

    /// Returns the mnemonic string.
    pub fn mnemonic(&self) -> &'static str {
        self.operation.mnemonic()
    }
}

/// Operation mnemonics for the one-byte opcode map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    // Arithmetic
    Add,
    Adc,
    Sub,
    Sbb,
    Cmp,
    Inc,
    Dec,
    Neg,
    Mul,
    Imul,
    Div,
    Idiv,

    // Logical
    And,
    Or,
    Xor,
    Not,
    Test,

    // Shifts and rotates
    Rol,
    Ror,
    Rcl,
    Rcr,
    Shl,
    Shr,
    Sar,

    // Data movement
    Mov,
    Xchg,
    Lea,
    Les,
    Lds,
    Push,
    Pop,
    Pusha,
    Popa,
    Pushf,
    Popf,
    In,
    Out,
    Xlat,

    // BCD adjustments
    Daa,
    Das,
    Aaa,
    Aas,
    Aam,
    Aad,

    // Width conversions and flags
    Cbw,
    Cwd,
    Sahf,
    Lahf,
    Cmc,
    Clc,
    Stc,
    Cli,
    Sti,
    Cld,
    Std,

    // String operations
    Movs,
    Cmps,
    Stos,
    Lods,
    Scas,
    Ins,
    Outs,

    // Conditional jumps
    Jo,
    Jno,
    Jb,
    Jnb,
    Je,
    Jne,
    Jbe,
    Jnbe,
    Js,
    Jns,
    Jp,
    Jnp,
    Jl,
    Jnl,
    Jle,
    Jnle,
    Jcxz,

    // Loops
    Loop,
    Loope,
    Loopne,

    // Calls, jumps, returns
    Call,
    CallNear,
    CallFar,
    Jmp,
    JmpNear,
    JmpFar,
    RetNear,
    RetFar,
    Enter,
    Leave,
    Int,
    Into,
    Iret,

    // Protected-mode and system
    Bound,
    Arpl,
    Hlt,
    Fwait,
    Nop,

    // Transactional memory (C6/C7 reg=7 carve-outs)
    Xabort,
    Xbegin,
}

impl Operation {
    /// Returns the Intel mnemonic for this operation.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Adc => "adc",
            Self::Sub => "sub",
            Self::Sbb => "sbb",
            Self::Cmp => "cmp",
            Self::Inc => "inc",
            Self::Dec => "dec",
            Self::Neg => "neg",
            Self::Mul => "mul",
            Self::Imul => "imul",
            Self::Div => "div",
            Self::Idiv => "idiv",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Not => "not",
            Self::Test => "test",
            Self::Rol => "rol",
            Self::Ror => "ror",
            Self::Rcl => "rcl",
            Self::Rcr => "rcr",
            Self::Shl => "shl",
            Self::Shr => "shr",
            Self::Sar => "sar",
            Self::Mov => "mov",
            Self::Xchg => "xchg",
            Self::Lea => "lea",
            Self::Les => "les",
            Self::Lds => "lds",
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Pusha => "pusha",
            Self::Popa => "popa",
            Self::Pushf => "pushf",
            Self::Popf => "popf",
            Self::In => "in",
            Self::Out => "out",
            Self::Xlat => "xlat",
            Self::Daa => "daa",
            Self::Das => "das",
            Self::Aaa => "aaa",
            Self::Aas => "aas",
            Self::Aam => "aam",
            Self::Aad => "aad",
            Self::Cbw => "cbw",
            Self::Cwd => "cwd",
            Self::Sahf => "sahf",
            Self::Lahf => "lahf",
            Self::Cmc => "cmc",
            Self::Clc => "clc",
            Self::Stc => "stc",
            Self::Cli => "cli",
            Self::Sti => "sti",
            Self::Cld => "cld",
            Self::Std => "std",
            Self::Movs => "movs",
            Self::Cmps => "cmps",
            Self::Stos => "stos",
            Self::Lods => "lods",
            Self::Scas => "scas",
            Self::Ins => "ins",
            Self::Outs => "outs",
            Self::Jo => "jo",
            Self::Jno => "jno",
            Self::Jb => "jb",
            Self::Jnb => "jnb",
            Self::Je => "je",
            Self::Jne => "jne",
            Self::Jbe => "jbe",
            Self::Jnbe => "jnbe",
            Self::Js => "js",
            Self::Jns => "jns",
            Self::Jp => "jp",
            Self::Jnp => "jnp",
            Self::Jl => "jl",
            Self::Jnl => "jnl",
            Self::Jle => "jle",
            Self::Jnle => "jnle",
            Self::Jcxz => "jcxz",
            Self::Loop => "loop",
            Self::Loope => "loope",
            Self::Loopne => "loopne",
            Self::Call => "call",
            Self::CallNear => "calln",
            Self::CallFar => "callf",
            Self::Jmp => "jmp",
            Self::JmpNear => "jmpn",
            Self::JmpFar => "jmpf",
            Self::RetNear => "retn",
            Self::RetFar => "retf",
            Self::Enter => "enter",
            Self::Leave => "leave",
            Self::Int => "int",
            Self::Into => "into",
            Self::Iret => "iret",
            Self::Bound => "bound",
            Self::Arpl => "arpl",
            Self::Hlt => "hlt",
            Self::Fwait => "fwait",
            Self::Nop => "nop",
            Self::Xabort => "xabort",
            Self::Xbegin => "xbegin",
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())?;
        for (i, op) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}", op)?;
        }
        Ok(())
    }
}
