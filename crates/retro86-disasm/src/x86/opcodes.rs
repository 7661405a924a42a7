//! The one-byte opcode map and its extension groups.
//!
//! Tables are plain `const`-built statics so every row is readable in
//! the source; the decoder pays one array index per lookup and no
//! unpacking cost.

#![allow(non_camel_case_types)]

use super::modrm::ModRM;
use retro86_core::Operation;

/// Operand decoding descriptor, following Intel's opcode-map operand
/// notation: an addressing-method letter plus an operand-size letter
/// (`Eb` = ModR/M r/m byte-sized, `Gv` = ModR/M reg word-sized, `Iz` =
/// 16/32-bit immediate, ...), or a fixed register/constant operand.
///
/// The enum is closed: the operand resolver matches it exhaustively,
/// so adding a descriptor without a decoding path is a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSpec {
    /// Direct far pointer encoded in the instruction (offset, then segment).
    Ap,
    /// ModR/M r/m, byte.
    Eb,
    /// ModR/M r/m, far pointer in memory or register error.
    Ep,
    /// ModR/M r/m, operand-size width.
    Ev,
    /// ModR/M r/m, word regardless of operand size.
    Ew,
    /// Flags register at operand-size width. No decoding path yet.
    Fv,
    /// ModR/M reg, byte.
    Gb,
    /// ModR/M reg, operand-size width.
    Gv,
    /// ModR/M reg, word.
    Gw,
    /// ModR/M reg, 16 or 32 bits by operand size.
    Gz,
    /// Byte immediate.
    Ib,
    /// Immediate at operand-size width.
    Iv,
    /// Word immediate regardless of operand size.
    Iw,
    /// 16/32-bit immediate by operand size.
    Iz,
    /// Byte relative branch offset.
    Jb,
    /// 16/32-bit relative branch offset by operand size.
    Jz,
    /// Memory pair of bounds (BOUND). No decoding path yet.
    Ma,
    /// Memory-only far pointer.
    Mp,
    /// Direct memory offset, byte access.
    Ob,
    /// Direct memory offset, operand-size access.
    Ov,
    /// ModR/M reg as a segment register.
    Sw,
    /// String source ds:[si], byte.
    Xb,
    /// String source ds:[si], operand-size width.
    Xv,
    /// String source ds:[si], 16/32 bits by operand size.
    Xz,
    /// String destination es:[di], byte.
    Yb,
    /// String destination es:[di], operand-size width.
    Yv,
    /// String destination es:[di], 16/32 bits by operand size.
    Yz,

    // Constant operands baked into the opcode.
    Imm1,
    Imm3,

    // Fixed registers.
    ES,
    CS,
    SS,
    DS,
    AL,
    CL,
    DL,
    BL,
    AH,
    CH,
    DH,
    BH,
    /// Fixed 16/32-bit accumulator family register, width by operand size.
    eAX,
    eCX,
    eDX,
    eBX,
    eSP,
    eBP,
    eSI,
    eDI,
    /// Fixed full-width register family, width by operand size.
    rAX,
    rCX,
    rDX,
    rBX,
    rSP,
    rBP,
    rSI,
    rDI,
    DX,
}

/// Extension groups reachable from the one-byte map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// 80-83: ADD/OR/ADC/SBB/AND/SUB/XOR/CMP.
    Group1,
    /// 8F: POP.
    Group1A,
    /// C0/C1/D0-D3: shifts and rotates.
    Group2,
    /// F6/F7: TEST/NOT/NEG/MUL/IMUL/DIV/IDIV.
    Group3,
    /// FE: INC/DEC byte.
    Group4,
    /// FF: INC/DEC/CALL/JMP/PUSH word.
    Group5,
    /// C6/C7: MOV immediate, plus the XABORT/XBEGIN carve-outs.
    Group11,
}

/// What an opcode byte resolves to before the ModR/M byte is seen.
#[derive(Debug, Clone, Copy)]
pub enum Code {
    /// A concrete operation.
    Op(Operation),
    /// An extension group; the ModR/M REG field picks the operation.
    Ext(Group),
}

/// One row of the opcode map.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeEntry {
    pub code: Code,
    pub operands: &'static [OperandSpec],
}

/// One row of an extension sub-table. An empty operand list means the
/// base opcode row's operands apply.
#[derive(Debug, Clone, Copy)]
pub struct ExtEntry {
    pub operation: Operation,
    pub operands: &'static [OperandSpec],
}

const fn op(operation: Operation, operands: &'static [OperandSpec]) -> Option<OpcodeEntry> {
    Some(OpcodeEntry {
        code: Code::Op(operation),
        operands,
    })
}

const fn ext(group: Group, operands: &'static [OperandSpec]) -> Option<OpcodeEntry> {
    Some(OpcodeEntry {
        code: Code::Ext(group),
        operands,
    })
}

const fn ent(operation: Operation, operands: &'static [OperandSpec]) -> Option<ExtEntry> {
    Some(ExtEntry {
        operation,
        operands,
    })
}

/// The one-byte opcode map. `None` rows are prefix bytes, the 0x0F
/// two-byte escape, the 0xD8-0xDF x87 escapes, and permanently
/// reserved bytes; none of them decodes to an operation here.
pub static OPCODE_TABLE: [Option<OpcodeEntry>; 256] = {
    use OperandSpec::*;
    use Operation as Op;

    let mut t: [Option<OpcodeEntry>; 256] = [None; 256];

    t[0x00] = op(Op::Add, &[Eb, Gb]);
    t[0x01] = op(Op::Add, &[Ev, Gv]);
    t[0x02] = op(Op::Add, &[Gb, Eb]);
    t[0x03] = op(Op::Add, &[Gv, Ev]);
    t[0x04] = op(Op::Add, &[AL, Ib]);
    t[0x05] = op(Op::Add, &[rAX, Iz]);
    t[0x06] = op(Op::Push, &[ES]);
    t[0x07] = op(Op::Pop, &[ES]);
    t[0x08] = op(Op::Or, &[Eb, Gb]);
    t[0x09] = op(Op::Or, &[Ev, Gv]);
    t[0x0A] = op(Op::Or, &[Gb, Eb]);
    t[0x0B] = op(Op::Or, &[Gv, Ev]);
    t[0x0C] = op(Op::Or, &[AL, Ib]);
    t[0x0D] = op(Op::Or, &[rAX, Iz]);
    t[0x0E] = op(Op::Push, &[CS]);
    // 0x0F: two-byte escape, not implemented

    t[0x10] = op(Op::Adc, &[Eb, Gb]);
    t[0x11] = op(Op::Adc, &[Ev, Gv]);
    t[0x12] = op(Op::Adc, &[Gb, Eb]);
    t[0x13] = op(Op::Adc, &[Gv, Ev]);
    t[0x14] = op(Op::Adc, &[AL, Ib]);
    t[0x15] = op(Op::Adc, &[rAX, Iz]);
    t[0x16] = op(Op::Push, &[SS]);
    t[0x17] = op(Op::Pop, &[SS]);
    t[0x18] = op(Op::Sbb, &[Eb, Gb]);
    t[0x19] = op(Op::Sbb, &[Ev, Gv]);
    t[0x1A] = op(Op::Sbb, &[Gb, Eb]);
    t[0x1B] = op(Op::Sbb, &[Gv, Ev]);
    t[0x1C] = op(Op::Sbb, &[AL, Ib]);
    t[0x1D] = op(Op::Sbb, &[rAX, Iz]);
    t[0x1E] = op(Op::Push, &[DS]);
    t[0x1F] = op(Op::Pop, &[DS]);

    t[0x20] = op(Op::And, &[Eb, Gb]);
    t[0x21] = op(Op::And, &[Ev, Gv]);
    t[0x22] = op(Op::And, &[Gb, Eb]);
    t[0x23] = op(Op::And, &[Gv, Ev]);
    t[0x24] = op(Op::And, &[AL, Ib]);
    t[0x25] = op(Op::And, &[rAX, Iz]);
    // 0x26: ES segment prefix
    t[0x27] = op(Op::Daa, &[]);
    t[0x28] = op(Op::Sub, &[Eb, Gb]);
    t[0x29] = op(Op::Sub, &[Ev, Gv]);
    t[0x2A] = op(Op::Sub, &[Gb, Eb]);
    t[0x2B] = op(Op::Sub, &[Gv, Ev]);
    t[0x2C] = op(Op::Sub, &[AL, Ib]);
    t[0x2D] = op(Op::Sub, &[rAX, Iz]);
    // 0x2E: CS segment prefix
    t[0x2F] = op(Op::Das, &[]);

    t[0x30] = op(Op::Xor, &[Eb, Gb]);
    t[0x31] = op(Op::Xor, &[Ev, Gv]);
    t[0x32] = op(Op::Xor, &[Gb, Eb]);
    t[0x33] = op(Op::Xor, &[Gv, Ev]);
    t[0x34] = op(Op::Xor, &[AL, Ib]);
    t[0x35] = op(Op::Xor, &[rAX, Iz]);
    // 0x36: SS segment prefix
    t[0x37] = op(Op::Aaa, &[]);
    t[0x38] = op(Op::Cmp, &[Eb, Gb]);
    t[0x39] = op(Op::Cmp, &[Ev, Gv]);
    t[0x3A] = op(Op::Cmp, &[Gb, Eb]);
    t[0x3B] = op(Op::Cmp, &[Gv, Ev]);
    t[0x3C] = op(Op::Cmp, &[AL, Ib]);
    t[0x3D] = op(Op::Cmp, &[rAX, Iz]);
    // 0x3E: DS segment prefix
    t[0x3F] = op(Op::Aas, &[]);

    t[0x40] = op(Op::Inc, &[eAX]);
    t[0x41] = op(Op::Inc, &[eCX]);
    t[0x42] = op(Op::Inc, &[eDX]);
    t[0x43] = op(Op::Inc, &[eBX]);
    t[0x44] = op(Op::Inc, &[eSP]);
    t[0x45] = op(Op::Inc, &[eBP]);
    t[0x46] = op(Op::Inc, &[eSI]);
    t[0x47] = op(Op::Inc, &[eDI]);
    t[0x48] = op(Op::Dec, &[eAX]);
    t[0x49] = op(Op::Dec, &[eCX]);
    t[0x4A] = op(Op::Dec, &[eDX]);
    t[0x4B] = op(Op::Dec, &[eBX]);
    t[0x4C] = op(Op::Dec, &[eSP]);
    t[0x4D] = op(Op::Dec, &[eBP]);
    t[0x4E] = op(Op::Dec, &[eSI]);
    t[0x4F] = op(Op::Dec, &[eDI]);

    t[0x50] = op(Op::Push, &[rAX]);
    t[0x51] = op(Op::Push, &[rCX]);
    t[0x52] = op(Op::Push, &[rDX]);
    t[0x53] = op(Op::Push, &[rBX]);
    t[0x54] = op(Op::Push, &[rSP]);
    t[0x55] = op(Op::Push, &[rBP]);
    t[0x56] = op(Op::Push, &[rSI]);
    t[0x57] = op(Op::Push, &[rDI]);
    t[0x58] = op(Op::Pop, &[rAX]);
    t[0x59] = op(Op::Pop, &[rCX]);
    t[0x5A] = op(Op::Pop, &[rDX]);
    t[0x5B] = op(Op::Pop, &[rBX]);
    t[0x5C] = op(Op::Pop, &[rSP]);
    t[0x5D] = op(Op::Pop, &[rBP]);
    t[0x5E] = op(Op::Pop, &[rSI]);
    t[0x5F] = op(Op::Pop, &[rDI]);

    t[0x60] = op(Op::Pusha, &[]);
    t[0x61] = op(Op::Popa, &[]);
    t[0x62] = op(Op::Bound, &[Gv, Ma]);
    t[0x63] = op(Op::Arpl, &[Ew, Gw]);
    // 0x64-0x67: FS/GS segment, operand-size, address-size prefixes
    t[0x68] = op(Op::Push, &[Iz]);
    t[0x69] = op(Op::Imul, &[Gv, Ev, Iz]);
    t[0x6A] = op(Op::Push, &[Ib]);
    t[0x6B] = op(Op::Imul, &[Gv, Ev, Ib]);
    t[0x6C] = op(Op::Ins, &[Yb, DX]);
    t[0x6D] = op(Op::Ins, &[Yz, DX]);
    t[0x6E] = op(Op::Outs, &[DX, Xb]);
    t[0x6F] = op(Op::Outs, &[DX, Xz]);

    t[0x70] = op(Op::Jo, &[Jb]);
    t[0x71] = op(Op::Jno, &[Jb]);
    t[0x72] = op(Op::Jb, &[Jb]);
    t[0x73] = op(Op::Jnb, &[Jb]);
    t[0x74] = op(Op::Je, &[Jb]);
    t[0x75] = op(Op::Jne, &[Jb]);
    t[0x76] = op(Op::Jbe, &[Jb]);
    t[0x77] = op(Op::Jnbe, &[Jb]);
    t[0x78] = op(Op::Js, &[Jb]);
    t[0x79] = op(Op::Jns, &[Jb]);
    t[0x7A] = op(Op::Jp, &[Jb]);
    t[0x7B] = op(Op::Jnp, &[Jb]);
    t[0x7C] = op(Op::Jl, &[Jb]);
    t[0x7D] = op(Op::Jnl, &[Jb]);
    t[0x7E] = op(Op::Jle, &[Jb]);
    t[0x7F] = op(Op::Jnle, &[Jb]);

    t[0x80] = ext(Group::Group1, &[Eb, Ib]);
    t[0x81] = ext(Group::Group1, &[Ev, Iz]);
    t[0x82] = ext(Group::Group1, &[Eb, Ib]);
    t[0x83] = ext(Group::Group1, &[Ev, Ib]);
    t[0x84] = op(Op::Test, &[Eb, Gb]);
    t[0x85] = op(Op::Test, &[Ev, Gv]);
    t[0x86] = op(Op::Xchg, &[Eb, Gb]);
    t[0x87] = op(Op::Xchg, &[Ev, Gv]);
    t[0x88] = op(Op::Mov, &[Eb, Gb]);
    t[0x89] = op(Op::Mov, &[Ev, Gv]);
    t[0x8A] = op(Op::Mov, &[Gb, Eb]);
    t[0x8B] = op(Op::Mov, &[Gv, Ev]);
    t[0x8C] = op(Op::Mov, &[Ev, Sw]);
    t[0x8D] = op(Op::Lea, &[Gv, Mp]);
    t[0x8E] = op(Op::Mov, &[Sw, Ew]);
    t[0x8F] = ext(Group::Group1A, &[]);

    t[0x90] = op(Op::Nop, &[]);
    t[0x91] = op(Op::Xchg, &[rCX, rAX]);
    t[0x92] = op(Op::Xchg, &[rDX, rAX]);
    t[0x93] = op(Op::Xchg, &[rBX, rAX]);
    t[0x94] = op(Op::Xchg, &[rSP, rAX]);
    t[0x95] = op(Op::Xchg, &[rBP, rAX]);
    t[0x96] = op(Op::Xchg, &[rSI, rAX]);
    t[0x97] = op(Op::Xchg, &[rDI, rAX]);
    t[0x98] = op(Op::Cbw, &[]);
    t[0x99] = op(Op::Cwd, &[]);
    t[0x9A] = op(Op::CallFar, &[Ap]);
    t[0x9B] = op(Op::Fwait, &[]);
    t[0x9C] = op(Op::Pushf, &[Fv]);
    t[0x9D] = op(Op::Popf, &[Fv]);
    t[0x9E] = op(Op::Sahf, &[]);
    t[0x9F] = op(Op::Lahf, &[]);

    t[0xA0] = op(Op::Mov, &[AL, Ob]);
    t[0xA1] = op(Op::Mov, &[rAX, Ov]);
    t[0xA2] = op(Op::Mov, &[Ob, AL]);
    t[0xA3] = op(Op::Mov, &[Ov, rAX]);
    t[0xA4] = op(Op::Movs, &[Yb, Xb]);
    t[0xA5] = op(Op::Movs, &[Yv, Xv]);
    t[0xA6] = op(Op::Cmps, &[Xb, Yb]);
    t[0xA7] = op(Op::Cmps, &[Xv, Yv]);
    t[0xA8] = op(Op::Test, &[AL, Ib]);
    t[0xA9] = op(Op::Test, &[rAX, Iz]);
    t[0xAA] = op(Op::Stos, &[Yb, AL]);
    t[0xAB] = op(Op::Stos, &[Yv, rAX]);
    t[0xAC] = op(Op::Lods, &[AL, Xb]);
    t[0xAD] = op(Op::Lods, &[rAX, Xv]);
    t[0xAE] = op(Op::Scas, &[AL, Yb]);
    t[0xAF] = op(Op::Scas, &[rAX, Xv]);

    t[0xB0] = op(Op::Mov, &[AL, Ib]);
    t[0xB1] = op(Op::Mov, &[CL, Ib]);
    t[0xB2] = op(Op::Mov, &[DL, Ib]);
    t[0xB3] = op(Op::Mov, &[BL, Ib]);
    t[0xB4] = op(Op::Mov, &[AH, Ib]);
    t[0xB5] = op(Op::Mov, &[CH, Ib]);
    t[0xB6] = op(Op::Mov, &[DH, Ib]);
    t[0xB7] = op(Op::Mov, &[BH, Ib]);
    t[0xB8] = op(Op::Mov, &[rAX, Iv]);
    t[0xB9] = op(Op::Mov, &[rCX, Iv]);
    t[0xBA] = op(Op::Mov, &[rDX, Iv]);
    t[0xBB] = op(Op::Mov, &[rBX, Iv]);
    t[0xBC] = op(Op::Mov, &[rSP, Iv]);
    t[0xBD] = op(Op::Mov, &[rBP, Iv]);
    t[0xBE] = op(Op::Mov, &[rSI, Iv]);
    t[0xBF] = op(Op::Mov, &[rDI, Iv]);

    t[0xC0] = ext(Group::Group2, &[Eb, Ib]);
    t[0xC1] = ext(Group::Group2, &[Ev, Ib]);
    t[0xC2] = op(Op::RetNear, &[Iw]);
    t[0xC3] = op(Op::RetNear, &[]);
    t[0xC4] = op(Op::Les, &[Gz, Mp]);
    t[0xC5] = op(Op::Lds, &[Gz, Mp]);
    t[0xC6] = ext(Group::Group11, &[Eb, Ib]);
    t[0xC7] = ext(Group::Group11, &[Ev, Iz]);
    t[0xC8] = op(Op::Enter, &[Iw, Ib]);
    t[0xC9] = op(Op::Leave, &[]);
    t[0xCA] = op(Op::RetFar, &[Iw]);
    t[0xCB] = op(Op::RetFar, &[]);
    t[0xCC] = op(Op::Int, &[Imm3]);
    t[0xCD] = op(Op::Int, &[Ib]);
    t[0xCE] = op(Op::Into, &[]);
    t[0xCF] = op(Op::Iret, &[]);

    t[0xD0] = ext(Group::Group2, &[Eb, Imm1]);
    t[0xD1] = ext(Group::Group2, &[Ev, Imm1]);
    t[0xD2] = ext(Group::Group2, &[Eb, CL]);
    t[0xD3] = ext(Group::Group2, &[Ev, CL]);
    t[0xD4] = op(Op::Aam, &[Ib]);
    t[0xD5] = op(Op::Aad, &[Ib]);
    // 0xD6: reserved
    t[0xD7] = op(Op::Xlat, &[]);
    // 0xD8-0xDF: x87 escapes, not implemented

    t[0xE0] = op(Op::Loopne, &[Jb]);
    t[0xE1] = op(Op::Loope, &[Jb]);
    t[0xE2] = op(Op::Loop, &[Jb]);
    t[0xE3] = op(Op::Jcxz, &[Jb]);
    t[0xE4] = op(Op::In, &[AL, Ib]);
    t[0xE5] = op(Op::In, &[eAX, Ib]);
    t[0xE6] = op(Op::Out, &[Ib, AL]);
    t[0xE7] = op(Op::Out, &[Ib, eAX]);
    t[0xE8] = op(Op::Call, &[Jz]);
    t[0xE9] = op(Op::Jmp, &[Jz]);
    t[0xEA] = op(Op::Jmp, &[Ap]);
    t[0xEB] = op(Op::Jmp, &[Jb]);
    t[0xEC] = op(Op::In, &[AL, DX]);
    t[0xED] = op(Op::In, &[eAX, DX]);
    t[0xEE] = op(Op::Out, &[DX, AL]);
    t[0xEF] = op(Op::Out, &[DX, eAX]);

    // 0xF0-0xF3: lock/rep prefixes and the reserved 0xF1
    t[0xF4] = op(Op::Hlt, &[]);
    t[0xF5] = op(Op::Cmc, &[]);
    t[0xF6] = ext(Group::Group3, &[Eb]);
    t[0xF7] = ext(Group::Group3, &[Ev]);
    t[0xF8] = op(Op::Clc, &[]);
    t[0xF9] = op(Op::Stc, &[]);
    t[0xFA] = op(Op::Cli, &[]);
    t[0xFB] = op(Op::Sti, &[]);
    t[0xFC] = op(Op::Cld, &[]);
    t[0xFD] = op(Op::Std, &[]);
    t[0xFE] = ext(Group::Group4, &[]);
    t[0xFF] = ext(Group::Group5, &[]);

    t
};

/// 80-83: operation from REG, operands from the base row.
static GROUP1_OPS: [Option<ExtEntry>; 8] = [
    ent(Operation::Add, &[]),
    ent(Operation::Or, &[]),
    ent(Operation::Adc, &[]),
    ent(Operation::Sbb, &[]),
    ent(Operation::And, &[]),
    ent(Operation::Sub, &[]),
    ent(Operation::Xor, &[]),
    ent(Operation::Cmp, &[]),
];

/// 8F: only REG=0 is defined.
static GROUP1A_OPS: [Option<ExtEntry>; 8] = {
    use OperandSpec::*;
    [
        ent(Operation::Pop, &[Ev]),
        None,
        None,
        None,
        None,
        None,
        None,
        None,
    ]
};

/// C0/C1/D0-D3: REG=6 is undefined.
static GROUP2_OPS: [Option<ExtEntry>; 8] = [
    ent(Operation::Rol, &[]),
    ent(Operation::Ror, &[]),
    ent(Operation::Rcl, &[]),
    ent(Operation::Rcr, &[]),
    ent(Operation::Shl, &[]),
    ent(Operation::Shr, &[]),
    None,
    ent(Operation::Sar, &[]),
];

/// F6: TEST takes an extra immediate, the multiplies and divides an
/// implicit accumulator. REG=1 is undefined.
static GROUP3_BYTE_OPS: [Option<ExtEntry>; 8] = {
    use OperandSpec::*;
    [
        ent(Operation::Test, &[Eb, Ib]),
        None,
        ent(Operation::Not, &[Eb]),
        ent(Operation::Neg, &[Eb]),
        ent(Operation::Mul, &[Eb, AL]),
        ent(Operation::Imul, &[Eb, AL]),
        ent(Operation::Div, &[Eb, AL]),
        ent(Operation::Idiv, &[Eb, AL]),
    ]
};

/// F7: word-sized forms of group 3.
static GROUP3_WORD_OPS: [Option<ExtEntry>; 8] = {
    use OperandSpec::*;
    [
        ent(Operation::Test, &[Ev, Iz]),
        None,
        ent(Operation::Not, &[Ev]),
        ent(Operation::Neg, &[Ev]),
        ent(Operation::Mul, &[Ev, rAX]),
        ent(Operation::Imul, &[Ev, rAX]),
        ent(Operation::Div, &[Ev, rAX]),
        ent(Operation::Idiv, &[Ev, rAX]),
    ]
};

/// FE: only INC/DEC.
static GROUP4_OPS: [Option<ExtEntry>; 8] = {
    use OperandSpec::*;
    [
        ent(Operation::Inc, &[Eb]),
        ent(Operation::Dec, &[Eb]),
        None,
        None,
        None,
        None,
        None,
        None,
    ]
};

/// FF: REG=7 is undefined. The far forms (REG=3, 5) require memory
/// operands.
static GROUP5_OPS: [Option<ExtEntry>; 8] = {
    use OperandSpec::*;
    [
        ent(Operation::Inc, &[Ev]),
        ent(Operation::Dec, &[Ev]),
        ent(Operation::CallNear, &[Ev]),
        ent(Operation::CallFar, &[Ep]),
        ent(Operation::JmpNear, &[Ev]),
        ent(Operation::JmpFar, &[Mp]),
        ent(Operation::Push, &[Ev]),
        None,
    ]
};

/// Resolves an extension group against the ModR/M byte.
///
/// Returns the operation and its operand descriptors, or `None` when
/// the REG (and, for group 11, MOD/RM) combination is undefined. A
/// non-empty operand list replaces the base opcode row's list
/// entirely; an empty one defers to it.
pub fn resolve_extension(
    group: Group,
    opcode: u8,
    modrm: ModRM,
) -> Option<(Operation, &'static [OperandSpec])> {
    let reg = modrm.reg as usize;
    let entry = match group {
        Group::Group1 => &GROUP1_OPS[reg],
        Group::Group1A => &GROUP1A_OPS[reg],
        Group::Group2 => &GROUP2_OPS[reg],
        Group::Group3 => {
            if opcode == 0xF6 {
                &GROUP3_BYTE_OPS[reg]
            } else {
                &GROUP3_WORD_OPS[reg]
            }
        }
        Group::Group4 => &GROUP4_OPS[reg],
        Group::Group5 => &GROUP5_OPS[reg],
        Group::Group11 => return resolve_group11(opcode, modrm),
    };
    entry.as_ref().map(|e| (e.operation, e.operands))
}

/// C6/C7 is MOV for REG=0. REG=7 with MOD=3, RM=0 is the XABORT /
/// XBEGIN carve-out; every other combination is undefined.
fn resolve_group11(opcode: u8, modrm: ModRM) -> Option<(Operation, &'static [OperandSpec])> {
    match (modrm.reg, modrm.mod_, modrm.rm) {
        (0, _, _) => Some((Operation::Mov, &[])),
        (7, 3, 0) if opcode == 0xC6 => Some((Operation::Xabort, &[OperandSpec::Ib])),
        (7, 3, 0) if opcode == 0xC7 => Some((Operation::Xbegin, &[OperandSpec::Jz])),
        _ => None,
    }
}
