//! Instruction word format and disassembly.
//!
//! Instructions are 32-bit words:
//!
//! ```text
//! | opcode 31..26 | A 25..18 | B 17..9 | C 8..0 |
//! |               |          |      Bx 17..0    |
//! ```
//!
//! B and C are register/constant operands: bit 8 set selects the constant
//! table. Bx is an 18-bit unsigned field; sBx is the same field
//! sign-extended.

use std::fmt::Write as _;

/// Register/constant selector bit of a B or C operand.
pub const OPERAND_K: u32 = 0x100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Add = 0,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Le,
    Eq,
    Ne,
    Gt,
    Ge,
    Range,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Neg,
    Flip,
    LdNil,
    LdBool,
    LdInt,
    LdConst,
    Move,
    GetGbl,
    SetGbl,
    GetNGbl,
    SetNGbl,
    GetMbr,
    GetMet,
    SetMbr,
    GetIdx,
    SetIdx,
    SetSuper,
    GetUpv,
    SetUpv,
    Close,
    Jmp,
    JmpT,
    JmpF,
    Call,
    Ret,
    Closure,
    Class,
    Import,
    Catch,
    Raise,
    ExBlk,
    End,
}

const OPCODES: [Opcode; 49] = [
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Mod,
    Opcode::Lt,
    Opcode::Le,
    Opcode::Eq,
    Opcode::Ne,
    Opcode::Gt,
    Opcode::Ge,
    Opcode::Range,
    Opcode::And,
    Opcode::Or,
    Opcode::Xor,
    Opcode::Shl,
    Opcode::Shr,
    Opcode::Neg,
    Opcode::Flip,
    Opcode::LdNil,
    Opcode::LdBool,
    Opcode::LdInt,
    Opcode::LdConst,
    Opcode::Move,
    Opcode::GetGbl,
    Opcode::SetGbl,
    Opcode::GetNGbl,
    Opcode::SetNGbl,
    Opcode::GetMbr,
    Opcode::GetMet,
    Opcode::SetMbr,
    Opcode::GetIdx,
    Opcode::SetIdx,
    Opcode::SetSuper,
    Opcode::GetUpv,
    Opcode::SetUpv,
    Opcode::Close,
    Opcode::Jmp,
    Opcode::JmpT,
    Opcode::JmpF,
    Opcode::Call,
    Opcode::Ret,
    Opcode::Closure,
    Opcode::Class,
    Opcode::Import,
    Opcode::Catch,
    Opcode::Raise,
    Opcode::ExBlk,
    Opcode::End,
];

impl Opcode {
    pub fn from_u8(op: u8) -> Option<Opcode> {
        OPCODES.get(op as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::Lt => "LT",
            Opcode::Le => "LE",
            Opcode::Eq => "EQ",
            Opcode::Ne => "NE",
            Opcode::Gt => "GT",
            Opcode::Ge => "GE",
            Opcode::Range => "RANGE",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Shl => "SHL",
            Opcode::Shr => "SHR",
            Opcode::Neg => "NEG",
            Opcode::Flip => "FLIP",
            Opcode::LdNil => "LDNIL",
            Opcode::LdBool => "LDBOOL",
            Opcode::LdInt => "LDINT",
            Opcode::LdConst => "LDCONST",
            Opcode::Move => "MOVE",
            Opcode::GetGbl => "GETGBL",
            Opcode::SetGbl => "SETGBL",
            Opcode::GetNGbl => "GETNGBL",
            Opcode::SetNGbl => "SETNGBL",
            Opcode::GetMbr => "GETMBR",
            Opcode::GetMet => "GETMET",
            Opcode::SetMbr => "SETMBR",
            Opcode::GetIdx => "GETIDX",
            Opcode::SetIdx => "SETIDX",
            Opcode::SetSuper => "SETSUPER",
            Opcode::GetUpv => "GETUPV",
            Opcode::SetUpv => "SETUPV",
            Opcode::Close => "CLOSE",
            Opcode::Jmp => "JMP",
            Opcode::JmpT => "JMPT",
            Opcode::JmpF => "JMPF",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Closure => "CLOSURE",
            Opcode::Class => "CLASS",
            Opcode::Import => "IMPORT",
            Opcode::Catch => "CATCH",
            Opcode::Raise => "RAISE",
            Opcode::ExBlk => "EXBLK",
            Opcode::End => "END",
        }
    }
}

pub fn iget_op(ins: u32) -> Option<Opcode> {
    Opcode::from_u8((ins >> 26) as u8)
}

pub fn iget_a(ins: u32) -> u32 {
    (ins >> 18) & 0xFF
}

pub fn iget_b(ins: u32) -> u32 {
    (ins >> 9) & 0x1FF
}

pub fn iget_c(ins: u32) -> u32 {
    ins & 0x1FF
}

pub fn iget_bx(ins: u32) -> u32 {
    ins & 0x3FFFF
}

pub fn iget_sbx(ins: u32) -> i32 {
    ((iget_bx(ins) as i32) << 14) >> 14
}

pub fn is_k(operand: u32) -> bool {
    operand & OPERAND_K != 0
}

pub fn iabc(op: Opcode, a: u32, b: u32, c: u32) -> u32 {
    ((op as u32) << 26) | ((a & 0xFF) << 18) | ((b & 0x1FF) << 9) | (c & 0x1FF)
}

pub fn iabx(op: Opcode, a: u32, bx: u32) -> u32 {
    ((op as u32) << 26) | ((a & 0xFF) << 18) | (bx & 0x3FFFF)
}

pub fn iasbx(op: Opcode, a: u32, sbx: i32) -> u32 {
    iabx(op, a, (sbx as u32) & 0x3FFFF)
}

fn rk(operand: u32) -> String {
    if is_k(operand) {
        format!("K{}", operand & 0xFF)
    } else {
        format!("R{operand}")
    }
}

/// Human-readable form of one instruction word, as it appears in code
/// comments: `  0000  GETGBL  R1 G0`.
pub fn disasm(ins: u32, pc: usize) -> String {
    use Opcode::*;

    let mut out = format!("  {pc:04}  ");
    let Some(op) = iget_op(ins) else {
        let _ = write!(out, "INVALID 0x{ins:08X}");
        return out;
    };
    let _ = write!(out, "{:<8}", op.name());

    let a = iget_a(ins);
    let b = iget_b(ins);
    let c = iget_c(ins);
    let bx = iget_bx(ins);
    let sbx = iget_sbx(ins);
    let target = |sbx: i32| (pc as i64) + 1 + sbx as i64;

    match op {
        Add | Sub | Mul | Div | Mod | Lt | Le | Eq | Ne | Gt | Ge | Range | And | Or | Xor
        | Shl | Shr | GetMbr | GetMet | SetMbr | GetIdx | SetIdx | Catch => {
            let _ = write!(out, "R{a} {} {}", rk(b), rk(c));
        }
        Neg | Flip | Move | SetSuper | GetNGbl | SetNGbl | Import => {
            let _ = write!(out, "R{a} {}", rk(b));
        }
        LdNil | Close => {
            let _ = write!(out, "R{a}");
        }
        LdBool => {
            let _ = write!(out, "R{a} {b} {c}");
        }
        LdInt => {
            let _ = write!(out, "R{a} {sbx}");
        }
        LdConst => {
            let _ = write!(out, "R{a} K{bx}");
        }
        GetGbl | SetGbl => {
            let _ = write!(out, "R{a} G{bx}");
        }
        GetUpv | SetUpv => {
            let _ = write!(out, "R{a} U{b}");
        }
        Jmp => {
            let _ = write!(out, "#{:04}", target(sbx));
        }
        JmpT | JmpF => {
            let _ = write!(out, "R{a} #{:04}", target(sbx));
        }
        Call => {
            let _ = write!(out, "R{a} {b}");
        }
        Ret => {
            let _ = write!(out, "{a} {}", rk(b));
        }
        Closure => {
            let _ = write!(out, "R{a} P{bx}");
        }
        Class => {
            let _ = write!(out, "K{bx}");
        }
        Raise => {
            let _ = write!(out, "{a} {} {}", rk(b), rk(c));
        }
        ExBlk => {
            let _ = write!(out, "{a} #{bx:04}");
        }
        End => {}
    }

    out.trim_end().to_string()
}
