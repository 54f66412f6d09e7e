use crate::bil::Width;
use crate::{Result, TranslateError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest operand name REIL consumers accept. Construction rejects longer
/// names outright; truncating them can silently collide two operands.
pub const MAX_OPERAND_NAME_LEN: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    None,
    /// Conditional jump.
    Jcc,
    /// Store value to register.
    Str,
    /// Store value to memory.
    Stm,
    /// Load value from memory.
    Ldm,
    Add,
    Sub,
    Neg,
    Mul,
    Div,
    Mod,
    Smul,
    Sdiv,
    Smod,
    Shl,
    Shr,
    Rol,
    Ror,
    And,
    Or,
    Xor,
    Not,
    /// Logical and.
    Band,
    /// Logical or.
    Bor,
    /// Logical xor.
    Bxor,
    /// Logical not.
    Bnot,
    Eq,
    /// Less than.
    L,
    /// Less or equal.
    Le,
    /// Signed less than.
    Sl,
    /// Signed less or equal.
    Sle,
    /// Low half of the integer.
    CastLo,
    /// High half of the integer.
    CastHi,
    /// Cast to an unsigned value of bigger size.
    CastU,
    /// Cast with the sign bit.
    CastS,
}

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::None => "NONE",
            Opcode::Jcc => "JCC",
            Opcode::Str => "STR",
            Opcode::Stm => "STM",
            Opcode::Ldm => "LDM",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Neg => "NEG",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::Smul => "SMUL",
            Opcode::Sdiv => "SDIV",
            Opcode::Smod => "SMOD",
            Opcode::Shl => "SHL",
            Opcode::Shr => "SHR",
            Opcode::Rol => "ROL",
            Opcode::Ror => "ROR",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Not => "NOT",
            Opcode::Band => "BAND",
            Opcode::Bor => "BOR",
            Opcode::Bxor => "BXOR",
            Opcode::Bnot => "BNOT",
            Opcode::Eq => "EQ",
            Opcode::L => "L",
            Opcode::Le => "LE",
            Opcode::Sl => "SL",
            Opcode::Sle => "SLE",
            Opcode::CastLo => "CAST_LO",
            Opcode::CastHi => "CAST_HI",
            Opcode::CastU => "CAST_U",
            Opcode::CastS => "CAST_S",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    None,
    Register { name: String, width: Width },
    Temporary { name: String, width: Width },
    Constant { value: u64, width: Width },
}

impl Operand {
    pub fn register(name: impl Into<String>, width: Width) -> Result<Operand> {
        let name = checked_name(name.into())?;
        Ok(Operand::Register { name, width })
    }

    pub fn temporary(name: impl Into<String>, width: Width) -> Result<Operand> {
        let name = checked_name(name.into())?;
        Ok(Operand::Temporary { name, width })
    }

    pub fn constant(value: u64, width: Width) -> Operand {
        Operand::Constant { value, width }
    }

}

fn checked_name(name: String) -> Result<String> {
    if name.len() > MAX_OPERAND_NAME_LEN {
        return Err(TranslateError::OperandNameTooLong(name));
    }
    Ok(name)
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => write!(f, " "),
            Operand::Register { name, width } | Operand::Temporary { name, width } => {
                write!(f, "({}, {})", name, width)
            }
            Operand::Constant { value, width } => {
                // 1-bit constants print as zero/nonzero, not the masked bit.
                let value = match width {
                    Width::W1 => u64::from(*value != 0),
                    _ => value & width.mask(),
                };
                write!(f, "({}, {})", value, width)
            }
        }
    }
}

/// One flat REIL instruction: the originating instruction address, the
/// sub-instruction number within the block, an opcode, and up to three
/// operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub addr: u64,
    pub inum: u16,
    pub op: Opcode,
    pub a: Operand,
    pub b: Operand,
    pub c: Operand,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}.{:02x} {:>7} {:>16}, {:>16}, {:>16}",
            self.addr,
            self.inum,
            self.op.to_string(),
            self.a.to_string(),
            self.b.to_string(),
            self.c.to_string(),
        )
    }
}
