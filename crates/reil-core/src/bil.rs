use crate::{Result, TranslateError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operand width in bits. The five widths are the only ones BIL and REIL
/// share; anything else coming out of a lifter is rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Width {
    W1,
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(Width::W1),
            8 => Ok(Width::W8),
            16 => Ok(Width::W16),
            32 => Ok(Width::W32),
            64 => Ok(Width::W64),
            other => Err(TranslateError::InvalidWidth(other)),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Width::W1 => 1,
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    /// Mask covering exactly this width, used to truncate constant values
    /// when they are rendered.
    pub fn mask(self) -> u64 {
        match self {
            Width::W1 => 0x1,
            Width::W8 => 0xff,
            Width::W16 => 0xffff,
            Width::W32 => 0xffff_ffff,
            Width::W64 => u64::MAX,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// What a `Temp` names. Carried explicitly instead of being re-derived
/// from name prefixes at every decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TempKind {
    /// An architecture register of the lifted machine (`R_EAX` and friends).
    Register,
    /// A temporary introduced by the lifter, subject to aliasing.
    Temporary,
    /// The reserved program-counter naming convention; passes through
    /// conversion untouched.
    ProgramCounter,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Temp {
    pub kind: TempKind,
    pub name: String,
    pub width: Width,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Const {
    pub value: u64,
    pub width: Width,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOpKind {
    Plus,
    Minus,
    Times,
    Divide,
    Mod,
    Lshift,
    Rshift,
    Arshift,
    Lrotate,
    Rrotate,
    LogicAnd,
    LogicOr,
    BitAnd,
    BitOr,
    Xor,
    Eq,
    Neq,
    Gt,
    Lt,
    Ge,
    Le,
    Sdivide,
    Smod,
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            BinOpKind::Plus => "+",
            BinOpKind::Minus => "-",
            BinOpKind::Times => "*",
            BinOpKind::Divide => "/",
            BinOpKind::Mod => "%",
            BinOpKind::Lshift => "<<",
            BinOpKind::Rshift => ">>",
            BinOpKind::Arshift => "$>>",
            BinOpKind::Lrotate => "<<|",
            BinOpKind::Rrotate => ">>|",
            BinOpKind::LogicAnd => "&&",
            BinOpKind::LogicOr => "||",
            BinOpKind::BitAnd => "&",
            BinOpKind::BitOr => "|",
            BinOpKind::Xor => "^",
            BinOpKind::Eq => "==",
            BinOpKind::Neq => "<>",
            BinOpKind::Gt => ">",
            BinOpKind::Lt => "<",
            BinOpKind::Ge => ">=",
            BinOpKind::Le => "<=",
            BinOpKind::Sdivide => "$/",
            BinOpKind::Smod => "$%",
        };
        write!(f, "{}", sym)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnOpKind {
    Neg,
    Not,
}

impl fmt::Display for UnOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOpKind::Neg => write!(f, "-"),
            UnOpKind::Not => write!(f, "~"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastKind {
    Low,
    High,
    Unsigned,
    Signed,
}

impl fmt::Display for CastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CastKind::Low => "low",
            CastKind::High => "high",
            CastKind::Unsigned => "unsigned",
            CastKind::Signed => "signed",
        };
        write!(f, "{}", name)
    }
}

/// One BIL expression node. The variant tag alone decides which fields are
/// meaningful; there is no coercion between variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exp {
    Temp(Temp),
    Const(Const),
    BinOp {
        op: BinOpKind,
        lhs: Box<Exp>,
        rhs: Box<Exp>,
    },
    UnOp {
        op: UnOpKind,
        exp: Box<Exp>,
    },
    Cast {
        kind: CastKind,
        width: Width,
        exp: Box<Exp>,
    },
    /// A memory read at a computed address.
    Mem { addr: Box<Exp> },
    /// A symbolic jump target.
    Name(String),
    /// A jump target relative to the current instruction address,
    /// rendered `$+offset`.
    Relative { width: Width, offset: u64 },
}

impl Exp {
    pub fn reg(name: impl Into<String>, width: Width) -> Exp {
        Exp::Temp(Temp {
            kind: TempKind::Register,
            name: name.into(),
            width,
        })
    }

    pub fn tmp(name: impl Into<String>, width: Width) -> Exp {
        Exp::Temp(Temp {
            kind: TempKind::Temporary,
            name: name.into(),
            width,
        })
    }

    pub fn pc(name: impl Into<String>, width: Width) -> Exp {
        Exp::Temp(Temp {
            kind: TempKind::ProgramCounter,
            name: name.into(),
            width,
        })
    }

    pub fn int(value: u64, width: Width) -> Exp {
        Exp::Const(Const { value, width })
    }

    pub fn name(label: impl Into<String>) -> Exp {
        Exp::Name(label.into())
    }

    pub fn relative(offset: u64, width: Width) -> Exp {
        Exp::Relative { width, offset }
    }

    pub fn binop(op: BinOpKind, lhs: Exp, rhs: Exp) -> Exp {
        Exp::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unop(op: UnOpKind, exp: Exp) -> Exp {
        Exp::UnOp {
            op,
            exp: Box::new(exp),
        }
    }

    pub fn cast(kind: CastKind, width: Width, exp: Exp) -> Exp {
        Exp::Cast {
            kind,
            width,
            exp: Box::new(exp),
        }
    }

    pub fn mem(addr: Exp) -> Exp {
        Exp::Mem {
            addr: Box::new(addr),
        }
    }

    /// Atomic expressions are the only forms a REIL operand may reference.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Exp::Temp(_) | Exp::Const(_))
    }

    /// Declared width of this node, where it has one.
    pub fn width(&self) -> Option<Width> {
        match self {
            Exp::Temp(t) => Some(t.width),
            Exp::Const(c) => Some(c.width),
            Exp::Cast { width, .. } => Some(*width),
            Exp::Relative { width, .. } => Some(*width),
            _ => None,
        }
    }
}

impl fmt::Display for Exp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exp::Temp(t) => write!(f, "{}:{}", t.name, t.width),
            Exp::Const(c) => write!(f, "{}:{}", c.value, c.width),
            Exp::BinOp { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
            Exp::UnOp { op, exp } => write!(f, "{}{}", op, exp),
            Exp::Cast { kind, width, exp } => write!(f, "{}:{}({})", kind, width, exp),
            Exp::Mem { addr } => write!(f, "mem[{}]", addr),
            Exp::Name(label) => write!(f, "{}", label),
            Exp::Relative { width, offset } => write!(f, "$+{}:{}", offset, width),
        }
    }
}

/// One BIL statement. `Call` and `Return` are not translatable and fail
/// fast in the engine; the non-move, non-jump kinds lower to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stmt {
    Move { dst: Exp, src: Exp },
    Jmp { target: Exp },
    CJmp { target: Exp, cond: Exp },
    Call,
    Return,
    ExpStmt(Exp),
    Comment(String),
    Special(String),
    Label(String),
    VarDecl { name: String, width: Width },
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Move { dst, src } => write!(f, "{} = {}", dst, src),
            Stmt::Jmp { target } => write!(f, "jmp {}", target),
            Stmt::CJmp { target, cond } => write!(f, "cjmp {}, {}", cond, target),
            Stmt::Call => write!(f, "call"),
            Stmt::Return => write!(f, "ret"),
            Stmt::ExpStmt(exp) => write!(f, "{}", exp),
            Stmt::Comment(text) => write!(f, "// {}", text),
            Stmt::Special(text) => write!(f, "special \"{}\"", text),
            Stmt::Label(name) => write!(f, "label {}", name),
            Stmt::VarDecl { name, width } => write!(f, "var {}:{}", name, width),
        }
    }
}
