/*! Operator-to-opcode selection tables.
 *
 * These matches are the single source of truth for instruction selection:
 * supporting a new BIL operator means extending them, never touching the
 * flattening algorithm. Operators without a REIL encoding return an error
 * instead of a sentinel opcode, so translation aborts with a reason rather
 * than emitting `NONE`.
 */

use crate::bil::{BinOpKind, CastKind, UnOpKind};
use crate::reil::Opcode;
use crate::{Result, TranslateError};

pub fn binop_opcode(op: BinOpKind) -> Result<Opcode> {
    match op {
        BinOpKind::Plus => Ok(Opcode::Add),
        BinOpKind::Minus => Ok(Opcode::Sub),
        BinOpKind::Times => Ok(Opcode::Mul),
        BinOpKind::Divide => Ok(Opcode::Div),
        BinOpKind::Mod => Ok(Opcode::Mod),
        BinOpKind::Lshift => Ok(Opcode::Shl),
        BinOpKind::Rshift => Ok(Opcode::Shr),
        BinOpKind::Lrotate => Ok(Opcode::Rol),
        BinOpKind::Rrotate => Ok(Opcode::Ror),
        BinOpKind::LogicAnd => Ok(Opcode::Band),
        BinOpKind::LogicOr => Ok(Opcode::Bor),
        BinOpKind::BitAnd => Ok(Opcode::And),
        BinOpKind::BitOr => Ok(Opcode::Or),
        BinOpKind::Xor => Ok(Opcode::Xor),
        BinOpKind::Eq => Ok(Opcode::Eq),
        BinOpKind::Lt => Ok(Opcode::L),
        BinOpKind::Le => Ok(Opcode::Le),
        BinOpKind::Sdivide => Ok(Opcode::Sdiv),
        BinOpKind::Smod => Ok(Opcode::Smod),
        BinOpKind::Arshift | BinOpKind::Neq | BinOpKind::Gt | BinOpKind::Ge => {
            Err(TranslateError::UnsupportedOperator(op.to_string()))
        }
    }
}

pub fn unop_opcode(op: UnOpKind) -> Opcode {
    match op {
        UnOpKind::Neg => Opcode::Neg,
        UnOpKind::Not => Opcode::Bnot,
    }
}

pub fn cast_opcode(kind: CastKind) -> Result<Opcode> {
    match kind {
        CastKind::Low => Ok(Opcode::CastLo),
        CastKind::High => Ok(Opcode::CastHi),
        CastKind::Unsigned => Ok(Opcode::CastU),
        CastKind::Signed => Err(TranslateError::UnsupportedCast(kind.to_string())),
    }
}
