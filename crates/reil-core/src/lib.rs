/*! Data models for translating BIL into REIL.
 *
 * BIL is the tree-structured language a lifter produces for one machine
 * instruction; REIL is the flat three-address instruction set downstream
 * tools consume. This crate holds both sides of that boundary: the tagged
 * expression/statement variants, the opcode and operand definitions, and
 * the operator-selection tables that decide which REIL opcode a BIL
 * operator lowers to.
 */

pub mod bil;
pub mod reil;
pub mod select;

pub use bil::{BinOpKind, CastKind, Const, Exp, Stmt, Temp, TempKind, UnOpKind, Width};
pub use reil::{Instruction, Opcode, Operand, MAX_OPERAND_NAME_LEN};

use thiserror::Error;

/// Failures are contract violations, not transient conditions: a statement
/// either lowers completely or not at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("Unsupported statement kind: {0}")]
    UnsupportedStatement(String),
    #[error("No REIL opcode for operator: {0}")]
    UnsupportedOperator(String),
    #[error("Unsupported cast kind: {0}")]
    UnsupportedCast(String),
    #[error("Unexpected expression form: {0}")]
    UnexpectedExpression(String),
    #[error("Invalid operand width: {0} bits")]
    InvalidWidth(u32),
    #[error("Operand name exceeds {MAX_OPERAND_NAME_LEN} characters: {0}")]
    OperandNameTooLong(String),
    #[error("Lifting failed at {addr:#x}: {reason}")]
    Lift { addr: u64, reason: String },
}

pub type Result<T> = std::result::Result<T, TranslateError>;

#[cfg(test)]
mod tests;
