/*! Unified interface for the BIL to REIL translator.
 *
 * Single import for everything: the BIL/REIL data models, the lowering
 * engine, the textual BIL parser, and the REIL text emitter.
 */

pub use reil_core as core;
pub use reil_emit as emit;
pub use reil_lower as lower;
pub use reil_parser as parser;

pub use reil_core::{
    bil::{BinOpKind, CastKind, Exp, Stmt, Temp, TempKind, UnOpKind, Width},
    reil::{Instruction, Opcode, Operand},
    Result, TranslateError,
};

pub use reil_emit::ReilEmitter;

pub use reil_lower::{translate_insn, Lifted, Lifter, Translator};

pub use reil_parser::parse;
