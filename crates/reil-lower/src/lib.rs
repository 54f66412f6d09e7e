/*! Flatten BIL statement trees into REIL three-address code.
 *
 * One engine instance lowers one basic block: it walks each statement's
 * expression tree bottom-up, emits one REIL instruction per compound node,
 * and aliases the lifter's temporaries onto stable REIL temporary slots.
 * The pass is purely combinational: it never optimizes, never recovers,
 * and either produces the full instruction sequence for a statement or
 * fails with the reason.
 */

pub mod engine;
pub mod lifter;
pub mod temps;

pub use engine::Translator;
pub use lifter::{translate_insn, Lifted, Lifter, MAX_INSN_BYTES};
pub use temps::TempAllocator;
