/*! Render REIL instruction sequences as readable text.
 *
 * The lowering engine hands over self-describing instructions; this crate
 * is the diagnostic sink that puts them in front of a human, one aligned
 * `ADDRESS.SUBINDEX OPCODE A, B, C` line per instruction, optionally
 * colorized for terminals.
 */

pub mod emitter;

pub use emitter::{ReilEmitter, EmitResult};
