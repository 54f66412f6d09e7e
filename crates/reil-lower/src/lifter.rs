use crate::engine::Translator;
use reil_core::bil::Stmt;
use reil_core::reil::Instruction;
use reil_core::{Result, TranslateError};

/// Longest instruction-byte buffer a lifter is asked to decode.
pub const MAX_INSN_BYTES: usize = 30;

/// One lifted machine instruction: its assembly text and the basic block
/// of BIL statements describing its semantics.
#[derive(Debug, Clone)]
pub struct Lifted {
    pub mnemonic: String,
    pub statements: Vec<Stmt>,
}

/// The byte-level disassembly/lifting collaborator. Implementations wrap
/// an external lifting library; failing to decode is fatal for that
/// instruction and the driver never lowers an absent block.
pub trait Lifter {
    fn lift(&mut self, addr: u64, bytes: &[u8]) -> Result<Lifted>;
}

/// Lifts one instruction and lowers its block with a fresh engine,
/// returning the mnemonic and the full REIL sequence.
pub fn translate_insn<L: Lifter>(
    lifter: &mut L,
    addr: u64,
    bytes: &[u8],
) -> Result<(String, Vec<Instruction>)> {
    if bytes.len() > MAX_INSN_BYTES {
        return Err(TranslateError::Lift {
            addr,
            reason: format!(
                "instruction buffer of {} bytes exceeds the {} byte cap",
                bytes.len(),
                MAX_INSN_BYTES
            ),
        });
    }
    let lifted = lifter.lift(addr, bytes)?;
    let mut translator = Translator::new();
    let insts = translator.lower_block(addr, &lifted.statements)?;
    Ok((lifted.mnemonic, insts))
}
