use anyhow::Result;
use reil_core::reil::{Instruction, Operand};
use std::io::Write;

pub type EmitResult = Result<()>;

/// Writes REIL instructions to any sink, one line each.
#[derive(Debug, Clone)]
pub struct ReilEmitter {
    pub use_colors: bool,
}

impl ReilEmitter {
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    pub fn colored() -> Self {
        Self { use_colors: true }
    }

    pub fn emit_inst<W: Write>(&self, inst: &Instruction, writer: &mut W) -> EmitResult {
        if self.use_colors {
            use colored::Colorize;
            writeln!(
                writer,
                "{} {} {:>16}, {:>16}, {:>16}",
                format!("{:08x}.{:02x}", inst.addr, inst.inum).dimmed(),
                format!("{:>7}", inst.op).bright_cyan().bold(),
                colorize_operand(&inst.a),
                colorize_operand(&inst.b),
                colorize_operand(&inst.c),
            )?;
        } else {
            writeln!(writer, "{}", inst)?;
        }
        Ok(())
    }

    pub fn emit_block<W: Write>(&self, insts: &[Instruction], writer: &mut W) -> EmitResult {
        for inst in insts {
            self.emit_inst(inst, writer)?;
        }
        Ok(())
    }

    pub fn emit_to_string(&self, insts: &[Instruction]) -> Result<String> {
        let mut buffer = Vec::new();
        self.emit_block(insts, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl Default for ReilEmitter {
    fn default() -> Self {
        Self::new()
    }
}

fn colorize_operand(operand: &Operand) -> String {
    use colored::Colorize;
    let text = operand.to_string();
    match operand {
        Operand::None => text,
        Operand::Register { .. } => text.yellow().to_string(),
        Operand::Temporary { .. } => text.green().to_string(),
        Operand::Constant { .. } => text.magenta().to_string(),
    }
}
