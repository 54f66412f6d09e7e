use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reil")]
#[command(about = "Translate textual BIL into flat REIL three-address code")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower one basic block of BIL statements to REIL.
    Lower {
        /// BIL source file; stdin when omitted.
        input: Option<PathBuf>,

        /// Address the block was lifted from.
        #[arg(long, default_value = "0", value_parser = parse_addr)]
        addr: u64,

        #[arg(long)]
        json: bool,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        no_color: bool,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Check that a BIL file parses.
    Validate {
        input: Option<PathBuf>,

        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lower {
            input,
            addr,
            json,
            output,
            no_color,
            verbose,
        } => cmd_lower(input, addr, json, output, no_color, verbose),
        Commands::Validate { input, verbose } => cmd_validate(input, verbose),
    }
}

fn cmd_lower(
    input: Option<PathBuf>,
    addr: u64,
    json: bool,
    output: Option<PathBuf>,
    no_color: bool,
    verbose: bool,
) -> Result<()> {
    use colored::*;
    use reil_emit::ReilEmitter;
    use reil_lower::Translator;
    use std::fs;

    if verbose {
        println!("{}", " REIL Translator".bright_blue().bold());
        println!("{}", "=".repeat(50).bright_blue());
        match &input {
            Some(path) => println!(" Input: {}", path.display()),
            None => println!(" Input: <stdin>"),
        }
        println!(" Address: {:#x}", addr);
        println!();
    }

    let source = read_input(input)?;

    let stmts = reil_parser::parse(&source).map_err(|e| anyhow::anyhow!("Parse error:\n{}", e))?;
    if verbose {
        println!(" Lowering {} statement(s)...", stmts.len());
        println!();
    }

    let insts = Translator::new()
        .lower_block(addr, &stmts)
        .context("Translation failed")?;

    let rendered = if json {
        serde_json::to_string_pretty(&insts)?
    } else {
        let emitter = if output.is_none() && !no_color {
            ReilEmitter::colored()
        } else {
            ReilEmitter::new()
        };
        emitter.emit_to_string(&insts)?
    };

    match output {
        Some(path) => {
            fs::write(&path, &rendered)?;
            if verbose {
                println!(
                    " {} {} instruction(s) written to {}",
                    "SUCCESS:".bright_green().bold(),
                    insts.len(),
                    path.display()
                );
            }
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn cmd_validate(input: Option<PathBuf>, verbose: bool) -> Result<()> {
    use colored::*;

    let source = read_input(input)?;

    match reil_parser::parse(&source) {
        Ok(stmts) => {
            println!("{}", " VALID".bright_green().bold());
            if verbose {
                println!("   Parsed {} statement(s)", stmts.len());
            }
            Ok(())
        }
        Err(e) => {
            println!("{}", " INVALID".bright_red().bold());
            println!("\n{}", "Parse Error:".bright_red());
            println!("{}", e);
            Err(anyhow::anyhow!("Validation failed"))
        }
    }
}

fn read_input(input: Option<PathBuf>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn parse_addr(text: &str) -> Result<u64, String> {
    let parsed = match text.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|_| format!("invalid address: {}", text))
}
