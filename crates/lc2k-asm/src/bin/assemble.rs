use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lc2k_asm::assemble;

#[derive(Parser, Debug)]
#[command(author, version, about = "Two-pass LC-2K assembler")]
struct Opts {
    /// Input assembly file (one instruction or .fill per line)
    #[arg(value_name = "ASSEMBLY")]
    input: PathBuf,
    /// Output machine-code file (one decimal word per line)
    #[arg(value_name = "MACHINE_CODE")]
    output: PathBuf,
    /// Print `(Address n): word` for every emitted word
    #[arg(long)]
    listing: bool,
    /// Write the symbol table as JSON
    #[arg(long, value_name = "FILE")]
    symbols: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let text = fs::read_to_string(&opts.input)
        .with_context(|| format!("error in opening {}", opts.input.display()))?;
    // Nothing is written unless the whole file assembles.
    let program = assemble(&text).with_context(|| format!("assembling {}", opts.input.display()))?;

    fs::write(&opts.output, program.to_machine_code())
        .with_context(|| format!("error in opening {}", opts.output.display()))?;
    if let Some(path) = &opts.symbols {
        let json = serde_json::to_string_pretty(&program.symbols)?;
        fs::write(path, json).with_context(|| format!("error in opening {}", path.display()))?;
    }
    if opts.listing {
        print!("{}", program.listing());
    }
    Ok(())
}
