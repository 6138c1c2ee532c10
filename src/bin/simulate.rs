use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lc2k_rs::decoder::{Decoded, Decoder};
use lc2k_rs::disasm::fmt_word;
use lc2k_rs::exec::IntExecutor;
use lc2k_rs::isa::lc2k::Lc2kDecoder;
use lc2k_rs::loader::load_machine_code;
use lc2k_rs::trace::{
    fmt_halt_summary, fmt_load_listing, fmt_trap_summary, StateDump, StateReport,
};
use lc2k_rs::{Cpu, CpuConfig, LinearMemory};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run an LC-2K machine-code file")]
struct Opts {
    /// Machine-code file, one decimal word per line
    #[arg(value_name = "MACHINE_CODE")]
    input: PathBuf,
    /// Stop with an error after this many instructions (0 = no limit)
    #[arg(long, default_value_t = 10_000_000u64)]
    max_steps: u64,
    /// Only print the final state, not the state before every instruction
    #[arg(short, long)]
    quiet: bool,
    /// Write the final machine state as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
    /// Print a disassembly of the loaded words and exit
    #[arg(long)]
    disasm: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let words = load_machine_code(&opts.input)?;
    let dec = Lc2kDecoder::new();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if opts.disasm {
        for (addr, &w) in words.iter().enumerate() {
            writeln!(out, "{:5}: {}", addr, fmt_word(dec.decode(w).as_ref(), w))?;
        }
        return Ok(());
    }

    let cfg = CpuConfig {
        max_steps: (opts.max_steps != 0).then_some(opts.max_steps),
        ..CpuConfig::default()
    };
    let mut mem = LinearMemory::with_program(cfg.memory_words, &words)?;
    write!(out, "{}", fmt_load_listing(&words))?;

    let mut cpu = Cpu::new(cfg);
    cpu.reset(0);

    let exec = IntExecutor;
    let quiet = opts.quiet;
    let mut io_err = None;
    let result = cpu.run(
        &mut mem,
        &dec,
        &exec,
        &mut |cpu: &Cpu, mem: &LinearMemory, _: &Decoded| {
            if !quiet && io_err.is_none() {
                if let Err(e) = write!(out, "{}", StateDump::new(cpu, mem)) {
                    io_err = Some(e);
                }
            }
        },
    );
    if let Some(e) = io_err {
        return Err(e).context("writing state trace");
    }

    if let Some(path) = &opts.json {
        let report = StateReport::new(&cpu, &mem, result.is_ok());
        let file = std::fs::File::create(path)
            .with_context(|| format!("cannot open {} for writing", path.display()))?;
        serde_json::to_writer_pretty(file, &report)?;
    }

    match result {
        Ok(summary) => {
            write!(out, "{}", fmt_halt_summary(&summary, &cpu, &mem))?;
            out.flush()?;
            Ok(())
        }
        Err(trap) => {
            write!(out, "{}", fmt_trap_summary(&trap, &cpu, &mem))?;
            out.flush()?;
            Err(trap.into())
        }
    }
}
