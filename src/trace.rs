//! Text state dump in the format the LC-2K course tools print, plus a
//! serializable final-state report.

use std::fmt;

use serde::Serialize;

use crate::cpu::{Cpu, RunSummary, Trap};
use crate::memory::LinearMemory;

/// Displays as one `@@@ ... end state` block, including the leading blank line.
pub struct StateDump<'a> {
    pub cpu: &'a Cpu,
    pub mem: &'a LinearMemory,
}

impl<'a> StateDump<'a> {
    pub fn new(cpu: &'a Cpu, mem: &'a LinearMemory) -> Self {
        Self { cpu, mem }
    }
}

impl fmt::Display for StateDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n@@@\nstate:\n")?;
        writeln!(f, "\tpc {}", self.cpu.pc)?;
        writeln!(f, "\tmemory:")?;
        for (i, w) in self.mem.program().iter().enumerate() {
            writeln!(f, "\t\tmem[ {} ] {}", i, w)?;
        }
        writeln!(f, "\tregisters:")?;
        for (i, r) in self.cpu.reg.iter().enumerate() {
            writeln!(f, "\t\treg[ {} ] {}", i, r)?;
        }
        writeln!(f, "end state")
    }
}

/// One `memory[i]=w` line per loaded word.
pub fn fmt_load_listing(words: &[i32]) -> String {
    words
        .iter()
        .enumerate()
        .map(|(i, w)| format!("memory[{}]={}\n", i, w))
        .collect()
}

/// The closing text printed after HALT.
pub fn fmt_halt_summary(summary: &RunSummary, cpu: &Cpu, mem: &LinearMemory) -> String {
    format!(
        "machine halted\ntotal of {} instructions executed\nfinal state of machine:\n{}",
        summary.executed,
        StateDump::new(cpu, mem)
    )
}

/// The closing text printed when a trap ends the run instead of HALT.
pub fn fmt_trap_summary(trap: &Trap, cpu: &Cpu, mem: &LinearMemory) -> String {
    format!(
        "machine stopped: {}\ntotal of {} instructions executed\nfinal state of machine:\n{}",
        trap,
        cpu.executed,
        StateDump::new(cpu, mem)
    )
}

#[derive(Debug, Serialize)]
pub struct StateReport<'a> {
    pub halted: bool,
    pub executed: u64,
    pub pc: i32,
    pub registers: &'a [i32],
    pub memory: &'a [i32],
}

impl<'a> StateReport<'a> {
    pub fn new(cpu: &'a Cpu, mem: &'a LinearMemory, halted: bool) -> Self {
        Self {
            halted,
            executed: cpu.executed,
            pc: cpu.pc,
            registers: &cpu.reg,
            memory: mem.program(),
        }
    }
}
