use crate::decoder::{Decoded, Decoder};
use crate::disasm::fmt_decoded;
use crate::exec::Executor;
use crate::isa::lc2k::fields;
use crate::memory::{Bus, MemoryError};
use crate::{NUM_MEMORY, NUM_REGS};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuConfig {
    pub memory_words: usize,
    pub max_steps: Option<u64>, // None runs until HALT or a trap
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            memory_words: NUM_MEMORY,
            max_steps: Some(10_000_000),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cpu {
    pub pc: i32,
    pub reg: [i32; NUM_REGS], // no hardwired zero register
    pub executed: u64,
    pub cfg: CpuConfig,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Trap {
    #[error("unknown opcode {opcode} in word {word} at pc {pc}")]
    InvalidInstruction { pc: i32, word: i32, opcode: i32 },
    #[error("memory address error at pc {pc}: {source}")]
    Memory {
        pc: i32,
        #[source]
        source: MemoryError,
    },
    #[error("step limit of {limit} instructions reached")]
    StepLimit { limit: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub executed: u64,
    pub pc: i32,
}

impl Cpu {
    pub fn new(cfg: CpuConfig) -> Self {
        Self {
            pc: 0,
            reg: [0; NUM_REGS],
            executed: 0,
            cfg,
        }
    }

    pub fn reset(&mut self, reset_pc: i32) {
        self.pc = reset_pc;
        self.reg = [0; NUM_REGS];
        self.executed = 0;
    }

    pub fn step<B: Bus, D: Decoder, X: Executor>(
        &mut self,
        bus: &mut B,
        dec: &D,
        exec: &X,
    ) -> Result<Status, Trap> {
        self.step_observed(bus, dec, exec, &mut |_: &Cpu, _: &B, _: &Decoded| {})
    }

    /// One fetch-decode-execute cycle. `observe` sees the machine after a
    /// valid decode and before the instruction has any effect.
    pub fn step_observed<B, D, X, F>(
        &mut self,
        bus: &mut B,
        dec: &D,
        exec: &X,
        observe: &mut F,
    ) -> Result<Status, Trap>
    where
        B: Bus,
        D: Decoder,
        X: Executor,
        F: FnMut(&Cpu, &B, &Decoded),
    {
        let pc = self.pc;
        let word = bus
            .fetch(pc)
            .map_err(|source| Trap::Memory { pc, source })?;
        let d = dec.decode(word).ok_or(Trap::InvalidInstruction {
            pc,
            word,
            opcode: fields(word).opcode,
        })?;
        observe(self, bus, &d);
        trace!(pc, "{}", fmt_decoded(&d));
        // Executors see pc already pointing at the next instruction.
        self.pc = pc.wrapping_add(1);
        let status = exec.exec(self, bus, d)?;
        self.executed += 1;
        Ok(status)
    }

    /// Runs until HALT, a trap, or the configured step limit.
    pub fn run<B, D, X, F>(
        &mut self,
        bus: &mut B,
        dec: &D,
        exec: &X,
        observe: &mut F,
    ) -> Result<RunSummary, Trap>
    where
        B: Bus,
        D: Decoder,
        X: Executor,
        F: FnMut(&Cpu, &B, &Decoded),
    {
        debug!(pc = self.pc, max_steps = ?self.cfg.max_steps, "run start");
        loop {
            if let Some(limit) = self.cfg.max_steps {
                if self.executed >= limit {
                    return Err(Trap::StepLimit { limit });
                }
            }
            if let Status::Halted = self.step_observed(bus, dec, exec, observe)? {
                debug!(pc = self.pc, executed = self.executed, "machine halted");
                return Ok(RunSummary {
                    executed: self.executed,
                    pc: self.pc,
                });
            }
        }
    }
}
