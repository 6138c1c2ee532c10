pub mod cpu;
pub mod decoder;
pub mod exec;
pub mod disasm;
pub mod instructions;
pub mod loader;
pub mod memory;
pub mod trace;

pub mod isa {
    pub mod lc2k; // LC-2K 32-bit word codec
}

pub use cpu::{Cpu, CpuConfig, RunSummary, Trap};
pub use memory::{Bus, LinearMemory, MemoryError};

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 8;

/// Number of words in simulator memory.
pub const NUM_MEMORY: usize = 65536;
