use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("memory address {addr} outside 0..{size}")]
    OutOfRange { addr: i32, size: usize },
    #[error("pc {pc} outside loaded program of {len} words")]
    PcOutOfProgram { pc: i32, len: usize },
    #[error("program of {len} words exceeds memory of {size} words")]
    ProgramTooLarge { len: usize, size: usize },
}

pub trait Bus {
    /// Instruction fetch; only the loaded program is executable.
    fn fetch(&mut self, pc: i32) -> Result<i32, MemoryError>;
    fn read_word(&mut self, addr: i32) -> Result<i32, MemoryError>;
    fn write_word(&mut self, addr: i32, val: i32) -> Result<(), MemoryError>;
}

/// Word-addressed memory with a fixed capacity. Words past the loaded
/// program read as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearMemory {
    pub mem: Vec<i32>,
    pub loaded: usize,
}

impl LinearMemory {
    pub fn new(size: usize) -> Self {
        Self {
            mem: vec![0; size],
            loaded: 0,
        }
    }

    pub fn with_program(size: usize, words: &[i32]) -> Result<Self, MemoryError> {
        let mut m = Self::new(size);
        m.load(words)?;
        Ok(m)
    }

    pub fn load(&mut self, words: &[i32]) -> Result<(), MemoryError> {
        if words.len() > self.mem.len() {
            return Err(MemoryError::ProgramTooLarge {
                len: words.len(),
                size: self.mem.len(),
            });
        }
        self.mem[..words.len()].copy_from_slice(words);
        self.loaded = words.len();
        Ok(())
    }

    /// The populated prefix, i.e. what the state dump shows.
    pub fn program(&self) -> &[i32] {
        &self.mem[..self.loaded]
    }

    fn index(&self, addr: i32) -> Result<usize, MemoryError> {
        usize::try_from(addr)
            .ok()
            .filter(|&i| i < self.mem.len())
            .ok_or(MemoryError::OutOfRange {
                addr,
                size: self.mem.len(),
            })
    }
}

impl Bus for LinearMemory {
    fn fetch(&mut self, pc: i32) -> Result<i32, MemoryError> {
        match usize::try_from(pc) {
            Ok(i) if i < self.loaded => Ok(self.mem[i]),
            _ => Err(MemoryError::PcOutOfProgram {
                pc,
                len: self.loaded,
            }),
        }
    }
    fn read_word(&mut self, addr: i32) -> Result<i32, MemoryError> {
        let i = self.index(addr)?;
        Ok(self.mem[i])
    }
    fn write_word(&mut self, addr: i32, val: i32) -> Result<(), MemoryError> {
        let i = self.index(addr)?;
        self.mem[i] = val;
        Ok(())
    }
}
