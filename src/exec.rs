use crate::cpu::{Cpu, Status, Trap};
use crate::decoder::{Decoded, Op};
use crate::memory::Bus;

pub trait Executor {
    /// Applies one decoded instruction. On entry `cpu.pc` already addresses
    /// the following instruction.
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, d: Decoded) -> Result<Status, Trap>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IntExecutor;

impl IntExecutor {
    fn effective_addr(cpu: &Cpu, d: &Decoded) -> i32 {
        cpu.reg[d.reg_a as usize].wrapping_add(d.offset)
    }
}

impl Executor for IntExecutor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, d: Decoded) -> Result<Status, Trap> {
        let pc = cpu.pc.wrapping_sub(1);
        let a = d.reg_a as usize;
        let b = d.reg_b as usize;
        match d.op {
            Op::Add => {
                cpu.reg[d.dest as usize] = cpu.reg[a].wrapping_add(cpu.reg[b]);
            }
            Op::Nor => {
                cpu.reg[d.dest as usize] = !(cpu.reg[a] | cpu.reg[b]);
            }
            Op::Lw => {
                let addr = Self::effective_addr(cpu, &d);
                cpu.reg[b] = bus
                    .read_word(addr)
                    .map_err(|source| Trap::Memory { pc, source })?;
            }
            Op::Sw => {
                let addr = Self::effective_addr(cpu, &d);
                bus.write_word(addr, cpu.reg[b])
                    .map_err(|source| Trap::Memory { pc, source })?;
            }
            Op::Beq => {
                if cpu.reg[a] == cpu.reg[b] {
                    cpu.pc = cpu.pc.wrapping_add(d.offset);
                }
            }
            Op::Jalr => {
                // regB is written first, so `jalr r r` falls through.
                cpu.reg[b] = cpu.pc;
                cpu.pc = cpu.reg[a];
            }
            Op::Halt => return Ok(Status::Halted),
            Op::Noop => {}
        }
        Ok(Status::Running)
    }
}
