use serde::{Deserialize, Serialize};

use crate::instructions::{Format, TABLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Add = 0,
    Nor = 1,
    Lw = 2,
    Sw = 3,
    Beq = 4,
    Jalr = 5,
    Halt = 6,
    Noop = 7,
}

impl Op {
    pub const ALL: [Op; 8] = [
        Op::Add,
        Op::Nor,
        Op::Lw,
        Op::Sw,
        Op::Beq,
        Op::Jalr,
        Op::Halt,
        Op::Noop,
    ];

    /// Maps a decoded opcode field back to an `Op`; anything outside 0..=7 is `None`.
    pub fn from_opcode(opcode: i32) -> Option<Op> {
        usize::try_from(opcode).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn opcode(self) -> u32 {
        self as u32
    }

    pub fn mnemonic(self) -> &'static str {
        TABLE[self as usize].mnemonic
    }

    pub fn format(self) -> Format {
        TABLE[self as usize].format
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub op: Op,
    pub reg_a: u8,
    pub reg_b: u8,
    pub dest: u8,    // R-type only
    pub offset: i32, // I-type only, sign-extended
}

pub trait Decoder {
    fn decode(&self, word: i32) -> Option<Decoded>;
}
