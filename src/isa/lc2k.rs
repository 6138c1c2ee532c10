use crate::decoder::{Decoded, Decoder, Op};
use crate::instructions::Format;

/// LC-2K word layout:
/// `[31:25]` unused, `[24:22]` opcode, `[21:19]` regA, `[18:16]` regB,
/// `[15:0]` destReg (R-type, low 3 bits) or two's-complement offset (I-type).
pub const OPCODE_SHIFT: u32 = 22;
pub const REG_A_SHIFT: u32 = 19;
pub const REG_B_SHIFT: u32 = 16;
pub const FIELD_MASK: u32 = 0xFFFF;

pub const OFFSET_MIN: i64 = i16::MIN as i64;
pub const OFFSET_MAX: i64 = i16::MAX as i64;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("register {value} out of range 0..=7")]
    RegisterRange { value: i64 },
    #[error("offset {value} does not fit in 16 bits")]
    OffsetRange { value: i64 },
}

fn reg(value: i64) -> Result<u32, EncodeError> {
    if (0..8).contains(&value) {
        Ok(value as u32)
    } else {
        Err(EncodeError::RegisterRange { value })
    }
}

/// Packs one instruction. `field` is the destination register for R-type,
/// the signed offset for I-type, and is ignored for J-type and O-type.
pub fn encode(op: Op, reg_a: i64, reg_b: i64, field: i64) -> Result<i32, EncodeError> {
    let a = reg(reg_a)?;
    let b = reg(reg_b)?;
    let third = match op.format() {
        Format::R => reg(field)?,
        Format::I => {
            if !(OFFSET_MIN..=OFFSET_MAX).contains(&field) {
                return Err(EncodeError::OffsetRange { value: field });
            }
            (field as u32) & FIELD_MASK
        }
        Format::J | Format::O => 0,
    };
    let word = (op.opcode() << OPCODE_SHIFT) | (a << REG_A_SHIFT) | (b << REG_B_SHIFT) | third;
    Ok(word as i32)
}

/// Raw bit fields of a word, before the opcode is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    pub opcode: i32,
    pub reg_a: u8,
    pub reg_b: u8,
    pub field: u16,
}

impl Fields {
    pub fn offset(&self) -> i32 {
        self.field as i16 as i32
    }

    pub fn dest(&self) -> u8 {
        (self.field & 0x7) as u8
    }
}

/// Never fails. The opcode is the arithmetic shift of the whole word, so
/// stray high bits show up as an opcode outside 0..=7.
pub fn fields(word: i32) -> Fields {
    Fields {
        opcode: word >> OPCODE_SHIFT,
        reg_a: ((word >> REG_A_SHIFT) & 0x7) as u8,
        reg_b: ((word >> REG_B_SHIFT) & 0x7) as u8,
        field: (word as u32 & FIELD_MASK) as u16,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Lc2kDecoder;

impl Lc2kDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for Lc2kDecoder {
    fn decode(&self, word: i32) -> Option<Decoded> {
        let f = fields(word);
        let op = Op::from_opcode(f.opcode)?;
        let (dest, offset) = match op.format() {
            Format::R => (f.dest(), 0),
            Format::I => (0, f.offset()),
            Format::J | Format::O => (0, 0),
        };
        Some(Decoded {
            op,
            reg_a: f.reg_a,
            reg_b: f.reg_b,
            dest,
            offset,
        })
    }
}
