use crate::decoder::Op;

/// Encoding shape of an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// regA, regB, destReg
    R,
    /// regA, regB, 16-bit offset
    I,
    /// regA, regB
    J,
    /// opcode only
    O,
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub format: Format,
    pub pc_relative: bool,
}

// Indexed by opcode value.
pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        op: Op::Add,
        mnemonic: "add",
        format: Format::R,
        pc_relative: false,
    },
    InstrDesc {
        op: Op::Nor,
        mnemonic: "nor",
        format: Format::R,
        pc_relative: false,
    },
    InstrDesc {
        op: Op::Lw,
        mnemonic: "lw",
        format: Format::I,
        pc_relative: false,
    },
    InstrDesc {
        op: Op::Sw,
        mnemonic: "sw",
        format: Format::I,
        pc_relative: false,
    },
    InstrDesc {
        op: Op::Beq,
        mnemonic: "beq",
        format: Format::I,
        pc_relative: true,
    },
    InstrDesc {
        op: Op::Jalr,
        mnemonic: "jalr",
        format: Format::J,
        pc_relative: false,
    },
    InstrDesc {
        op: Op::Halt,
        mnemonic: "halt",
        format: Format::O,
        pc_relative: false,
    },
    InstrDesc {
        op: Op::Noop,
        mnemonic: "noop",
        format: Format::O,
        pc_relative: false,
    },
];

/// Case-sensitive, like the assembler's mnemonic matching.
pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}
