/// Every variant aborts the assembly; `line` is 1-based.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("line {line}: line too long or missing terminating newline")]
    LineTooLong { line: usize },
    #[error("line {line}: label `{label}` is longer than 6 characters")]
    InvalidLabel { label: String, line: usize },
    #[error("line {line}: duplicate label `{label}` (first declared on line {first})")]
    DuplicateLabel {
        label: String,
        line: usize,
        first: usize,
    },
    #[error("line {line}: undefined label `{label}`")]
    UndefinedLabel { label: String, line: usize },
    #[error("line {line}: offset {offset} does not fit in 16 bits")]
    OffsetRange { offset: String, line: usize },
    #[error("line {line}: operand {value} is out of range")]
    OperandRange { value: String, line: usize },
    #[error("line {line}: operand `{operand}` is not a number")]
    NonNumericOperand { operand: String, line: usize },
    #[error("line {line}: `{mnemonic}` is missing an operand")]
    MissingOperand { mnemonic: String, line: usize },
    #[error("line {line}: unrecognized opcode `{opcode}`")]
    UnknownOpcode { opcode: String, line: usize },
}
