use std::fmt::Write as _;

use lc2k_rs::decoder::Op;
use lc2k_rs::instructions::{lookup, Format, InstrDesc};
use lc2k_rs::isa::lc2k::{encode, EncodeError};
use tracing::{debug, trace};

use crate::error::AsmError;
use crate::parse::{split_lines, Line};
use crate::symbols::SymbolTable;

/// Assembled output: one word per source line, in source order.
#[derive(Debug, Clone)]
pub struct Program {
    pub words: Vec<i32>,
    pub symbols: SymbolTable,
}

impl Program {
    /// Machine-code file contents: one decimal word per line.
    pub fn to_machine_code(&self) -> String {
        self.words.iter().fold(String::new(), |mut s, w| {
            let _ = writeln!(s, "{}", w);
            s
        })
    }

    /// `(Address n): word` per line.
    pub fn listing(&self) -> String {
        self.words
            .iter()
            .enumerate()
            .fold(String::new(), |mut s, (addr, w)| {
                let _ = writeln!(s, "(Address {}): {}", addr, w);
                s
            })
    }
}

/// Two passes over the whole source; the first error aborts everything.
pub fn assemble(src: &str) -> Result<Program, AsmError> {
    let lines = split_lines(src)?;
    let (symbols, len) = SymbolTable::build(&lines)?;
    let mut words = Vec::with_capacity(len);
    for (addr, line) in lines.iter().enumerate() {
        let w = encode_line(line, addr, &symbols)?;
        trace!(addr, word = w, "emit");
        words.push(w);
    }
    debug!(words = words.len(), labels = symbols.len(), "pass 2 done");
    Ok(Program { words, symbols })
}

/// How a token reads as an operand. Numeric-ness is decided by syntax, so a
/// decimal literal too wide for i64 is still a number, just out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Int(i64),
    Wide(&'a str),
    Symbol(&'a str),
}

fn classify(tok: &str) -> Token<'_> {
    let digits = tok.strip_prefix(|c| c == '+' || c == '-').unwrap_or(tok);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Token::Symbol(tok);
    }
    match tok.parse::<i64>() {
        Ok(v) => Token::Int(v),
        Err(_) => Token::Wide(tok),
    }
}

fn operand<'a>(line: &Line<'a>, i: usize, mnemonic: &str) -> Result<&'a str, AsmError> {
    line.operand(i).ok_or_else(|| AsmError::MissingOperand {
        mnemonic: mnemonic.to_string(),
        line: line.number,
    })
}

fn register(line: &Line<'_>, i: usize, mnemonic: &str) -> Result<i64, AsmError> {
    match classify(operand(line, i, mnemonic)?) {
        Token::Int(v) => Ok(v),
        Token::Wide(tok) => Err(AsmError::OperandRange {
            value: tok.to_string(),
            line: line.number,
        }),
        Token::Symbol(tok) => Err(AsmError::NonNumericOperand {
            operand: tok.to_string(),
            line: line.number,
        }),
    }
}

fn encode_at(line: usize, op: Op, a: i64, b: i64, field: i64) -> Result<i32, AsmError> {
    encode(op, a, b, field).map_err(|e| match e {
        EncodeError::RegisterRange { value } => AsmError::OperandRange {
            value: value.to_string(),
            line,
        },
        EncodeError::OffsetRange { value } => AsmError::OffsetRange {
            offset: value.to_string(),
            line,
        },
    })
}

fn encode_line(line: &Line<'_>, addr: usize, symbols: &SymbolTable) -> Result<i32, AsmError> {
    let mnemonic = line.mnemonic.unwrap_or("");
    if mnemonic == ".fill" {
        let tok = operand(line, 0, mnemonic)?;
        let word = match classify(tok) {
            Token::Int(v) => i32::try_from(v).ok(),
            Token::Wide(_) => None,
            Token::Symbol(label) => return Ok(symbols.resolve(label, line.number)? as i32),
        };
        return word.ok_or_else(|| AsmError::OperandRange {
            value: tok.to_string(),
            line: line.number,
        });
    }

    let Some(&InstrDesc {
        op,
        format,
        pc_relative,
        ..
    }) = lookup(mnemonic)
    else {
        return Err(AsmError::UnknownOpcode {
            opcode: mnemonic.to_string(),
            line: line.number,
        });
    };

    match format {
        Format::R => {
            let a = register(line, 0, mnemonic)?;
            let b = register(line, 1, mnemonic)?;
            let dest = register(line, 2, mnemonic)?;
            encode_at(line.number, op, a, b, dest)
        }
        Format::I => {
            let a = register(line, 0, mnemonic)?;
            let b = register(line, 1, mnemonic)?;
            let tok = operand(line, 2, mnemonic)?;
            // Symbolic beq targets are relative to the following instruction;
            // lw/sw take a symbol's absolute address.
            let offset = match classify(tok) {
                Token::Int(v) => v,
                Token::Wide(tok) => {
                    return Err(AsmError::OffsetRange {
                        offset: tok.to_string(),
                        line: line.number,
                    })
                }
                Token::Symbol(label) if pc_relative => {
                    symbols.resolve(label, line.number)? as i64 - (addr as i64 + 1)
                }
                Token::Symbol(label) => symbols.resolve(label, line.number)? as i64,
            };
            encode_at(line.number, op, a, b, offset)
        }
        Format::J => {
            let a = register(line, 0, mnemonic)?;
            let b = register(line, 1, mnemonic)?;
            encode_at(line.number, op, a, b, 0)
        }
        Format::O => encode_at(line.number, op, 0, 0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn r_and_j_types() {
        let p = assemble("\tadd\t1\t2\t3\n\tnor 4 5 6\n\tjalr 4 7\n").unwrap();
        assert_eq!(
            p.words,
            vec![
                (1 << 19) | (2 << 16) | 3,
                (1 << 22) | (4 << 19) | (5 << 16) | 6,
                (5 << 22) | (4 << 19) | (7 << 16),
            ]
        );
    }

    #[test]
    fn beq_backward_label_is_negative_offset() {
        let p = assemble("loop\tnoop\n\tbeq 0 0 loop\n").unwrap();
        // 0 - (1 + 1) = -2
        assert_eq!(p.words[1], (4 << 22) | 0xFFFE);
    }

    #[test]
    fn lw_label_is_absolute() {
        let p = assemble("\tlw 0 1 five\n\thalt\nfive\t.fill 5\n").unwrap();
        assert_eq!(p.words[0], (2 << 22) | (1 << 16) | 2);
    }

    #[test]
    fn lw_negative_literal_is_masked() {
        let p = assemble("\tsw 1 2 -3\n").unwrap();
        assert_eq!(p.words[0], (3 << 22) | (1 << 19) | (2 << 16) | 0xFFFD);
    }

    #[test]
    fn o_type_ignores_trailing_comment() {
        let p = assemble("\thalt\tend of program\n\tnoop\n").unwrap();
        assert_eq!(p.words, vec![6 << 22, 7 << 22]);
    }

    #[test]
    fn fill_literals_and_labels() {
        let p = assemble("\t.fill 100000\n\t.fill -1\nme\t.fill me\n").unwrap();
        assert_eq!(p.words, vec![100000, -1, 2]);
        assert!(matches!(
            assemble("\t.fill 4294967296\n"),
            Err(AsmError::OperandRange { line: 1, .. })
        ));
    }

    #[test]
    fn oversized_literals_are_range_errors() {
        let huge = "99999999999999999999";
        assert_eq!(
            assemble(&format!("\tlw 0 1 {huge}\n\thalt\n")).unwrap_err(),
            AsmError::OffsetRange {
                offset: huge.into(),
                line: 1
            }
        );
        assert_eq!(
            assemble(&format!("\tbeq 0 0 -{huge}\n")).unwrap_err(),
            AsmError::OffsetRange {
                offset: format!("-{huge}"),
                line: 1
            }
        );
        assert_eq!(
            assemble(&format!("\tadd 1 2 {huge}\n")).unwrap_err(),
            AsmError::OperandRange {
                value: huge.into(),
                line: 1
            }
        );
        assert_eq!(
            assemble(&format!("\tnoop\n\t.fill +{huge}\n")).unwrap_err(),
            AsmError::OperandRange {
                value: format!("+{huge}"),
                line: 2
            }
        );
    }

    #[test]
    fn numeric_is_decided_by_syntax() {
        assert_eq!(classify("+7"), Token::Int(7));
        assert_eq!(classify("-0"), Token::Int(0));
        assert_eq!(classify("5x"), Token::Symbol("5x"));
        assert_eq!(classify("-"), Token::Symbol("-"));
        assert_eq!(classify("123456789012345678901"), Token::Wide("123456789012345678901"));
    }

    #[test]
    fn errors_carry_context() {
        assert_eq!(
            assemble("\tadd 1 2 8\n").unwrap_err(),
            AsmError::OperandRange {
                value: "8".into(),
                line: 1
            }
        );
        assert_eq!(
            assemble("\tnoop\n\tlw 0 1 32768\n").unwrap_err(),
            AsmError::OffsetRange {
                offset: "32768".into(),
                line: 2
            }
        );
        assert_eq!(
            assemble("\tjalr a 1\n").unwrap_err(),
            AsmError::NonNumericOperand {
                operand: "a".into(),
                line: 1
            }
        );
        assert_eq!(
            assemble("\tadd 1 2\n").unwrap_err(),
            AsmError::MissingOperand {
                mnemonic: "add".into(),
                line: 1
            }
        );
        assert_eq!(
            assemble("\tmul 1 2 3\n").unwrap_err(),
            AsmError::UnknownOpcode {
                opcode: "mul".into(),
                line: 1
            }
        );
        assert_eq!(
            assemble("\tbeq 0 0 nowhere\n").unwrap_err(),
            AsmError::UndefinedLabel {
                label: "nowhere".into(),
                line: 1
            }
        );
    }

    #[test]
    fn label_only_line_has_no_opcode() {
        assert_eq!(
            assemble("\thalt\nend\n").unwrap_err(),
            AsmError::UnknownOpcode {
                opcode: String::new(),
                line: 2
            }
        );
    }

    #[test]
    fn machine_code_and_listing_text() {
        let p = assemble("\thalt\n\t.fill -7\n").unwrap();
        assert_eq!(p.to_machine_code(), "25165824\n-7\n");
        assert_eq!(p.listing(), "(Address 0): 25165824\n(Address 1): -7\n");
    }
}
