use crate::error::AsmError;

/// Buffer size of the course tools' line reader, terminator included.
pub const MAX_LINE_LENGTH: usize = 1000;
pub const MAX_LABEL_LEN: usize = 6;

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// One source line split into fields. A label is any token starting in
/// column 0; anything after the third operand is a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub label: Option<&'a str>,
    pub mnemonic: Option<&'a str>,
    pub operands: Vec<&'a str>,
}

impl<'a> Line<'a> {
    pub fn parse(number: usize, text: &'a str) -> Self {
        let label_end = text.find(is_space).unwrap_or(text.len());
        let label = (label_end > 0).then(|| &text[..label_end]);
        let mut fields = text[label_end..].split(is_space).filter(|t| !t.is_empty());
        let mnemonic = fields.next();
        let operands = fields.take(3).collect();
        Self {
            number,
            label,
            mnemonic,
            operands,
        }
    }

    pub fn operand(&self, i: usize) -> Option<&'a str> {
        self.operands.get(i).copied()
    }
}

/// Every line, including the last, must end in `\n` and fit the line buffer.
pub fn split_lines(src: &str) -> Result<Vec<Line<'_>>, AsmError> {
    src.split_inclusive('\n')
        .enumerate()
        .map(|(i, raw)| {
            let number = i + 1;
            match raw.strip_suffix('\n') {
                Some(text) if text.len() < MAX_LINE_LENGTH - 1 => Ok(Line::parse(number, text)),
                _ => Err(AsmError::LineTooLong { line: number }),
            }
        })
        .collect()
}
