use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::AsmError;
use crate::parse::{Line, MAX_LABEL_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub address: usize,
    pub line: usize,
}

/// Label -> address, owned by a single assembly.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SymbolTable {
    symbols: BTreeMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pass 1. Every line takes one address whether or not it carries a
    /// label; returns the table and the program length.
    pub fn build(lines: &[Line<'_>]) -> Result<(Self, usize), AsmError> {
        let mut table = Self::new();
        for (address, line) in lines.iter().enumerate() {
            if let Some(label) = line.label {
                table.insert(label, address, line.number)?;
            }
        }
        debug!(labels = table.len(), length = lines.len(), "pass 1 done");
        Ok((table, lines.len()))
    }

    pub fn insert(&mut self, label: &str, address: usize, line: usize) -> Result<(), AsmError> {
        if label.chars().count() > MAX_LABEL_LEN {
            return Err(AsmError::InvalidLabel {
                label: label.to_string(),
                line,
            });
        }
        if let Some(prev) = self.symbols.get(label) {
            return Err(AsmError::DuplicateLabel {
                label: label.to_string(),
                line,
                first: prev.line,
            });
        }
        self.symbols.insert(label.to_string(), Symbol { address, line });
        Ok(())
    }

    pub fn address(&self, label: &str) -> Option<usize> {
        self.symbols.get(label).map(|s| s.address)
    }

    /// `address`, failing with the line that referenced the label.
    pub fn resolve(&self, label: &str, line: usize) -> Result<usize, AsmError> {
        self.address(label).ok_or_else(|| AsmError::UndefinedLabel {
            label: label.to_string(),
            line,
        })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
