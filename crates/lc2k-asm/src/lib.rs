pub mod assemble;
pub mod error;
pub mod parse;
pub mod symbols;

// Re-export commonly used types/functions for the CLI and tests
pub use assemble::{assemble, Program};
pub use error::AsmError;
pub use parse::{split_lines, Line};
pub use symbols::SymbolTable;
