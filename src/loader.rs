use std::path::{Path, PathBuf};

use tracing::debug;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error in reading address {index}: `{text}` is not a decimal word")]
    MalformedWord { index: usize, text: String },
}

/// One signed decimal word per line, in address order.
pub fn parse_machine_code(text: &str) -> Result<Vec<i32>, LoadError> {
    text.lines()
        .enumerate()
        .map(|(index, line)| {
            line.trim()
                .parse::<i32>()
                .map_err(|_| LoadError::MalformedWord {
                    index,
                    text: line.to_string(),
                })
        })
        .collect()
}

pub fn load_machine_code(path: &Path) -> Result<Vec<i32>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let words = parse_machine_code(&text)?;
    debug!(path = %path.display(), words = words.len(), "loaded machine code");
    Ok(words)
}
