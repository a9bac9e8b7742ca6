use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BinParse {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Error opening `{}`: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading entities chunk at byte {position}: {source}")]
    Chunk {
        position: u64,
        #[source]
        source: io::Error,
    },

    /// Source ended before the requested length, with strict loading
    #[error("Expected {expected} bytes of entities, got {actual}")]
    Truncated { expected: u64, actual: u64 },

    #[error("{0}")]
    Parse(String),
}

pub type BinParseResult<T> = std::result::Result<T, BinParse>;
