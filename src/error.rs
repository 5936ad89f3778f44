use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to launch player '{program}': {source}")]
    PlayerSpawn { program: String, source: io::Error },

    #[error("Player exited instantly for {url} (cache {cache_kib} KiB); throughput is undefined")]
    InstantExit { url: String, cache_kib: u64 },

    #[error("Invalid plot input '{0}': expected path=label")]
    InvalidPlotInput(String),

    #[error("Malformed record at {path}:{line}: '{text}'")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        text: String,
    },

    #[error("Plot error: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, BenchError>;
