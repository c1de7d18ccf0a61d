//! Library error type. Binaries wrap these in `anyhow` with extra context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("no table of contents found in {}", .0.display())]
    MissingToc(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
