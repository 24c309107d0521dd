use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coarse failure category, for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    UnsupportedAlgorithm,
    ReadFailure,
}

#[derive(Debug, Error)]
pub enum HashError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("unsupported hash algorithm: {name:?}")]
    UnsupportedAlgorithm { name: String },

    #[error("failed to read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HashError {
    /// Classify a failed `File::open`.
    pub fn open(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            HashError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            HashError::read(path, source)
        }
    }

    /// Any failure once the file is open, including it vanishing mid-read.
    pub fn read(path: &Path, source: io::Error) -> Self {
        HashError::ReadFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            HashError::FileNotFound { .. } => ErrorKind::FileNotFound,
            HashError::UnsupportedAlgorithm { .. } => ErrorKind::UnsupportedAlgorithm,
            HashError::ReadFailure { .. } => ErrorKind::ReadFailure,
        }
    }
}

/// A comparison that produced no verdict. Never conflated with a mismatch.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error(transparent)]
    Algorithm(HashError),

    #[error("first file: {0}")]
    First(#[source] HashError),

    #[error("second file: {0}")]
    Second(#[source] HashError),

    #[error("both files failed: {first}; {second}")]
    Both { first: HashError, second: HashError },
}

impl CompareError {
    /// Every underlying hashing failure, first file before second.
    pub fn errors(&self) -> Vec<&HashError> {
        match self {
            CompareError::Algorithm(e) | CompareError::First(e) | CompareError::Second(e) => {
                vec![e]
            }
            CompareError::Both { first, second } => vec![first, second],
        }
    }
}
