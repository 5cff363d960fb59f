use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Dictionary file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid dictionary format in {}: {reason}", path.display())]
    Format { path: PathBuf, reason: String },

    #[error("This word already in dictionary: {0}")]
    AlreadyExists(String),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrillError {
    #[error("Unknown training mode: {0}")]
    InvalidArgument(String),

    #[error("Dictionary is empty, add some words first")]
    EmptyDictionary,
}

pub type StoreResult<T> = Result<T, StoreError>;
