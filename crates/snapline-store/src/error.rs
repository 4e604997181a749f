use std::io;

/// Errors from snapshot store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A stored snapshot exists but could not be read.
    #[error("reading snapshot {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: io::Error,
    },

    /// A snapshot could not be written.
    #[error("writing snapshot {location}: {source}")]
    Write {
        location: String,
        #[source]
        source: io::Error,
    },

    /// The snapshot identifier cannot be mapped to a storage location.
    #[error("invalid snapshot identifier {0:?}")]
    InvalidId(String),
}

impl StoreError {
    pub(crate) fn read(location: impl Into<String>, source: io::Error) -> Self {
        Self::Read {
            location: location.into(),
            source,
        }
    }

    pub(crate) fn write(location: impl Into<String>, source: io::Error) -> Self {
        Self::Write {
            location: location.into(),
            source,
        }
    }

    /// The underlying I/O error, if this error came from the backend.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::InvalidId(_) => None,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
