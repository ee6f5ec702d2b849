//! Error types for stream-channel.

use std::{io, sync::Arc};

use thiserror::Error;

/// Structured error types for stream-channel.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Opening a session on the stream source failed.
    #[error("failed to open stream source: {source_name}")]
    SourceUnavailable {
        /// Description of the stream source.
        source_name: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Probing the size of the source failed when the factory was built.
    #[error("size of stream source could not be resolved: {source_name}")]
    SizeUnresolved {
        /// Description of the stream source.
        source_name: String,
        /// The probe failure, shared by every channel of the factory.
        #[source]
        source: Arc<io::Error>,
    },

    /// Operation attempted on a closed channel.
    #[error("channel is closed")]
    ChannelClosed,

    /// Internal cursor arithmetic went out of bounds.
    #[error("bounds violation at position {position} (session consumed {consumed}, size {size:?})")]
    BoundsViolation {
        /// Logical channel position.
        position: u64,
        /// Bytes consumed by the current session.
        consumed: u64,
        /// Resolved size, if known.
        size: Option<u64>,
    },

    /// I/O error while skipping or reading an open session.
    #[error("read failed at position {position}")]
    Read {
        /// Logical channel position of the read.
        position: u64,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error with context.
    #[error("{message}: {path}")]
    Io {
        /// File path where error occurred.
        path: String,
        /// Error description.
        message: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Memory-mapped I/O attempted on stdin.
    #[error("memory-mapped I/O requires a file, not stdin")]
    MmapStdin,

    /// Invalid command-line usage.
    #[error("usage: {0}")]
    Usage(String),

    /// Configuration error.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),

    /// CSV serialization error.
    #[error("CSV serialization failed")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Returns the underlying `io::ErrorKind`, if this error wraps one.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::SourceUnavailable { source, .. }
            | Self::Read { source, .. }
            | Self::Io { source, .. } => Some(source.kind()),
            Self::SizeUnresolved { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Channels implement `std::io::Read` and `Seek`, so errors must cross into `io::Error`.
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match &err {
            Error::ChannelClosed => io::ErrorKind::BrokenPipe,
            Error::BoundsViolation { .. } => io::ErrorKind::InvalidData,
            Error::MmapStdin | Error::Usage(_) | Error::Config(_) => io::ErrorKind::InvalidInput,
            Error::Json(_) | Error::Csv(_) => io::ErrorKind::InvalidData,
            other => other.io_kind().unwrap_or(io::ErrorKind::Other),
        };

        Self::new(kind, err)
    }
}
