//! Configuration options for opening sources and reading through channels.
//!
//! This module provides the [`Options`] struct, a unified container for the
//! settings a caller picks once and reuses across channels.
//!
//! # Structure
//!
//! - **Io** ([`Io`]): How a path is turned into a source (streamed, buffered, memory-mapped)
//! - **Processing** ([`Processing`]): Fan-out mode (sequential, parallel)
//! - **Threads** ([`Threads`]): Thread pool size for parallel fan-out
//! - **Format** ([`Format`]): Report format (text, JSON, CSV)
//!
//! # Usage
//!
//! ```
//! use stream_channel::{Options, Format, Io, Processing};
//!
//! let options = Options::default();
//! assert_eq!(options.io(), Io::Streamed);
//!
//! let options = Options::default()
//!     .with_io(Io::MemoryMapped)
//!     .with_processing(Processing::Parallel)
//!     .with_format(Format::Json);
//! assert_eq!(options.processing(), Processing::Parallel);
//! ```
//!
//! # Environment Variables
//!
//! - `STREAM_CHANNEL_IO`: I/O strategy (default: streamed)
//! - `STREAM_CHANNEL_THREADS`: Thread count (default: all available cores)
//! - `STREAM_CHANNEL_CHUNK_SIZE`: Fan-out chunk size (default: 65536)
//! - `STREAM_CHANNEL_BUFFER_SIZE`: File session buffer capacity (default: 8192)
//! - `STREAM_CHANNEL_SKIP_BUFFER_SIZE`: Drain/skip scratch size (default: 8192)

pub mod format;
pub mod io;
pub mod processing;
pub mod threads;

use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use self::{format::Format, io::Io, processing::Processing, threads::Threads};
use crate::{ChannelError, Config};

/// Unified configuration for reading through channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// I/O strategy (streamed, buffered, memory-mapped).
    io: Io,

    /// Fan-out strategy (sequential, parallel).
    processing: Processing,

    /// Thread count for parallel fan-out.
    threads: Threads,

    /// Report format.
    format: Format,

    /// Bytes read per channel during fan-out.
    chunk_size: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            io: Io::default(),
            processing: Processing::default(),
            threads: Threads::default(),
            format: Format::default(),
            chunk_size: Config::from_env().chunk_size(),
        }
    }
}

impl Options {
    /// Options seeded from the `STREAM_CHANNEL_*` environment variables.
    pub fn from_env() -> Self {
        Self::default()
            .with_io(io::parse_io_from_env())
            .with_threads(Threads::from_env())
    }

    /// Set I/O strategy.
    #[must_use]
    pub const fn with_io(mut self, io: Io) -> Self {
        self.io = io;
        self
    }

    /// Set processing strategy.
    #[must_use]
    pub const fn with_processing(mut self, processing: Processing) -> Self {
        self.processing = processing;
        self
    }

    /// Set thread count for parallel fan-out.
    #[must_use]
    pub const fn with_threads(mut self, threads: Threads) -> Self {
        self.threads = threads;
        self
    }

    /// Set report format.
    #[must_use]
    pub const fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Set fan-out chunk size. Zero is treated as one byte.
    #[must_use]
    pub const fn with_chunk_size(mut self, size: u64) -> Self {
        self.chunk_size = if size == 0 { 1 } else { size };
        self
    }

    /// Get the I/O strategy.
    pub const fn io(&self) -> Io {
        self.io
    }

    /// Get the processing strategy.
    pub const fn processing(&self) -> Processing {
        self.processing
    }

    /// Get the thread configuration.
    pub const fn threads(&self) -> Threads {
        self.threads
    }

    /// Get the report format.
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Get the fan-out chunk size.
    pub const fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Initialize the thread pool if parallel processing is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if parallel mode is selected but the thread pool
    /// cannot be initialized.
    pub fn init_thread_pool_if_parallel(&self) -> Result<(), ChannelError> {
        self.processing.initialize(self.threads)
    }
}

impl Display for Options {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Options {{ io: {}, processing: {}, threads: {}, format: {}, chunk_size: {} }}",
            self.io, self.processing, self.threads, self.format, self.chunk_size
        )
    }
}
