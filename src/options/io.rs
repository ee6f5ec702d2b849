//! Configuration for I/O strategies.

use core::fmt::{self, Display, Formatter};
use std::env;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Determines how an [`Input`](crate::Input) opens sessions over a path.
///
/// Performance characteristics:
/// - **Streamed**: Reopens the file for every session. Nothing is held in memory,
///   but every rewind costs a new `open` and a forward skip.
///
/// - **Buffered**: Loads the entire file into memory once.
///   Sessions are cheap views over the shared buffer.
///
/// - **MemoryMapped**: Uses the OS virtual memory system for efficient file access.
///   Requires a seekable file. Raises an error with piped input like stdin.
///
/// # Examples
///
/// ```
/// use stream_channel::Io;
///
/// assert_eq!(Io::default(), Io::Streamed);
/// assert_eq!(Io::MemoryMapped.to_string(), "memory-mapped");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Io {
    /// Use memory-mapped I/O for efficient file access
    #[value(name = "mmap")]
    MemoryMapped,

    /// Reopen the file for every session
    #[default]
    Streamed,

    /// Read entire file into memory once
    Buffered,

    /// Bytes already in memory, see `Input::from_bytes()`
    #[value(skip)]
    Bytes,
}

impl Display for Io {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Streamed => write!(f, "streamed"),
            Self::Buffered => write!(f, "buffered"),
            Self::MemoryMapped => write!(f, "memory-mapped"),
            Self::Bytes => write!(f, "bytes"),
        }
    }
}

/// Environment variable name for I/O configuration
pub const ENV_IO: &str = "STREAM_CHANNEL_IO";

/// Parse I/O strategy from the `STREAM_CHANNEL_IO` environment variable
pub fn parse_io_from_env() -> Io {
    match env::var(ENV_IO).ok().as_deref() {
        Some(s) if s.eq_ignore_ascii_case("streamed") => Io::Streamed,
        Some(s) if s.eq_ignore_ascii_case("buffered") => Io::Buffered,
        Some(s) if s.eq_ignore_ascii_case("memory-mapped") || s.eq_ignore_ascii_case("mmap") => {
            Io::MemoryMapped
        }
        _ => Io::default(),
    }
}
