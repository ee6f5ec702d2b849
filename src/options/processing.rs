//! Configuration for fan-out processing strategies.

use core::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Threads;

/// Determines how a range is read across channels.
///
/// Performance characteristics:
/// - **Sequential**: Chunks are read one after another on the calling thread.
///   Each chunk still gets its own channel, so rewinds never happen.
///
/// - **Parallel**: Chunks are read on a work-stealing thread pool, one channel
///   per chunk. Worth it when opening a session is cheap relative to the read.
///
/// # Examples
///
/// ```
/// use stream_channel::Processing;
///
/// assert_eq!(Processing::default(), Processing::Sequential);
/// assert_eq!(Processing::Parallel.to_string(), "parallel");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Processing {
    /// Read chunks sequentially (single-threaded).
    #[default]
    Sequential,

    /// Read chunks in parallel (multi-threaded).
    Parallel,
}

impl Display for Processing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

impl Processing {
    /// Initialize resources needed for this processing mode.
    ///
    /// For parallel processing, this initializes the global thread pool.
    /// For sequential processing, this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if parallel mode is selected but the thread pool
    /// cannot be initialized.
    pub fn initialize(self, threads: Threads) -> Result<(), crate::ChannelError> {
        match self {
            Self::Parallel => threads.init_pool(),
            Self::Sequential => Ok(()),
        }
    }
}

impl From<bool> for Processing {
    fn from(parallel: bool) -> Self {
        if parallel {
            Self::Parallel
        } else {
            Self::Sequential
        }
    }
}
