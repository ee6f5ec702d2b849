//! Thread count configuration for parallel fan-out.

use core::fmt::{self, Display, Formatter};
use std::{
    env,
    sync::atomic::{AtomicBool, Ordering},
};

use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};

use crate::ChannelError;

/// Environment variable name for thread configuration
pub const ENV_THREADS: &str = "STREAM_CHANNEL_THREADS";

/// Thread count configuration for parallel fan-out.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Threads {
    /// Use all available cores.
    #[default]
    All,

    /// Use a specific number of threads.
    Count(u16),
}

impl Threads {
    /// Get the actual number of threads that will be used.
    #[must_use]
    pub fn count(self) -> usize {
        match self {
            Self::All => rayon::current_num_threads(),
            Self::Count(n) => n as usize,
        }
    }

    /// Read the thread count from `STREAM_CHANNEL_THREADS`, falling back to `All`.
    pub fn from_env() -> Self {
        env::var(ENV_THREADS)
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .filter(|&count| count > 0)
            .map_or(Self::All, Self::Count)
    }

    /// Initialize the Rayon thread pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread pool cannot be initialized or if the
    /// number of threads specified is invalid.
    pub fn init_pool(self) -> Result<(), ChannelError> {
        static INIT_ATTEMPTED: AtomicBool = AtomicBool::new(false);

        // Only attempt initialization once using a thread-safe check
        if INIT_ATTEMPTED.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        match self {
            Self::Count(count) => {
                ThreadPoolBuilder::new()
                    .num_threads(count as usize)
                    .build_global()
                    .map_err(|_| {
                        ChannelError::Config(format!(
                            "failed to configure thread pool with {count} threads"
                        ))
                    })?;
            }
            Self::All => {
                // Default Rayon behavior, no need to configure
            }
        }

        Ok(())
    }
}

impl Display for Threads {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

impl From<u16> for Threads {
    fn from(count: u16) -> Self {
        Self::Count(count)
    }
}
