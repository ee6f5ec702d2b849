//! Configuration for session buffering and fan-out.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Configuration for session buffering and fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Capacity of the `BufReader` wrapping file sessions
    buffer_size: usize,
    /// Scratch buffer used when draining or skipping a session
    skip_buffer_size: usize,
    /// Size of ranges handed to each channel during fan-out (in bytes)
    chunk_size: u64,
}

/// Default configuration values
const DEFAULT_BUFFER_SIZE: usize = 8192;
const DEFAULT_SKIP_BUFFER_SIZE: usize = 8192;
const DEFAULT_CHUNK_SIZE: u64 = 64 * 1024;

/// Environment variable names for configuration
const ENV_BUFFER_SIZE: &str = "STREAM_CHANNEL_BUFFER_SIZE";
const ENV_SKIP_BUFFER_SIZE: &str = "STREAM_CHANNEL_SKIP_BUFFER_SIZE";
const ENV_CHUNK_SIZE: &str = "STREAM_CHANNEL_CHUNK_SIZE";

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            skip_buffer_size: DEFAULT_SKIP_BUFFER_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Create a new configuration
    pub const fn new(buffer_size: usize, skip_buffer_size: usize, chunk_size: u64) -> Self {
        Self {
            buffer_size,
            skip_buffer_size,
            chunk_size,
        }
    }

    /// Create configuration from environment variables if present
    pub fn from_env() -> Self {
        // Parse environment variables only once and cache the result
        static CONFIG: OnceLock<Config> = OnceLock::new();

        *CONFIG.get_or_init(|| {
            fn parse_env_var<T: std::str::FromStr>(name: &str, default: T) -> T {
                std::env::var(name)
                    .ok()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(default)
            }

            Self {
                buffer_size: parse_env_var(ENV_BUFFER_SIZE, DEFAULT_BUFFER_SIZE).max(1),
                skip_buffer_size: parse_env_var(ENV_SKIP_BUFFER_SIZE, DEFAULT_SKIP_BUFFER_SIZE)
                    .max(1),
                chunk_size: parse_env_var(ENV_CHUNK_SIZE, DEFAULT_CHUNK_SIZE).max(1),
            }
        })
    }

    /// Get the `BufReader` capacity for file sessions
    pub const fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Get the scratch buffer size used when draining or skipping
    pub const fn skip_buffer_size(&self) -> usize {
        self.skip_buffer_size
    }

    /// Get the fan-out chunk size
    pub const fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Set the `BufReader` capacity for this configuration
    pub const fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the skip buffer size for this configuration
    pub const fn with_skip_buffer_size(mut self, size: usize) -> Self {
        self.skip_buffer_size = size;
        self
    }

    /// Set the fan-out chunk size for this configuration
    pub const fn with_chunk_size(mut self, size: u64) -> Self {
        self.chunk_size = size;
        self
    }
}
