//! Reusable, seekable byte channels over forward-only stream sources.
//!
//! Many byte sources can only be read once from front to back: a decoded
//! archive entry, a decompressor, a file reopened from the start. `stream-channel`
//! turns such a source into a [`ChannelFactory`] that knows the size of the
//! data and hands out any number of independent [`Channel`]s, each of which
//! supports reads at arbitrary positions.
//!
//! ## Module structure
//!
//! - `source/`: The [`StreamSource`] trait and its implementations
//!   - `source/input.rs`: File, memory-mapped and in-memory sources
//!   - `source/reader.rs`: Session readers over shared data
//! - `size.rs`: Size resolution with truncation salvage and deferred errors
//! - `factory.rs`: The immutable [`ChannelFactory`]
//! - `channel.rs`: The [`Channel`] state machine
//! - `session.rs`: Byte-counting sessions and drain/skip helpers
//! - `fanout.rs`: Reading a range through many channels
//! - `document.rs`: The document slice that holds a factory
//! - `options/`: I/O, processing, thread and format options
//! - `config.rs`: Buffer and chunk sizes from the environment
//! - `output.rs`: Writers for stdout, stderr and files
//! - `error.rs`: [`ChannelError`]
//! - `exit_code.rs`: Exit codes for the CLI
//!
//! # Sizes
//!
//! A factory resolves its size once:
//!
//! * A trusted declared size is used as is.
//! * An unknown size is found by draining one throwaway session.
//! * A declared size can be checked with a forced probe; the smaller of the two
//!   wins, so the valid prefix of a truncated source stays readable.
//! * A failed probe is remembered and reported by [`Channel::length`], never by
//!   the factory's constructor. Reads still work if the source can be opened.
//!
//! # Examples
//!
//! ```
//! use stream_channel::{ChannelFactory, FnSource, Session};
//! use std::io::Cursor;
//!
//! # fn main() -> Result<(), stream_channel::ChannelError> {
//! // A source that can only be read forward, from the start, every time.
//! let source = FnSource::new("digits", || Ok(Box::new(Cursor::new(b"0123456789".to_vec())) as Session));
//! let factory = ChannelFactory::new(None, source);
//!
//! let mut channel = factory.create();
//! assert_eq!(channel.length()?, 10);
//!
//! let mut buf = [0u8; 3];
//! channel.read_at(&mut buf, 7)?;
//! assert_eq!(&buf, b"789");
//!
//! // Going backwards reopens the source behind the scenes.
//! channel.read_at(&mut buf, 0)?;
//! assert_eq!(&buf, b"012");
//! channel.close();
//! # Ok(())
//! # }
//! ```
//!
//! Paths go through [`Input`], which picks how sessions are opened:
//!
//! ```no_run
//! use stream_channel::{ChannelFactory, Input, Io};
//!
//! # fn main() -> Result<(), stream_channel::ChannelError> {
//! let input = Input::new("document.bin", Io::MemoryMapped)?;
//! let factory = ChannelFactory::from_source(input);
//! let mut channel = factory.create();
//! let mut header = [0u8; 16];
//! channel.read_at(&mut header, 0)?;
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod config;
pub mod document;
pub mod error;
pub mod exit_code;
pub mod factory;
pub mod fanout;
pub mod options;
pub mod output;
pub mod session;
pub mod size;
pub mod source;

pub use channel::{Channel, ChannelState};
pub use config::Config;
pub use document::DataObject;
pub use error::Error as ChannelError;
pub use factory::ChannelFactory;
pub use options::{
    Options, format::Format, io::Io, processing::Processing, threads::Threads,
};
pub use output::Output;
pub use size::ResolvedSize;
pub use source::{FnSource, Input, Session, StreamSource};
