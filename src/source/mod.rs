//! Stream sources that hand out independent, forward-only sessions.
//!
//! A [`StreamSource`] can be opened any number of times. Each call to
//! [`StreamSource::open`] yields a fresh [`Session`] positioned at the first
//! byte, independent of every other session over the same data. Sessions can
//! only move forward; a channel that needs to go back opens a new one.
//!
//! - [`Input`]: files (reopened per session), memory-mapped files and bytes
//! - [`FnSource`]: any closure that produces a reader, such as an archive entry
//!   decoder that has to start from the beginning every time

pub mod input;
pub mod reader;

use std::{
    fmt::{self, Debug, Formatter},
    io::{self, Read},
    sync::Arc,
};

pub use self::{
    input::Input,
    reader::{BytesReader, MmapReader},
};

/// One forward-only reading pass over a source.
pub type Session = Box<dyn Read + Send>;

/// A capability to open independent sessions over the same logical data.
pub trait StreamSource: Debug + Send + Sync {
    /// Opens a fresh session positioned at the start of the data.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while opening the underlying resource.
    fn open(&self) -> io::Result<Session>;

    /// Describes the source for diagnostics.
    fn name(&self) -> String {
        "<stream>".to_string()
    }

    /// Returns the size in bytes, if the source knows it without reading.
    fn size_hint(&self) -> Option<u64> {
        None
    }
}

impl<S: StreamSource + ?Sized> StreamSource for Arc<S> {
    fn open(&self) -> io::Result<Session> {
        (**self).open()
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn size_hint(&self) -> Option<u64> {
        (**self).size_hint()
    }
}

impl<S: StreamSource + ?Sized> StreamSource for Box<S> {
    fn open(&self) -> io::Result<Session> {
        (**self).open()
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn size_hint(&self) -> Option<u64> {
        (**self).size_hint()
    }
}

/// A source backed by a closure that opens a new reader on every call.
pub struct FnSource<F> {
    name: String,
    open: F,
}

impl<F> FnSource<F>
where
    F: Fn() -> io::Result<Session> + Send + Sync,
{
    /// Creates a source named `name` that opens sessions with `open`.
    pub fn new(name: impl Into<String>, open: F) -> Self {
        Self {
            name: name.into(),
            open,
        }
    }
}

impl<F> Debug for FnSource<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSource")
            .field("name", &self.name)
            .field("open", &"<fn>")
            .finish()
    }
}

impl<F> StreamSource for FnSource<F>
where
    F: Fn() -> io::Result<Session> + Send + Sync,
{
    fn open(&self) -> io::Result<Session> {
        (self.open)()
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
