//! Byte-counting sessions and the drain/skip/fill helpers built on them.

use std::io::{self, Read};

use log::debug;

use crate::{
    ChannelError, Config,
    source::{Session, StreamSource},
};

/// An open session that remembers how many bytes it has handed out.
pub(crate) struct CountedSession {
    inner: Session,
    consumed: u64,
    scratch: Vec<u8>,
}

impl CountedSession {
    /// Opens a fresh session on `source`.
    pub(crate) fn open(source: &dyn StreamSource) -> Result<Self, ChannelError> {
        let inner = source
            .open()
            .map_err(|source_err| ChannelError::SourceUnavailable {
                source_name: source.name(),
                source: source_err,
            })?;
        debug!("opened session on {}", source.name());

        Ok(Self {
            inner,
            consumed: 0,
            scratch: Vec::new(),
        })
    }

    /// Bytes consumed from this session so far.
    pub(crate) const fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Discards up to `count` bytes, returning how many were actually skipped.
    ///
    /// Fewer than `count` means the session ran out of data. The scratch
    /// buffer is allocated on the first skip and reused afterwards.
    pub(crate) fn skip(&mut self, count: u64) -> io::Result<u64> {
        if count == 0 {
            return Ok(0);
        }
        if self.scratch.is_empty() {
            self.scratch = vec![0u8; Config::from_env().skip_buffer_size()];
        }
        let skipped = drain_with(&mut (&mut self.inner).take(count), &mut self.scratch)?;
        self.consumed += skipped;

        Ok(skipped)
    }

    /// Reads until `buf` is full or the session is exhausted.
    pub(crate) fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let filled = read_fully(&mut self.inner, buf)?;
        self.consumed += filled as u64;

        Ok(filled)
    }
}

impl std::fmt::Debug for CountedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountedSession")
            .field("inner", &"<dyn Read>")
            .field("consumed", &self.consumed)
            .field("scratch_len", &self.scratch.len())
            .finish()
    }
}

/// Reads `reader` to exhaustion and returns the number of bytes it produced.
///
/// # Errors
///
/// Returns the first I/O error other than `Interrupted`.
pub fn drain<R: Read + ?Sized>(reader: &mut R) -> io::Result<u64> {
    let mut scratch = vec![0u8; Config::from_env().skip_buffer_size()];

    drain_with(reader, &mut scratch)
}

/// Reads `reader` to exhaustion through the caller's `scratch` buffer.
///
/// # Errors
///
/// Returns the first I/O error other than `Interrupted`.
pub fn drain_with<R: Read + ?Sized>(reader: &mut R, scratch: &mut [u8]) -> io::Result<u64> {
    let mut total = 0u64;

    loop {
        match reader.read(scratch) {
            Ok(0) => return Ok(total),
            Ok(n) => total += n as u64,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}

/// Reads into `buf` until it is full or `reader` reports end of data.
///
/// # Errors
///
/// Returns the first I/O error other than `Interrupted`.
pub fn read_fully<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}
