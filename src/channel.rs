//! Random-access channels over forward-only sessions.
//!
//! A channel addresses bytes by absolute position, but the session underneath
//! can only move forward. The channel compares the requested position with the
//! bytes its session has consumed: ahead means skip forward, behind means the
//! session is stale and is dropped for a fresh one.

use std::{
    fmt::{self, Display, Formatter},
    io::{self, Read, Seek, SeekFrom},
    sync::Arc,
};

use log::{debug, trace};

use crate::{ChannelError, factory::Shared, session::CountedSession};

/// Where a channel is in its life cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelState {
    /// No session is open; the next read opens one.
    Fresh,
    /// A session is open at or behind the channel position.
    Reading,
    /// The position is behind the session; the next read replaces it.
    Stale,
    /// The channel was closed.
    Closed,
}

impl Display for ChannelState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fresh => write!(f, "fresh"),
            Self::Reading => write!(f, "reading"),
            Self::Stale => write!(f, "stale"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// A seekable, size-aware view over a [`StreamSource`](crate::StreamSource).
///
/// Channels are created by [`ChannelFactory::create`](crate::ChannelFactory::create)
/// and own their session exclusively. Use one channel per caller; channels
/// from the same factory never observe each other's cursor.
#[derive(Debug)]
pub struct Channel {
    shared: Arc<Shared>,
    position: u64,
    session: Option<CountedSession>,
    open: bool,
}

impl Channel {
    pub(crate) const fn new(shared: Arc<Shared>) -> Self {
        Self {
            shared,
            position: 0,
            session: None,
            open: true,
        }
    }

    /// The resolved size of the data.
    ///
    /// # Errors
    ///
    /// - `ChannelError::ChannelClosed` after [`close`](Self::close)
    /// - `ChannelError::SizeUnresolved`, on every call, if the factory's probe failed
    pub fn length(&self) -> Result<u64, ChannelError> {
        self.ensure_open()?;

        self.shared.resolved.size(self.shared.source.as_ref())
    }

    /// Reads into `buf` starting at the absolute `position`.
    ///
    /// Returns the number of bytes placed in `buf`; `0` means end of data.
    /// The read never extends past the resolved size. With an unknown size the
    /// raw stream is read until it is exhausted.
    ///
    /// # Errors
    ///
    /// - `ChannelError::ChannelClosed` after [`close`](Self::close)
    /// - `ChannelError::SourceUnavailable` if a session could not be opened
    /// - `ChannelError::Read` if the session failed while skipping or reading
    ///
    /// The channel stays usable after an I/O error; the next read opens a new
    /// session.
    pub fn read_at(&mut self, buf: &mut [u8], position: u64) -> Result<usize, ChannelError> {
        self.ensure_open()?;
        self.position = position;

        let bound = self.shared.resolved.bound();
        let want = match bound {
            Some(size) if position >= size => return Ok(0),
            Some(size) => usize::try_from(size - position)
                .map_or(buf.len(), |remaining| remaining.min(buf.len())),
            None => buf.len(),
        };
        if want == 0 {
            return Ok(0);
        }

        if self
            .session
            .as_ref()
            .is_some_and(|session| position < session.consumed())
        {
            debug!(
                "rewind to {position} on {}, discarding session",
                self.shared.source.name()
            );
            self.session = None;
        }

        let session = match self.session.take() {
            Some(session) => session,
            None => CountedSession::open(self.shared.source.as_ref())?,
        };
        let session = self.session.insert(session);

        let consumed = session.consumed();
        let Some(skip) = position.checked_sub(consumed) else {
            return Err(ChannelError::BoundsViolation {
                position,
                consumed,
                size: bound,
            });
        };

        let read = match pull(session, skip, &mut buf[..want]) {
            Ok(read) => read,
            Err(source) => {
                // The session's cursor is unknown after a failure.
                self.session = None;
                return Err(ChannelError::Read { position, source });
            }
        };

        let end = position
            .checked_add(read as u64)
            .filter(|&end| bound.is_none_or(|size| end <= size))
            .ok_or(ChannelError::BoundsViolation {
                position,
                consumed,
                size: bound,
            })?;
        trace!("read {read} bytes at {position}");
        self.position = end;

        Ok(read)
    }

    /// The current position.
    ///
    /// # Errors
    ///
    /// `ChannelError::ChannelClosed` after [`close`](Self::close).
    pub fn position(&self) -> Result<u64, ChannelError> {
        self.ensure_open()?;

        Ok(self.position)
    }

    /// Moves the position without any I/O. Positions past the end are allowed
    /// and read as end of data.
    ///
    /// # Errors
    ///
    /// `ChannelError::ChannelClosed` after [`close`](Self::close).
    pub fn set_position(&mut self, position: u64) -> Result<(), ChannelError> {
        self.ensure_open()?;
        self.position = position;

        Ok(())
    }

    /// Whether the channel is still open.
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Where the channel is in its life cycle.
    pub fn state(&self) -> ChannelState {
        match (&self.session, self.open) {
            (_, false) => ChannelState::Closed,
            (None, true) => ChannelState::Fresh,
            (Some(session), true) if self.position < session.consumed() => ChannelState::Stale,
            (Some(_), true) => ChannelState::Reading,
        }
    }

    /// Closes the channel and releases its session. Closing twice is a no-op.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(
                "closing session on {} after {} bytes",
                self.shared.source.name(),
                session.consumed()
            );
        }
        self.open = false;
    }

    const fn ensure_open(&self) -> Result<(), ChannelError> {
        if self.open {
            Ok(())
        } else {
            Err(ChannelError::ChannelClosed)
        }
    }
}

/// Skips `skip` bytes, then fills `buf`. A session that ends during the skip
/// has nothing at the requested position, which reads as end of data.
fn pull(session: &mut CountedSession, skip: u64, buf: &mut [u8]) -> io::Result<usize> {
    if session.skip(skip)? < skip {
        return Ok(0);
    }

    session.fill(buf)
}

impl Drop for Channel {
    fn drop(&mut self) {
        self.close();
    }
}

impl Read for Channel {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let position = self.position()?;

        Ok(self.read_at(buf, position)?)
    }
}

impl Seek for Channel {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::Current(delta) => self.position()?.checked_add_signed(delta),
            SeekFrom::End(delta) => self.length()?.checked_add_signed(delta),
        }
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )
        })?;
        self.set_position(target)?;

        Ok(target)
    }
}
