//! Test sources that count sessions and inject failures.

#![allow(dead_code)]

use std::{
    io::{self, Cursor, Read},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use stream_channel::{Session, StreamSource};

/// Session bookkeeping shared by a `CountingSource` and its sessions.
#[derive(Debug, Default)]
pub struct Counters {
    opened: AtomicUsize,
    live: AtomicUsize,
    failing_opens: AtomicUsize,
}

impl Counters {
    /// Sessions opened so far.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Sessions opened and not yet dropped.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// An in-memory source that records every session it hands out.
#[derive(Clone, Debug)]
pub struct CountingSource {
    data: Arc<[u8]>,
    counters: Arc<Counters>,
    fail_at: Option<u64>,
}

impl CountingSource {
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: Arc::from(data),
            counters: Arc::default(),
            fail_at: None,
        }
    }

    /// Sessions raise `InvalidData` once they reach byte `offset`.
    pub fn failing_at(mut self, offset: u64) -> Self {
        self.fail_at = Some(offset);
        self
    }

    /// The next `count` calls to `open` fail with `NotFound`.
    pub fn fail_next_opens(&self, count: usize) {
        self.counters.failing_opens.store(count, Ordering::SeqCst);
    }

    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }
}

impl StreamSource for CountingSource {
    fn open(&self) -> io::Result<Session> {
        let failing = self
            .counters
            .failing_opens
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(io::Error::new(io::ErrorKind::NotFound, "source went away"));
        }

        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        self.counters.live.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(TrackedSession {
            cursor: Cursor::new(Arc::clone(&self.data)),
            counters: Arc::clone(&self.counters),
            fail_at: self.fail_at,
        }))
    }

    fn name(&self) -> String {
        "counting".to_string()
    }
}

struct TrackedSession {
    cursor: Cursor<Arc<[u8]>>,
    counters: Arc<Counters>,
    fail_at: Option<u64>,
}

impl Read for TrackedSession {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.fail_at {
            Some(offset) if self.cursor.position() >= offset => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "corrupt entry",
            )),
            Some(offset) => {
                let left = usize::try_from(offset - self.cursor.position()).unwrap_or(usize::MAX);
                let len = buf.len().min(left);
                self.cursor.read(&mut buf[..len])
            }
            None => self.cursor.read(buf),
        }
    }
}

impl Drop for TrackedSession {
    fn drop(&mut self) {
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Reads `len` bytes at `position`, looping over short reads.
pub fn read_exact_at(
    channel: &mut stream_channel::Channel,
    position: u64,
    len: usize,
) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    let mut filled = 0;
    while filled < len {
        let read = channel
            .read_at(&mut buf[filled..], position + filled as u64)
            .expect("read at position");
        if read == 0 {
            break;
        }
        filled += read;
    }
    buf.truncate(filled);
    buf
}
