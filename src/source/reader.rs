//! Session readers over shared in-memory and memory-mapped data.

use std::{
    cmp,
    io::{self, BufRead, Read},
    sync::Arc,
};

use memmap2::Mmap;

const BUFFER_SIZE: usize = 8192;

/// A reader that allows a shared memory map to be used as a `'static` session.
#[derive(Clone, Debug)]
pub struct MmapReader {
    mmap: Arc<Mmap>,
    position: usize,
}

impl MmapReader {
    pub const fn new(mmap: Arc<Mmap>) -> Self {
        Self { mmap, position: 0 }
    }
}

/// A `BufRead` implementation for zero-copy, 8KB-buffered reading
impl BufRead for MmapReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(window(&self.mmap, self.position))
    }

    fn consume(&mut self, amt: usize) {
        self.position = cmp::min(self.position + amt, self.mmap.len());
    }
}

impl Read for MmapReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let amt = copy_from(&self.mmap, self.position, buf);
        self.position += amt;

        Ok(amt)
    }
}

/// A reader that allows shared bytes to be used as a `'static` session.
#[derive(Clone, Debug)]
pub struct BytesReader {
    bytes: Arc<[u8]>,
    position: usize,
}

impl BytesReader {
    pub const fn new(bytes: Arc<[u8]>) -> Self {
        Self { bytes, position: 0 }
    }
}

impl BufRead for BytesReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(window(&self.bytes, self.position))
    }

    fn consume(&mut self, amt: usize) {
        self.position = cmp::min(self.position + amt, self.bytes.len());
    }
}

impl Read for BytesReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let amt = copy_from(&self.bytes, self.position, buf);
        self.position += amt;

        Ok(amt)
    }
}

fn window(data: &[u8], position: usize) -> &[u8] {
    let start = cmp::min(position, data.len());
    let end = cmp::min(start + BUFFER_SIZE, data.len());

    &data[start..end]
}

fn copy_from(data: &[u8], position: usize, buf: &mut [u8]) -> usize {
    let remaining = data.len().saturating_sub(position);
    let amt = remaining.min(buf.len());
    buf[..amt].copy_from_slice(&data[position..][..amt]);

    amt
}
