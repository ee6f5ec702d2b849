//! Reading one range through many channels.
//!
//! A channel is single-owner, so concurrent readers each get their own. The
//! range is cut into chunks, every chunk is read by a fresh channel from the
//! same factory, and the chunks are joined back in order.

use std::ops::Range;

use log::debug;
use rayon::prelude::*;

use crate::{ChannelError, ChannelFactory, Config, Processing};

/// Splits `range` into consecutive chunks of at most `chunk_size` bytes.
pub fn chunk_ranges(range: Range<u64>, chunk_size: u64) -> Vec<Range<u64>> {
    let step = chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut start = range.start;

    while start < range.end {
        let end = start.saturating_add(step).min(range.end);
        chunks.push(start..end);
        start = end;
    }

    chunks
}

/// Cuts `range` down to the resolved size, when the size is known.
fn clamp_to_size(factory: &ChannelFactory, range: Range<u64>) -> Range<u64> {
    match factory.resolved().bound() {
        Some(size) => range.start.min(size)..range.end.min(size),
        None => range,
    }
}

/// Reads `range` through one channel, stopping early at end of data.
///
/// Memory grows with the bytes actually read, so a range reaching far past
/// the end of the data is cheap.
///
/// # Errors
///
/// Any error from [`Channel::read_at`](crate::Channel::read_at).
pub fn read_chunk(factory: &ChannelFactory, range: Range<u64>) -> Result<Vec<u8>, ChannelError> {
    let range = clamp_to_size(factory, range);
    let cap = usize::try_from(range.end.saturating_sub(range.start))
        .unwrap_or(usize::MAX)
        .min(Config::from_env().buffer_size());
    let mut channel = factory.create();
    let mut scratch = vec![0u8; cap];
    let mut bytes = Vec::with_capacity(cap);
    let mut position = range.start;

    while position < range.end {
        let want = usize::try_from(range.end - position).map_or(cap, |left| left.min(cap));
        let read = channel.read_at(&mut scratch[..want], position)?;
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&scratch[..read]);
        position += read as u64;
    }
    channel.close();

    Ok(bytes)
}

/// Reads `range` in chunks of `chunk_size`, one channel per chunk.
///
/// The result is the bytes of `range` that exist, in order. The range is
/// clamped to the resolved size first. With an unknown size there is nothing
/// to split on, so the range is read through a single channel. With
/// `Processing::Parallel` the chunks are read on the rayon pool.
///
/// # Errors
///
/// The first error from any chunk.
pub fn read_range(
    factory: &ChannelFactory,
    range: Range<u64>,
    processing: Processing,
    chunk_size: u64,
) -> Result<Vec<u8>, ChannelError> {
    if factory.resolved().bound().is_none() {
        debug!(
            "size of {} is unknown, reading {range:?} through one channel",
            factory.source_name()
        );
        return read_chunk(factory, range);
    }

    let chunks = chunk_ranges(clamp_to_size(factory, range), chunk_size);
    debug!(
        "reading {} chunks from {} ({processing})",
        chunks.len(),
        factory.source_name()
    );

    let parts: Vec<Vec<u8>> = match processing {
        Processing::Sequential => chunks
            .into_iter()
            .map(|chunk| read_chunk(factory, chunk))
            .collect::<Result<_, _>>()?,
        Processing::Parallel => chunks
            .into_par_iter()
            .map(|chunk| read_chunk(factory, chunk))
            .collect::<Result<_, _>>()?,
    };

    Ok(parts.concat())
}
