mod common;

use std::{io, sync::Arc, thread};

use common::{CountingSource, read_exact_at};
use stream_channel::{ChannelError, ChannelFactory, FnSource, Session, StreamSource};

#[test]
fn test_trusted_size_needs_no_session() {
    let source = CountingSource::new(b"0123456789");
    let counters = source.counters();
    let factory = ChannelFactory::new(Some(10), source);

    assert_eq!(factory.size().expect("size"), 10);
    assert_eq!(counters.opened(), 0);
}

#[test]
fn test_create_performs_no_io() {
    let source = CountingSource::new(b"0123456789");
    let counters = source.counters();
    let factory = ChannelFactory::new(Some(10), source);

    let channels: Vec<_> = (0..4).map(|_| factory.create()).collect();
    assert_eq!(channels.len(), 4);
    assert_eq!(counters.opened(), 0);
    assert_eq!(counters.live(), 0);
}

#[test]
fn test_unknown_size_is_probed_once() {
    let source = CountingSource::new(b"0123456789");
    let counters = source.counters();
    let factory = ChannelFactory::new(None, source);

    assert_eq!(counters.opened(), 1);
    assert_eq!(counters.live(), 0);

    let channel = factory.create();
    assert_eq!(channel.length().expect("length"), 10);
    assert_eq!(factory.create().length().expect("length"), 10);
    assert_eq!(counters.opened(), 1);
}

#[test]
fn test_truncation_salvage() {
    let data = vec![7u8; 60];
    let source = CountingSource::new(&data);
    let counters = source.counters();
    let factory = ChannelFactory::with_probe(Some(100), source, true);

    assert_eq!(factory.size().expect("size"), 60);
    assert_eq!(counters.opened(), 1);
    assert_eq!(counters.live(), 0);

    let mut channel = factory.create();
    assert_eq!(channel.length().expect("length"), 60);
    assert_eq!(read_exact_at(&mut channel, 50, 20), vec![7u8; 10]);

    let mut buf = [0u8; 8];
    assert_eq!(channel.read_at(&mut buf, 60).expect("read at end"), 0);
}

#[test]
fn test_probe_keeps_smaller_declared_size() {
    let factory = ChannelFactory::with_probe(Some(4), CountingSource::new(b"0123456789"), true);
    let mut channel = factory.create();

    assert_eq!(channel.length().expect("length"), 4);
    assert_eq!(read_exact_at(&mut channel, 0, 10), b"0123");
}

#[test]
fn test_empty_source() {
    let factory = ChannelFactory::new(None, CountingSource::new(b""));
    let mut channel = factory.create();

    assert_eq!(channel.length().expect("length"), 0);
    let mut buf = [0u8; 4];
    assert_eq!(channel.read_at(&mut buf, 0).expect("read"), 0);
}

#[test]
fn test_deferred_error_replays_on_every_length_call() {
    let source = CountingSource::new(b"0123456789");
    source.fail_next_opens(1);
    let counters = source.counters();
    let factory = ChannelFactory::with_probe(Some(10), source, true);

    assert!(factory.resolved().deferred_error().is_some());
    assert_eq!(factory.resolved().bound(), Some(10));

    let channel = factory.create();
    for _ in 0..3 {
        let err = channel.length().expect_err("length should fail");
        assert!(matches!(err, ChannelError::SizeUnresolved { .. }));
    }
    assert!(factory.size().is_err());
    assert_eq!(counters.opened(), 0);
}

#[test]
fn test_deferred_error_does_not_block_reads() {
    let source = CountingSource::new(b"0123456789");
    source.fail_next_opens(1);
    let factory = ChannelFactory::new(None, source);

    let mut channel = factory.create();
    assert!(channel.length().is_err());
    assert_eq!(read_exact_at(&mut channel, 0, 5), b"01234");
    assert_eq!(read_exact_at(&mut channel, 0, 64), b"0123456789");
}

#[test]
fn test_probe_read_error_is_deferred() {
    let source = CountingSource::new(b"0123456789").failing_at(6);
    let factory = ChannelFactory::new(None, source);

    let err = factory.size().expect_err("size should fail");
    let ChannelError::SizeUnresolved { source, .. } = err else {
        panic!("expected SizeUnresolved");
    };
    assert_eq!(source.kind(), io::ErrorKind::InvalidData);

    let mut channel = factory.create();
    assert_eq!(read_exact_at(&mut channel, 0, 5), b"01234");
}

#[test]
fn test_size_unresolved_converts_to_io_error() {
    let source = CountingSource::new(b"abc");
    source.fail_next_opens(1);
    let factory = ChannelFactory::new(None, source);

    let err = io::Error::from(factory.size().expect_err("size should fail"));
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn test_clones_share_descriptor() {
    let source = CountingSource::new(b"abcdefghij");
    let counters = source.counters();
    let factory = ChannelFactory::new(None, source);
    let clone = factory.clone();

    assert!(factory.ptr_eq(&clone));
    assert_eq!(clone.size().expect("size"), 10);
    assert_eq!(counters.opened(), 1);

    let other = ChannelFactory::new(Some(10), CountingSource::new(b"abcdefghij"));
    assert!(!factory.ptr_eq(&other));
}

#[test]
fn test_channels_read_concurrently() {
    let data: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
    let source = CountingSource::new(&data);
    let counters = source.counters();
    let factory = ChannelFactory::new(Some(data.len() as u64), source);

    let handles: Vec<_> = (0..8u64)
        .map(|i| {
            let factory = factory.clone();
            thread::spawn(move || {
                let mut channel = factory.create();
                let start = i * 8 * 1024;
                // Read the back half first to force a rewind on every thread.
                let back = read_exact_at(&mut channel, start + 4096, 4096);
                let front = read_exact_at(&mut channel, start, 4096);
                (start, [front, back].concat())
            })
        })
        .collect();

    for handle in handles {
        let (start, bytes) = handle.join().expect("reader thread");
        let start = usize::try_from(start).expect("start fits");
        assert_eq!(bytes, &data[start..start + 8 * 1024]);
    }
    assert_eq!(counters.opened(), 16);
    assert_eq!(counters.live(), 0);
}

#[test]
fn test_from_bytes() {
    let factory = ChannelFactory::from_bytes(b"hello world");
    let mut channel = factory.create();

    assert_eq!(factory.size().expect("size"), 11);
    assert_eq!(read_exact_at(&mut channel, 6, 5), b"world");
    assert_eq!(factory.source_name(), "<bytes>");
}

#[test]
fn test_from_source_uses_size_hint() {
    #[derive(Debug)]
    struct Hinted;

    impl StreamSource for Hinted {
        fn open(&self) -> io::Result<Session> {
            Ok(Box::new(io::Cursor::new(b"0123456789".to_vec())))
        }

        fn size_hint(&self) -> Option<u64> {
            Some(8)
        }
    }

    let factory = ChannelFactory::from_source(Hinted);
    assert_eq!(factory.size().expect("size"), 8);

    let mut channel = factory.create();
    assert_eq!(read_exact_at(&mut channel, 0, 10), b"01234567");
}

#[test]
fn test_fn_source() {
    let source = FnSource::new("letters", || {
        Ok(Box::new(io::Cursor::new(b"abcdef".to_vec())) as Session)
    });
    assert_eq!(source.name(), "letters");

    let factory = ChannelFactory::from_shared(None, Arc::new(source), false);
    assert_eq!(factory.size().expect("size"), 6);
    assert_eq!(factory.source_name(), "letters");

    let mut channel = factory.create();
    assert_eq!(read_exact_at(&mut channel, 3, 3), b"def");
    assert_eq!(read_exact_at(&mut channel, 0, 2), b"ab");
}
