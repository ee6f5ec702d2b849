use std::{error::Error as _, io, sync::Arc};

use stream_channel::ChannelError;

#[test]
fn test_closed_is_broken_pipe() {
    let err = io::Error::from(ChannelError::ChannelClosed);
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(err.to_string(), "channel is closed");
}

#[test]
fn test_wrapped_io_kinds_survive_conversion() {
    let unavailable = ChannelError::SourceUnavailable {
        source_name: "entry.bin".to_string(),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert_eq!(unavailable.io_kind(), Some(io::ErrorKind::PermissionDenied));
    assert_eq!(
        io::Error::from(unavailable).kind(),
        io::ErrorKind::PermissionDenied
    );

    let read = ChannelError::Read {
        position: 42,
        source: io::Error::new(io::ErrorKind::UnexpectedEof, "short"),
    };
    assert_eq!(io::Error::from(read).kind(), io::ErrorKind::UnexpectedEof);
}

#[test]
fn test_bounds_violation_is_invalid_data() {
    let err = ChannelError::BoundsViolation {
        position: 7,
        consumed: 9,
        size: None,
    };
    assert_eq!(err.io_kind(), None);
    assert!(err.to_string().contains("position 7"));
    assert_eq!(io::Error::from(err).kind(), io::ErrorKind::InvalidData);
}

#[test]
fn test_usage_errors_are_invalid_input() {
    for err in [
        ChannelError::MmapStdin,
        ChannelError::Usage("x".to_string()),
        ChannelError::Config("y".to_string()),
    ] {
        assert_eq!(io::Error::from(err).kind(), io::ErrorKind::InvalidInput);
    }
}

#[test]
fn test_size_unresolved_shares_probe_error() {
    let probe = Arc::new(io::Error::new(io::ErrorKind::InvalidData, "bad entry"));
    let first = ChannelError::SizeUnresolved {
        source_name: "entry.bin".to_string(),
        source: Arc::clone(&probe),
    };
    let second = ChannelError::SizeUnresolved {
        source_name: "entry.bin".to_string(),
        source: Arc::clone(&probe),
    };

    assert_eq!(Arc::strong_count(&probe), 3);
    assert_eq!(first.to_string(), second.to_string());
    assert!(first.to_string().contains("entry.bin"));
    assert_eq!(
        first.source().map(ToString::to_string),
        Some("bad entry".to_string())
    );
}

#[test]
fn test_io_error_message() {
    let err = ChannelError::Io {
        path: "/tmp/missing".to_string(),
        message: "no such file".to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "not found"),
    };
    assert_eq!(err.to_string(), "no such file: /tmp/missing");
}
