use stream_channel::{Config, Format, Io, Options, Processing, Threads};

#[test]
fn test_default_options() {
    let options = Options::default();
    assert_eq!(options.io(), Io::Streamed);
    assert_eq!(options.processing(), Processing::Sequential);
    assert_eq!(options.threads(), Threads::All);
    assert_eq!(options.format(), Format::Text);
    assert!(options.chunk_size() >= 1);
}

#[test]
fn test_builders() {
    let options = Options::default()
        .with_io(Io::Buffered)
        .with_processing(Processing::Parallel)
        .with_threads(Threads::Count(3))
        .with_format(Format::Csv)
        .with_chunk_size(4096);

    assert_eq!(options.io(), Io::Buffered);
    assert_eq!(options.processing(), Processing::Parallel);
    assert_eq!(options.threads().count(), 3);
    assert_eq!(options.format(), Format::Csv);
    assert_eq!(options.chunk_size(), 4096);
}

#[test]
fn test_zero_chunk_size_is_one_byte() {
    assert_eq!(Options::default().with_chunk_size(0).chunk_size(), 1);
}

#[test]
fn test_display() {
    let options = Options::default()
        .with_io(Io::MemoryMapped)
        .with_chunk_size(10);
    let shown = options.to_string();

    assert!(shown.contains("io: memory-mapped"));
    assert!(shown.contains("processing: sequential"));
    assert!(shown.contains("chunk_size: 10"));
    assert_eq!(Threads::Count(4).to_string(), "4");
}

#[test]
fn test_processing_from_flag() {
    assert_eq!(Processing::from(true), Processing::Parallel);
    assert_eq!(Processing::from(false), Processing::Sequential);
    assert!(Processing::Sequential.initialize(Threads::Count(1)).is_ok());
}

#[test]
fn test_options_serialize() {
    let options = Options::default().with_io(Io::Buffered).with_chunk_size(8);
    let json = serde_json::to_string(&options).expect("serialize");
    assert!(json.contains(r#""io":"buffered""#));

    let back: Options = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, options);
}

#[test]
fn test_config_builders() {
    let config = Config::default()
        .with_buffer_size(1024)
        .with_skip_buffer_size(2048)
        .with_chunk_size(4096);

    assert_eq!(config.buffer_size(), 1024);
    assert_eq!(config.skip_buffer_size(), 2048);
    assert_eq!(config.chunk_size(), 4096);
    assert_eq!(Config::new(1, 2, 3).skip_buffer_size(), 2);
}
