use std::path::PathBuf;

use clap::Parser;
use stream_channel::{Format, Io, Options, Processing, Threads};

#[derive(Debug, Parser)]
#[command(about, version)]
pub(crate) struct Args {
    /// File path to use as input rather than stdin ("-").
    #[arg(default_value = "-", value_name = "PATH")]
    pub(crate) input: String,

    /// Byte offset to start reading at.
    #[arg(short = 's', long, default_value_t = 0, value_name = "BYTES")]
    pub(crate) offset: u64,

    /// Number of bytes to read (default: to the end).
    #[arg(short = 'n', long, value_name = "BYTES")]
    pub(crate) length: Option<u64>,

    /// Trust this size instead of the source's own.
    #[arg(short = 'd', long, value_name = "BYTES")]
    pub(crate) declared_size: Option<u64>,

    /// Probe the source even when the size is known, keeping the smaller size.
    #[arg(short = 'p', long)]
    pub(crate) probe: bool,

    /// I/O strategy (default: STREAM_CHANNEL_IO or streamed).
    #[arg(short = 'I', long, value_enum, value_name = "STRATEGY")]
    pub(crate) io: Option<Io>,

    /// Read through parallel channels.
    #[arg(short = 'P', long)]
    pub(crate) parallel: bool,

    /// Bytes per channel when reading in parallel.
    #[arg(short = 'c', long, value_name = "BYTES")]
    pub(crate) chunk_size: Option<u64>,

    /// Number of threads for parallel reads.
    #[arg(short = 't', long, value_name = "COUNT")]
    pub(crate) threads: Option<u16>,

    /// Write a size report instead of the data.
    #[arg(long)]
    pub(crate) stat: bool,

    /// Report format.
    #[arg(short = 'f', long, default_value_t, value_enum, value_name = "FORMAT")]
    pub(crate) format: Format,

    /// Write output to file rather than stdout.
    #[arg(short, long, value_name = "PATH")]
    pub(crate) output: Option<PathBuf>,

    /// Print verbose details.
    #[arg(short = 'v', long)]
    pub(crate) verbose: bool,
}

impl Args {
    /// Builds `Options` from the arguments, falling back to the environment.
    pub(crate) fn options(&self) -> Options {
        let mut options = Options::from_env()
            .with_processing(Processing::from(self.parallel))
            .with_format(self.format);

        if let Some(io) = self.io {
            options = options.with_io(io);
        }
        if let Some(size) = self.chunk_size {
            options = options.with_chunk_size(size);
        }
        if let Some(count) = self.threads {
            options = options.with_threads(Threads::Count(count));
        }

        options
    }
}
