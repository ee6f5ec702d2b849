//! `stream-channel` reads a byte range from a source through seekable channels.

pub(crate) mod args;
pub(crate) mod report;

use std::process;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use log::debug;
use report::Report;
use stream_channel::{
    ChannelFactory, Config, Input, Output, Processing, exit_code::ExitCode, fanout,
};

fn main() -> process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => ExitCode::Success.into(),
        Err(err) => {
            if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
                clap_err.print().ok();
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::from_error(&err).into()
        }
    }
}

fn run() -> Result<()> {
    let args = Args::try_parse()?;
    let options = args.options();
    options.init_thread_pool_if_parallel()?;

    let input = Input::new(&args.input, options.io())
        .with_context(|| format!("failed to open input: {}", args.input))?;
    let source = input.source();
    let declared_size = args.declared_size.or_else(|| input.size());
    let factory = ChannelFactory::with_probe(declared_size, input, args.probe);

    let mut output = Output::new(args.output.as_deref())?;
    let report = Report::new(
        &source,
        &options,
        declared_size,
        args.probe,
        &factory,
        args.offset,
    );

    if args.stat {
        report.write(&mut output, options.format())?;
        return output.flush();
    }

    let bound = factory.resolved().bound();
    let end = args
        .length
        .map(|length| args.offset.saturating_add(length))
        .map(|end| bound.map_or(end, |size| end.min(size)))
        .or(bound);

    let written = match (options.processing(), end) {
        (Processing::Parallel, Some(end)) => {
            let bytes = fanout::read_range(
                &factory,
                args.offset..end,
                Processing::Parallel,
                options.chunk_size(),
            )?;
            output.write_bytes(&bytes)?;
            bytes.len() as u64
        }
        (processing, end) => {
            if processing == Processing::Parallel {
                debug!("size of {source} is unknown, reading sequentially");
            }
            copy_range(&factory, args.offset, end, &mut output)?
        }
    };
    output.flush()?;

    if args.verbose {
        let mut stderr = Output::stderr();
        report
            .with_bytes_written(written)
            .write(&mut stderr, options.format())?;
        stderr.flush()?;
    }

    Ok(())
}

/// Streams `start..end` (or `start..` to end of data) through one channel.
fn copy_range(
    factory: &ChannelFactory,
    start: u64,
    end: Option<u64>,
    output: &mut Output,
) -> Result<u64> {
    let mut channel = factory.create();
    let mut buf = vec![0u8; Config::from_env().buffer_size()];
    let mut position = start;

    loop {
        let want = end.map_or(buf.len(), |end| {
            usize::try_from(end.saturating_sub(position)).map_or(buf.len(), |left| left.min(buf.len()))
        });
        if want == 0 {
            break;
        }

        let read = channel.read_at(&mut buf[..want], position)?;
        if read == 0 {
            break;
        }
        output.write_bytes(&buf[..read])?;
        position += read as u64;
    }
    channel.close();

    Ok(position - start)
}
