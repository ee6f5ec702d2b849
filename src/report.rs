//! Size and verbose reports for the command line.

use anyhow::{Context, Result};
use serde::Serialize;
use stream_channel::{ChannelError, ChannelFactory, Format, Options, Output};

/// Report data that can be serialized to text, JSON and CSV.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Report<'a> {
    source: &'a str,
    io: String,
    declared_size: Option<u64>,
    probe: bool,
    size: Option<u64>,
    size_error: Option<String>,
    processing: String,
    offset: u64,
    bytes_written: Option<u64>,
}

impl<'a> Report<'a> {
    /// Create from a factory and the options it was read with.
    pub(crate) fn new(
        source: &'a str,
        options: &Options,
        declared_size: Option<u64>,
        probe: bool,
        factory: &ChannelFactory,
        offset: u64,
    ) -> Self {
        Self {
            source,
            io: options.io().to_string(),
            declared_size,
            probe,
            size: factory.size().ok(),
            size_error: factory
                .resolved()
                .deferred_error()
                .map(ToString::to_string),
            processing: options.processing().to_string(),
            offset,
            bytes_written: None,
        }
    }

    /// Records how many bytes were written.
    pub(crate) const fn with_bytes_written(mut self, bytes: u64) -> Self {
        self.bytes_written = Some(bytes);
        self
    }

    /// Get all fields as name-value pairs.
    fn field_pairs(&self) -> Vec<(&'static str, String)> {
        fn or_none<T: ToString>(value: Option<&T>) -> String {
            value.map_or_else(|| "none".to_string(), ToString::to_string)
        }

        vec![
            ("source", self.source.to_string()),
            ("io", self.io.clone()),
            ("declared-size", or_none(self.declared_size.as_ref())),
            ("probe", self.probe.to_string()),
            ("size", or_none(self.size.as_ref())),
            ("size-error", or_none(self.size_error.as_ref())),
            ("processing", self.processing.clone()),
            ("offset", self.offset.to_string()),
            ("bytes-written", or_none(self.bytes_written.as_ref())),
        ]
    }

    /// Writes the report in `format`.
    pub(crate) fn write(&self, output: &mut Output, format: Format) -> Result<()> {
        match format {
            Format::Json => self.write_json(output),
            Format::Csv => self.write_csv(output),
            Format::Text => self.write_text(output),
        }
    }

    fn write_json(&self, output: &mut Output) -> Result<()> {
        let json = serde_json::to_string(self).map_err(ChannelError::Json)?;

        output
            .write_line(&format!("{json}\n"))
            .context("failed to write JSON report")
    }

    fn write_csv(&self, output: &mut Output) -> Result<()> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        let field_pairs = self.field_pairs();

        writer
            .write_record(field_pairs.iter().map(|(name, _)| *name))
            .map_err(ChannelError::Csv)?;
        writer
            .write_record(field_pairs.iter().map(|(_, value)| value))
            .map_err(ChannelError::Csv)?;

        let data = writer.into_inner().context("failed to flush CSV report")?;
        let csv = String::from_utf8(data).context("failed to convert CSV report to UTF-8")?;

        output.write_line(&csv).context("failed to write CSV report")
    }

    fn write_text(&self, output: &mut Output) -> Result<()> {
        self.field_pairs()
            .into_iter()
            .try_for_each(|(field_name, value)| output.write_line(&format!("{field_name} {value}\n")))
            .context("failed to write report")
    }
}
