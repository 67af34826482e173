//! Output formatting for query results.
//!
//! Results are printed as a pretty JSON report on stdout or written as CSV.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Envelope around every query result printed by the CLI.
#[derive(Debug, Serialize)]
pub struct Report<T: Serialize> {
    pub generated_at: DateTime<Utc>,
    pub query: String,
    pub dimension: Option<String>,
    pub filter: Option<String>,
    pub data: T,
}

impl<T: Serialize> Report<T> {
    pub fn new(query: &str, data: T) -> Self {
        Report {
            generated_at: Utc::now(),
            query: query.to_string(),
            dimension: None,
            filter: None,
            data,
        }
    }

    pub fn with_selection(mut self, dimension: &str, filter: Option<&str>) -> Self {
        self.dimension = Some(dimension.to_string());
        self.filter = filter.map(str::to_string);
        self
    }
}

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(mut writer: W, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Prints `value` as pretty-printed JSON on stdout.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    write_json(std::io::stdout().lock(), value)
}

/// Writes `rows` to a CSV file at `path`, replacing any existing file.
pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "CSV table written");
    Ok(())
}
