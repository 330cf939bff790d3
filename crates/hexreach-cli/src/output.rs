//! Output formatting for distance reports.

use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;

use hexreach_lib::DistanceReport;

/// Rendering selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per distance ring.
    Text,
    /// Pretty-printed JSON report.
    Json,
}

pub fn print_report(report: &DistanceReport, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match format {
        OutputFormat::Text => handle.write_all(report.render_text().as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, report)?;
            writeln!(handle)?;
        }
    }
    Ok(())
}
