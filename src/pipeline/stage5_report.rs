use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::pipeline::RunError;
use crate::report::RunReport;
use crate::report::json::render_report_json;
use crate::report::text::render_report_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Both,
}

impl ReportFormat {
    fn text(self) -> bool {
        matches!(self, ReportFormat::Text | ReportFormat::Both)
    }

    fn json(self) -> bool {
        matches!(self, ReportFormat::Json | ReportFormat::Both)
    }
}

/// Writes `report.txt` and/or `report.json` into `out_dir`, returning the written paths.
pub fn write_reports(
    report: &RunReport,
    out_dir: &Path,
    format: ReportFormat,
) -> Result<Vec<PathBuf>, RunError> {
    fs::create_dir_all(out_dir).map_err(|source| RunError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    if format.text() {
        let path = out_dir.join("report.txt");
        write_text(&path, &render_report_text(report))?;
        written.push(path);
    }
    if format.json() {
        let path = out_dir.join("report.json");
        write_text(&path, &render_report_json(report)?)?;
        written.push(path);
    }
    for path in &written {
        tracing::info!(path = %path.display(), "wrote report");
    }
    Ok(written)
}

/// Renders the report for stdout. With `Both`, the text report comes first.
pub fn render_reports(report: &RunReport, format: ReportFormat) -> Result<String, RunError> {
    let mut out = String::new();
    if format.text() {
        out.push_str(&render_report_text(report));
    }
    if format.json() {
        out.push_str(&render_report_json(report)?);
    }
    Ok(out)
}

fn write_text(path: &Path, contents: &str) -> Result<(), RunError> {
    let io_err = |source| RunError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    w.write_all(contents.as_bytes()).map_err(io_err)?;
    w.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
