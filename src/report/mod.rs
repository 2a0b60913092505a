//! Discharge report rendering.
//!
//! `render` is a pure function of a `DischargeSummary`: the chart is drawn
//! into a scoped temporary directory, embedded in an A4 PDF, and every piece
//! of document metadata is derived from the summary itself. Rendering the same
//! summary twice yields the same bytes.

pub mod chart;
pub mod pdf;
pub mod preview;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::DischargeSummary;

pub use chart::ChartImage;
pub use preview::render_preview;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Chart rendering failed: {0}")]
    Chart(String),

    #[error("Chart image could not be embedded: {0}")]
    Image(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// A rendered discharge report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    file_name: String,
    bytes: Vec<u8>,
}

impl Report {
    pub const MIME_TYPE: &'static str = "application/pdf";

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Writes the report under `dir` (created if missing) and returns the file path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        tracing::info!(path = %path.display(), size = self.bytes.len(), "Report written");
        Ok(path)
    }
}

/// Renders the full discharge report.
pub fn render(summary: &DischargeSummary) -> Result<Report, ReportError> {
    let span = tracing::info_span!("render_report", patient_id = %summary.patient.patient_id);
    let _guard = span.enter();

    let chart = ChartImage::render(&summary.trajectory)?;
    let bytes = pdf::compose(summary, &chart)?;
    // Chart directory is removed here, before the report leaves this function.
    drop(chart);

    tracing::info!(size = bytes.len(), "Discharge report rendered");
    Ok(Report {
        file_name: summary.report_file_name(),
        bytes,
    })
}
