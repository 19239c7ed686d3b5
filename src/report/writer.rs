//! Plain-text rendering of the report payload
//!
//! The writer owns the only side effect of report generation: walking the
//! payload and persisting one artifact per calendar day, named
//! `report_<YYYY-MM-DD>.txt`. Re-running on the same day overwrites that
//! day's artifact.

use crate::error::Result;
use crate::report::{Report, ReportLine};
use std::fs;
use std::path::{Path, PathBuf};

pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Renders and persists the report, creating the output directory when
    /// it does not exist yet. Returns the artifact path.
    pub fn write(&self, report: &Report) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("report_{}.txt", report.date));
        fs::write(&path, render(report))?;
        tracing::info!(path = %path.display(), "report artifact written");
        Ok(path)
    }
}

/// Renders the payload to its final text body.
///
/// Empty groups become a "No data." placeholder; nothing here recomputes or
/// reorders anything.
pub fn render(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&report.title);
    out.push('\n');

    for section in &report.sections {
        out.push('\n');
        out.push_str(&section.title);
        out.push('\n');
        for line in &section.lines {
            match line {
                ReportLine::Field { label, value } => {
                    out.push_str(&format!("{label}: {value}\n"));
                }
                ReportLine::Group { label, items } => {
                    out.push_str(&format!("{label}:\n"));
                    if items.is_empty() {
                        out.push_str("  No data.\n");
                    } else {
                        for item in items {
                            out.push_str(&format!("  {item}\n"));
                        }
                    }
                }
                ReportLine::Note(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
    }

    out
}
