//! Report Export Module
//! Writes the region summaries to a JSON report.

use crate::stats::RegionSummary;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Top-level JSON document.
#[derive(Serialize)]
struct Report<'a> {
    title: &'a str,
    region_count: usize,
    district_count: usize,
    regions: &'a [RegionSummary],
}

/// Exports dashboard results for use outside the app
pub struct ReportExporter;

impl ReportExporter {
    /// Render the report as pretty-printed JSON.
    pub fn to_json_string(summaries: &[RegionSummary], title: &str) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&Self::report(summaries, title))?)
    }

    /// Write the report to `output_path`, replacing any existing file.
    pub fn export_json(
        summaries: &[RegionSummary],
        output_path: &Path,
        title: &str,
    ) -> Result<(), ExportError> {
        let file = File::create(output_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &Self::report(summaries, title))?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        tracing::info!(
            path = %output_path.display(),
            regions = summaries.len(),
            "exported report"
        );
        Ok(())
    }

    fn report<'a>(summaries: &'a [RegionSummary], title: &'a str) -> Report<'a> {
        Report {
            title,
            region_count: summaries.len(),
            district_count: summaries.iter().map(|s| s.sub_regions.len()).sum(),
            regions: summaries,
        }
    }
}
