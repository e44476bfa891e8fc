//! JSON report adapter implementing ReportPort.
//!
//! Emits one pretty-printed document:
//! `{"results": [...], "recommended": {...} | null}`
//! to a file, or to stdout when no path is given.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::error::CandlesimError;
use crate::domain::report::TimeframeSummary;
use crate::ports::report_port::ReportPort;

#[derive(Serialize)]
struct ReportDocument<'a> {
    results: &'a [TimeframeSummary],
    recommended: Option<&'a TimeframeSummary>,
}

pub struct JsonReportAdapter {
    output: Option<PathBuf>,
}

impl JsonReportAdapter {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }

    pub fn render(
        summaries: &[TimeframeSummary],
        recommended: Option<&TimeframeSummary>,
    ) -> Result<String, CandlesimError> {
        let doc = ReportDocument {
            results: summaries,
            recommended,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(
        &self,
        summaries: &[TimeframeSummary],
        recommended: Option<&TimeframeSummary>,
    ) -> Result<(), CandlesimError> {
        let body = Self::render(summaries, recommended)?;
        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, body + "\n")?;
            }
            None => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{body}")?;
            }
        }
        Ok(())
    }
}
