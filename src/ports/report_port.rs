//! Report output port trait.

use crate::domain::error::CandlesimError;
use crate::domain::report::TimeframeSummary;

/// Port for writing comparison reports.
pub trait ReportPort {
    fn write(
        &self,
        summaries: &[TimeframeSummary],
        recommended: Option<&TimeframeSummary>,
    ) -> Result<(), CandlesimError>;
}
