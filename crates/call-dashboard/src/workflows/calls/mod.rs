//! Daily call activity: loading, per-row metric derivation, aggregation and
//! the dashboard presentation seam.

mod cache;
pub mod deriver;
pub mod domain;
mod importer;
pub mod playbook;
pub mod report;

pub use cache::{CallLogSession, SourceKey};
pub use deriver::RawCallRow;
pub use domain::{CallMetric, CallRecord};
pub use importer::{CallLogImportError, CallLogImporter};
pub use playbook::{AutomationPlaybook, PlaybookError};
pub use report::{CallReport, CallReportSummary, DashboardPresenter};
