pub mod aggregated;
pub mod criteria;
pub mod organization;
pub mod patch;
pub mod report;
pub mod requests;

pub use aggregated::AggregatedReport;
pub use criteria::{SuccessCriterion, SuccessCriterionUpdate, Status, WcagLevel};
pub use organization::OrganizationUnit;
pub use patch::Patch;
pub use report::{Author, Report, ReportSummary, ReportType};
pub use requests::{AggregatedReportChanges, AggregatedReportUpdateRequest, NewAggregatedReportRequest};
