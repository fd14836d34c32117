pub mod admin;
pub mod aggregated;
pub mod health;
pub mod reports;
pub mod teams;

use crate::errors::ReportError;

/// Path ids that are blank after trimming count as missing. Other ids are
/// passed on exactly as given.
pub(crate) fn require_path_id(id: &str) -> Result<&str, ReportError> {
    if id.trim().is_empty() {
        return Err(ReportError::missing_path_parameter("id"));
    }
    Ok(id)
}
