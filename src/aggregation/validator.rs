//! Turns a request for a new aggregated report into the concrete set of
//! single reports it should be built from.

use std::collections::HashSet;
use tracing::debug;
use crate::db::Database;
use crate::errors::ReportError;
use crate::models::{NewAggregatedReportRequest, Report, ReportType};
use crate::utils::formatting::join_ids;
use super::dates::{parse_request_date, DateRange};

/// How a request selects its source reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSelection {
    /// Explicit ids, narrowed to those changed within the range.
    IdsInRange { ids: Vec<String>, range: DateRange },
    Ids(Vec<String>),
    /// Every single report changed within the range.
    Range(DateRange),
    Neither,
}

impl SourceSelection {
    pub fn from_request(request: &NewAggregatedReportRequest) -> Result<Self, ReportError> {
        let ids = distinct_ids(request.reports.as_deref().unwrap_or_default());
        let has_range = request.start_date.is_some() && request.end_date.is_some();

        if ids.is_empty() && !has_range {
            return Err(ReportError::BadRequest(
                "Aggregated report request must contain a list of report ids, or both startDate and endDate".into(),
            ));
        }

        let start = request.start_date.as_deref().map(parse_request_date).transpose()?;
        let end = request.end_date.as_deref().map(parse_request_date).transpose()?;
        let range = match (start, end) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)?),
            _ => None,
        };

        Ok(match (ids.is_empty(), range) {
            (false, Some(range)) => SourceSelection::IdsInRange { ids, range },
            (false, None) => SourceSelection::Ids(ids),
            (true, Some(range)) => SourceSelection::Range(range),
            (true, None) => SourceSelection::Neither,
        })
    }

    /// Fetches the reports this selection names. Fails when nothing matches.
    pub fn resolve(&self, db: &Database) -> Result<Vec<Report>, ReportError> {
        match self {
            SourceSelection::IdsInRange { ids, range } => {
                let found = db.get_reports(ids)?;
                let fetched = found.len();
                let in_range: Vec<Report> = found
                    .into_iter()
                    .filter(|r| range.contains(&r.last_changed))
                    .collect();
                debug!(requested = ids.len(), fetched, in_range = in_range.len(), "Filtered source reports by date");
                if in_range.is_empty() {
                    return Err(ReportError::BadRequest(format!(
                        "None of the reports with ids {} were changed between {}",
                        join_ids(ids), range
                    )));
                }
                Ok(in_range)
            }
            SourceSelection::Ids(ids) => {
                let found = db.get_reports(ids)?;
                if found.is_empty() {
                    return Err(ReportError::BadRequest(format!(
                        "Could not find reports with ids {}",
                        join_ids(ids)
                    )));
                }
                if found.len() != ids.len() {
                    return Err(ReportError::BadRequest(format!(
                        "Could not find reports with ids {}",
                        join_ids(&missing_ids(ids, &found))
                    )));
                }
                Ok(found)
            }
            SourceSelection::Range(range) => {
                let found = db.get_reports_by_date_range(&range.start, &range.end, ReportType::Single)?;
                if found.is_empty() {
                    return Err(ReportError::BadRequest(format!(
                        "No reports found that were changed between {}",
                        range
                    )));
                }
                Ok(found)
            }
            SourceSelection::Neither => Err(ReportError::BadRequest(
                "Aggregated report request selects no source reports".into(),
            )),
        }
    }
}

/// Validates `request` and returns the reports a new aggregated report
/// should be built from.
pub fn resolve_source_reports(
    db: &Database,
    request: &NewAggregatedReportRequest,
) -> Result<Vec<Report>, ReportError> {
    let selection = SourceSelection::from_request(request)?;
    let sources = selection.resolve(db)?;

    let aggregated: Vec<&str> = sources
        .iter()
        .filter(|r| r.is_aggregated())
        .map(|r| r.report_id.as_str())
        .collect();
    if !aggregated.is_empty() {
        return Err(ReportError::BadRequest(format!(
            "report with ids {} are aggregated reports and are not valid sources for a new aggregated report",
            join_ids(&aggregated)
        )));
    }

    Ok(sources)
}

fn distinct_ids(ids: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(ids.len());
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

fn missing_ids(requested: &[String], found: &[Report]) -> Vec<String> {
    let found: HashSet<&str> = found.iter().map(|r| r.report_id.as_str()).collect();
    requested
        .iter()
        .filter(|id| !found.contains(id.as_str()))
        .cloned()
        .collect()
}
