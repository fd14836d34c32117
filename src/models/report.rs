use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::auth::User;
use crate::utils::time;
use super::criteria::SuccessCriterion;
use super::organization::OrganizationUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    Single,
    Aggregated,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Single => "SINGLE",
            ReportType::Aggregated => "AGGREGATED",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub email: String,
    pub oid: String,
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            oid: user.oid.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub report_id: String,
    pub url: String,
    pub descriptive_name: Option<String>,
    pub report_type: ReportType,
    pub organization_unit: Option<OrganizationUnit>,
    pub author: Author,
    pub created: DateTime<Utc>,
    pub last_changed: DateTime<Utc>,
    #[serde(default)]
    pub last_updated_by: Option<Author>,
    #[serde(default)]
    pub success_criteria: Vec<SuccessCriterion>,
}

/// Snapshot of a source report, frozen into an aggregated report when it
/// is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub report_id: String,
    pub url: String,
    pub descriptive_name: Option<String>,
    pub organization_unit_name: Option<String>,
    pub last_changed: DateTime<Utc>,
}

impl Report {
    pub fn new_single(
        url: String,
        descriptive_name: Option<String>,
        organization_unit: Option<OrganizationUnit>,
        user: &User,
        success_criteria: Vec<SuccessCriterion>,
    ) -> Self {
        let now = time::now();
        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            url,
            descriptive_name,
            report_type: ReportType::Single,
            organization_unit,
            author: Author::from(user),
            created: now,
            last_changed: now,
            last_updated_by: None,
            success_criteria,
        }
    }

    pub fn is_aggregated(&self) -> bool {
        self.report_type == ReportType::Aggregated
    }

    pub fn display_name(&self) -> &str {
        self.descriptive_name.as_deref().unwrap_or("N/A")
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            report_id: self.report_id.clone(),
            url: self.url.clone(),
            descriptive_name: self.descriptive_name.clone(),
            organization_unit_name: self.organization_unit.as_ref().map(|o| o.name.clone()),
            last_changed: self.last_changed,
        }
    }

    /// Records a mutation by `user`.
    pub fn touch(&mut self, user: &User) {
        self.last_changed = time::next_change(self.last_changed);
        self.last_updated_by = Some(Author::from(user));
    }
}
