use serde::Deserialize;
use super::criteria::SuccessCriterionUpdate;
use super::organization::OrganizationUnit;
use super::patch::Patch;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAggregatedReportRequest {
    pub descriptive_name: String,
    pub url: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub reports: Option<Vec<String>>,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedReportUpdateRequest {
    #[serde(default)]
    pub descriptive_name: Patch<String>,
    #[serde(default)]
    pub url: Patch<String>,
    #[serde(default)]
    pub notes: Patch<String>,
    #[serde(default)]
    pub success_criteria: Patch<Vec<SuccessCriterionUpdate>>,
    #[serde(default)]
    pub team_id: Patch<String>,
}

/// An update with the team reference already resolved against the store.
#[derive(Debug, Clone, Default)]
pub struct AggregatedReportChanges {
    pub descriptive_name: Patch<String>,
    pub url: Patch<String>,
    pub notes: Patch<String>,
    pub success_criteria: Patch<Vec<SuccessCriterionUpdate>>,
    pub organization_unit: Patch<Option<OrganizationUnit>>,
}

impl AggregatedReportUpdateRequest {
    pub fn into_changes(self, organization_unit: Patch<Option<OrganizationUnit>>) -> AggregatedReportChanges {
        AggregatedReportChanges {
            descriptive_name: self.descriptive_name,
            url: self.url,
            notes: self.notes,
            success_criteria: self.success_criteria,
            organization_unit,
        }
    }
}
