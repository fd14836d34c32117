use serde::{Deserialize, Serialize};
use crate::models::{ReportType, SuccessCriterion};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReportRequest {
    pub url: String,
    pub descriptive_name: Option<String>,
    pub team_id: Option<String>,
    #[serde(default)]
    pub success_criteria: Vec<SuccessCriterion>,
}

#[derive(Deserialize)]
pub struct NewTeamRequest {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsResponse {
    pub total_reports: usize,
    pub reports_with_null_organization_unit: usize,
    pub null_org_report_ids: Vec<ReportDiagnostic>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDiagnostic {
    pub report_id: String,
    pub url: String,
    pub descriptive_name: String,
    pub report_type: ReportType,
}
