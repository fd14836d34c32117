use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use crate::api::auth::AdminUser;
use crate::api::models::{DiagnosticsResponse, ReportDiagnostic};
use crate::api::AppState;
use crate::errors::ReportError;
use super::require_path_id;

pub async fn delete_team(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ReportError> {
    let id = require_path_id(&id)?;
    let deleted = state.db.delete_org_unit(id)?;
    info!(team_id = %id, deleted, by = %user.username(), "Deleted organization unit");
    Ok(StatusCode::OK)
}

pub async fn diagnostics(
    AdminUser(_user): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<DiagnosticsResponse>, ReportError> {
    let reports = state.db.list_reports()?;
    let without_unit: Vec<ReportDiagnostic> = reports
        .iter()
        .filter(|r| r.organization_unit.is_none())
        .map(|r| ReportDiagnostic {
            report_id: r.report_id.clone(),
            url: r.url.clone(),
            descriptive_name: r.display_name().to_string(),
            report_type: r.report_type,
        })
        .collect();

    Ok(Json(DiagnosticsResponse {
        total_reports: reports.len(),
        reports_with_null_organization_unit: without_unit.len(),
        null_org_report_ids: without_unit,
    }))
}
