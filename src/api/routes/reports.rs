use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use crate::api::auth::CurrentUser;
use crate::api::models::{CreatedResponse, NewReportRequest};
use crate::api::AppState;
use crate::errors::ReportError;
use crate::models::Report;
use super::require_path_id;

pub async fn create_report(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<NewReportRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ReportError> {
    if request.url.trim().is_empty() {
        return Err(ReportError::bad_request("Report url must not be empty"));
    }

    let organization_unit = match request.team_id.as_deref() {
        Some(team_id) => Some(
            state
                .db
                .get_organization_unit(team_id)?
                .ok_or_else(|| ReportError::bad_request(format!("Unknown team {}", team_id)))?,
        ),
        None => None,
    };

    let report = Report::new_single(
        request.url,
        request.descriptive_name,
        organization_unit,
        &user,
        request.success_criteria,
    );
    let saved = state.db.upsert_report_returning(&report)?;

    info!(report_id = %saved.report_id, by = %user.username(), "Created report");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: saved.report_id })))
}

pub async fn get_report(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Report>, ReportError> {
    let id = require_path_id(&id)?;
    state
        .db
        .get_report(id)?
        .map(Json)
        .ok_or_else(|| ReportError::NotFound { kind: "Report", id: id.to_string() })
}
