use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use crate::aggregation::resolve_source_reports;
use crate::api::auth::{AdminUser, CurrentUser};
use crate::api::models::CreatedResponse;
use crate::api::AppState;
use crate::errors::ReportError;
use crate::models::{AggregatedReport, AggregatedReportUpdateRequest, NewAggregatedReportRequest, Patch};
use super::require_path_id;

pub async fn create_aggregated_report(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    Json(request): Json<NewAggregatedReportRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ReportError> {
    let sources = resolve_source_reports(&state.db, &request)?;

    let organization_unit = match request.team_id.as_deref() {
        Some(team_id) => state.db.get_organization_unit(team_id)?,
        None => None,
    };

    let report = AggregatedReport::build(
        request.url,
        request.descriptive_name,
        organization_unit,
        &sources,
        &user,
        request.notes,
    );
    let saved = state.db.upsert_aggregated_report_returning(&report)?;

    info!(
        report_id = %saved.report_id(),
        sources = sources.len(),
        by = %user.username(),
        "Created aggregated report"
    );
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: saved.report.report_id })))
}

pub async fn update_aggregated_report(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<AggregatedReportUpdateRequest>,
) -> Result<StatusCode, ReportError> {
    let id = require_path_id(&id)?;
    let original = state
        .db
        .get_aggregated_report(id)?
        .ok_or_else(|| ReportError::NotFound { kind: "Aggregated Report", id: id.to_string() })?;

    // An unknown team clears the unit rather than failing the update
    let organization_unit = match &request.team_id {
        Patch::Set(team_id) => Patch::Set(state.db.get_organization_unit(team_id)?),
        Patch::Absent => Patch::Absent,
    };

    let updated = original.updated_with(request.into_changes(organization_unit), &user);
    state.db.upsert_aggregated_report_returning(&updated)?;

    info!(report_id = %id, by = %user.username(), "Updated aggregated report");
    Ok(StatusCode::OK)
}

pub async fn delete_aggregated_report(
    AdminUser(user): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ReportError> {
    let id = require_path_id(&id)?;
    let deleted = state.db.delete_report(id)?;
    info!(report_id = %id, deleted, by = %user.username(), "Deleted aggregated report");
    Ok(StatusCode::OK)
}

pub async fn get_aggregated_report(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AggregatedReport>, ReportError> {
    let id = require_path_id(&id)?;
    state
        .db
        .get_aggregated_report(id)?
        .map(Json)
        .ok_or_else(|| ReportError::NotFound { kind: "Aggregated Report", id: id.to_string() })
}
