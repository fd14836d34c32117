use axum::{extract::State, http::StatusCode, Json};
use tracing::info;
use crate::api::auth::CurrentUser;
use crate::api::models::{CreatedResponse, NewTeamRequest};
use crate::api::AppState;
use crate::errors::ReportError;
use crate::models::OrganizationUnit;

pub async fn list_teams(
    CurrentUser(_user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrganizationUnit>>, ReportError> {
    state.db.list_organization_units().map(Json)
}

pub async fn create_team(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<NewTeamRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ReportError> {
    let unit = OrganizationUnit::create_new(&request.name, request.email);
    if unit.id.is_empty() {
        return Err(ReportError::bad_request("Team name must contain letters or digits"));
    }
    if !state.db.create_organization_unit(&unit)? {
        return Err(ReportError::bad_request(format!("Team with id {} already exists", unit.id)));
    }

    info!(team_id = %unit.id, by = %user.username(), "Created organization unit");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: unit.id })))
}
