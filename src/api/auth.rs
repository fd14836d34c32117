use axum::{
    extract::{FromRequestParts, OriginalUri, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::debug;
use crate::auth::User;
use crate::errors::ReportError;
use super::AppState;

/// Resolves the bearer token to a [`User`] and stores it in the request
/// extensions for the handlers' extractors.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ReportError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ReportError::Unauthorized("Missing Authorization header".into()))?;

    let user = state
        .tokens
        .resolve(token)
        .ok_or_else(|| ReportError::Unauthorized("Invalid API token".into()))?;

    debug!(user = %user.username(), admin = user.is_admin(), "Authenticated request");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Any authenticated user.
pub struct CurrentUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ReportError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ReportError::Unauthorized("No authenticated user on request".into()))
    }
}

/// An authenticated user with admin access. Taking this as the first
/// handler argument rejects everyone else before the body runs.
pub struct AdminUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = ReportError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            let route = parts
                .extensions
                .get::<OriginalUri>()
                .map(|uri| uri.path().to_string())
                .unwrap_or_else(|| parts.uri.path().to_string());
            return Err(ReportError::NotAdmin { route, user: user.username().to_string() });
        }
        Ok(AdminUser(user))
    }
}
