use std::time::Instant;
use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{info, Instrument};

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const IGNORED_PATHS: [&str; 2] = ["/isalive", "/isready"];

/// Caller-supplied ids outside this length are replaced.
fn accepted_request_id(value: Option<&HeaderValue>) -> Option<String> {
    value
        .and_then(|v| v.to_str().ok())
        .filter(|id| (8..=128).contains(&id.len()))
        .map(str::to_string)
}

/// Logs START/END lines for every request and tags them with a request id,
/// echoed back in `x-request-id`.
pub async fn request_lifecycle(mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let request_id = accepted_request_id(request.headers().get(&REQUEST_ID_HEADER))
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let header_value = HeaderValue::from_str(&request_id).ok();
    if let Some(value) = &header_value {
        request.headers_mut().insert(REQUEST_ID_HEADER.clone(), value.clone());
    }

    let mut response = if IGNORED_PATHS.contains(&path.as_str()) {
        next.run(request).await
    } else {
        let method = request.method().to_string();
        let span = tracing::info_span!("http.request", request_id = %request_id, method = %method, uri = %path);
        async move {
            let started = Instant::now();
            let remote = request
                .headers()
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-")
                .to_string();
            let user_agent = request
                .headers()
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-")
                .to_string();
            info!(remote = %remote, ua = %user_agent, "START");
            let response = next.run(request).await;
            info!(
                status = response.status().as_u16(),
                duration_ms = started.elapsed().as_millis() as u64,
                "END"
            );
            response
        }
        .instrument(span)
        .await
    };

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }
    response
}
