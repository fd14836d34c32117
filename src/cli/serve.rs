use std::path::PathBuf;
use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::{self, AppConfig};
use crate::errors::ReportError;
use tracing::{info, warn};

pub async fn handle_serve(args: ServeArgs) -> Result<(), ReportError> {
    let config = load_config(&args).await?;
    let state = api::create_app_state(&config).await?;
    if state.tokens.is_empty() {
        warn!("No API users configured; every /api request will be rejected");
    }

    info!(
        host = %config.server.host,
        port = config.server.port,
        db = %config.database.path,
        users = state.tokens.len(),
        "Starting API server"
    );

    let app = api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ReportError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}

async fn load_config(args: &ServeArgs) -> Result<AppConfig, ReportError> {
    let base = match &args.config {
        Some(path) => config::parse_config(&PathBuf::from(path)).await?,
        None => AppConfig::default(),
    };
    let config = apply_overrides(base, args);
    // Overrides from flags or the environment skip the file checks
    config::validate_cors_origins(&config.cors)?;
    Ok(config)
}

fn apply_overrides(mut config: AppConfig, args: &ServeArgs) -> AppConfig {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(db) = &args.db {
        config.database.path = db.clone();
    }
    if let Some(origins) = &args.cors_allowed_origin {
        config.cors.allowed_origins = origins
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ServeArgs {
        ServeArgs { config: None, port: None, host: None, db: None, cors_allowed_origin: None }
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let overridden = apply_overrides(AppConfig::default(), &ServeArgs {
            port: Some(9999),
            db: Some(":memory:".into()),
            cors_allowed_origin: Some(vec![" a.example.com ".into(), "".into()]),
            ..args()
        });
        assert_eq!(overridden.server.port, 9999);
        assert_eq!(overridden.server.host, "0.0.0.0");
        assert_eq!(overridden.database.path, ":memory:");
        assert_eq!(overridden.cors.allowed_origins, vec!["a.example.com"]);
    }

    #[tokio::test]
    async fn test_load_config_without_file_uses_defaults() {
        let config = load_config(&args()).await.unwrap();
        assert_eq!(config.server.port, 8081);
    }

    #[tokio::test]
    async fn test_load_config_rejects_origin_override_with_scheme() {
        let err = load_config(&ServeArgs {
            cors_allowed_origin: Some(vec!["a.example.com".into(), "https://b.example.com".into()]),
            ..args()
        })
        .await
        .unwrap_err();
        assert!(matches!(err, ReportError::Config(msg) if msg.contains("https://b.example.com")));
    }
}
