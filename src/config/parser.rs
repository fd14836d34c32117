use std::collections::HashSet;
use std::path::Path;
use crate::errors::ReportError;
use super::types::{AppConfig, CorsConfig};
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<AppConfig, ReportError> {
    if !path.exists() {
        return Err(ReportError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(ReportError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<AppConfig, ReportError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // An empty file is a valid, all-defaults config
    if yaml.is_null() {
        return Ok(AppConfig::default());
    }

    validate_schema(&yaml)?;

    let config: AppConfig = serde_yaml::from_value(yaml)?;

    validate_conflicts(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ReportError> {
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| ReportError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ReportError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        if !messages.is_empty() {
            return Err(ReportError::Config(messages.join("; ")));
        }
    }

    Ok(())
}

/// CORS origins are host names; the scheme comes from `allowed_schemes`.
pub fn validate_cors_origins(cors: &CorsConfig) -> Result<(), ReportError> {
    for origin in &cors.allowed_origins {
        if origin.contains("://") {
            return Err(ReportError::Config(format!(
                "CORS origin '{}' must be a host name; schemes go in allowed_schemes", origin
            )));
        }
    }
    Ok(())
}

/// Detect semantic conflicts in the parsed configuration.
fn validate_conflicts(config: &AppConfig) -> Result<(), ReportError> {
    let mut tokens = HashSet::new();
    for user in &config.auth.users {
        if user.token.trim().is_empty() {
            return Err(ReportError::Config(format!("Empty token for user {}", user.email)));
        }
        if !tokens.insert(user.token.as_str()) {
            return Err(ReportError::Config(format!(
                "Token for {} is already assigned to another user", user.email
            )));
        }
    }

    validate_cors_origins(&config.cors)?;

    if config.auth.admin_group.trim().is_empty() && !config.auth.users.is_empty() {
        warn!("No admin_group configured; admin routes will reject every user");
    }

    Ok(())
}
