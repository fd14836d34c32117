use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("User {user} does not have admin access to {route}")]
    NotAdmin { route: String, user: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReportError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn missing_path_parameter(name: &str) -> Self {
        Self::BadRequest(format!("Missing path parameter {{{}}}", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ReportError::NotFound { kind: "Aggregated Report", id: "r-1".into() };
        assert_eq!(err.to_string(), "Aggregated Report with id r-1 not found");
    }

    #[test]
    fn test_missing_path_parameter_message() {
        let err = ReportError::missing_path_parameter("id");
        assert_eq!(err.to_string(), "Missing path parameter {id}");
    }

    #[test]
    fn test_not_admin_message_names_user_and_route() {
        let err = ReportError::NotAdmin {
            route: "/api/admin/reports/diagnostics".into(),
            user: "someone@example.com".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("someone@example.com"));
        assert!(msg.contains("/api/admin/reports/diagnostics"));
    }
}
