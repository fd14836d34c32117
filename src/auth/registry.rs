use std::collections::HashMap;
use crate::config::AuthConfig;
use crate::errors::ReportError;
use super::user::User;

/// Maps bearer tokens to the users they identify.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
    users: HashMap<String, User>,
}

impl TokenRegistry {
    pub fn from_config(config: &AuthConfig) -> Result<Self, ReportError> {
        let mut users = HashMap::with_capacity(config.users.len());
        for entry in &config.users {
            let user = User::new(
                entry.email.clone(),
                entry.oid.clone(),
                entry.name.clone(),
                entry.groups.clone(),
                &config.admin_group,
            );
            if users.insert(entry.token.clone(), user).is_some() {
                return Err(ReportError::Config(format!(
                    "Token for {} is already assigned to another user", entry.email
                )));
            }
        }
        Ok(Self { users })
    }

    pub fn resolve(&self, token: &str) -> Option<User> {
        self.users.get(token).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserEntry;

    fn entry(token: &str, email: &str, groups: &[&str]) -> UserEntry {
        UserEntry {
            token: token.to_string(),
            email: email.to_string(),
            oid: format!("oid-{}", email),
            name: None,
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn test_resolve_known_token() {
        let config = AuthConfig {
            admin_group: "admins".into(),
            users: vec![entry("t-admin", "admin@example.com", &["admins"]), entry("t-user", "user@example.com", &[])],
        };
        let registry = TokenRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.resolve("t-admin").unwrap().is_admin());
        assert!(!registry.resolve("t-user").unwrap().is_admin());
        assert!(registry.resolve("nope").is_none());
    }

    #[test]
    fn test_duplicate_token_rejected() {
        let config = AuthConfig {
            admin_group: "admins".into(),
            users: vec![entry("same", "a@example.com", &[]), entry("same", "b@example.com", &[])],
        };
        assert!(matches!(TokenRegistry::from_config(&config), Err(ReportError::Config(_))));
    }

    #[test]
    fn test_empty_config_gives_empty_registry() {
        let registry = TokenRegistry::from_config(&AuthConfig::default()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
