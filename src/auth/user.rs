//! The authenticated caller as seen by handlers.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub oid: String,
    pub name: Option<String>,
    pub groups: Vec<String>,
    admin: bool,
}

impl User {
    /// Builds a user; membership of `admin_group` grants admin access.
    pub fn new(
        email: String,
        oid: String,
        name: Option<String>,
        groups: Vec<String>,
        admin_group: &str,
    ) -> Self {
        let admin = !admin_group.is_empty() && groups.iter().any(|g| g == admin_group);
        Self { email, oid, name, groups, admin }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Name used in logs and authorization errors.
    pub fn username(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_user(email: &str, admin: bool) -> User {
        let groups = if admin { vec!["a11y-admins".to_string()] } else { vec!["staff".to_string()] };
        User::new(email.to_string(), format!("oid-{}", email), None, groups, "a11y-admins")
    }

    #[test]
    fn test_admin_group_membership() {
        assert!(test_user("admin@example.com", true).is_admin());
        assert!(!test_user("user@example.com", false).is_admin());
    }

    #[test]
    fn test_empty_admin_group_grants_nothing() {
        let user = User::new("x@example.com".into(), "oid".into(), None, vec![String::new()], "");
        assert!(!user.is_admin());
    }

    #[test]
    fn test_username_prefers_name() {
        let named = User::new("x@example.com".into(), "oid".into(), Some("Kari".into()), vec![], "admins");
        assert_eq!(named.username(), "Kari");
        assert_eq!(test_user("y@example.com", false).username(), "y@example.com");
    }
}
