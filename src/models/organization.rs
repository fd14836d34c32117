use serde::{Deserialize, Serialize};
use crate::utils::formatting::slugify;

/// A team or department that reports are scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationUnit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl OrganizationUnit {
    /// New unit whose id is derived from its name.
    pub fn create_new(name: &str, email: Option<String>) -> Self {
        Self {
            id: slugify(name),
            name: name.trim().to_string(),
            email: email.filter(|e| !e.trim().is_empty()),
        }
    }
}
