//! Resolved caller principal

use serde::Serialize;

/// Who is making the current request.
///
/// Rebuilt from the `session_id` header on every request and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Identity {
    /// Holder of the configured super-admin secret
    SuperAdmin,
    Admin(String),
    User(String),
    Anonymous,
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    /// Short label used in logs, never containing the super-admin secret
    pub fn label(&self) -> String {
        match self {
            Identity::SuperAdmin => "super-admin".to_string(),
            Identity::Admin(id) => format!("admin:{}", id),
            Identity::User(id) => format!("user:{}", id),
            Identity::Anonymous => "anonymous".to_string(),
        }
    }
}
