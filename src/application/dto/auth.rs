use crate::domain::user::{Capability, Role, UserId};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Caller identity recovered from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub capabilities: HashSet<Capability>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedUser {
    pub fn has_capability(&self, resource: &str, action: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.matches(resource, action))
    }

    /// Gate shared by every audit query.
    pub fn can_read_audit(&self) -> bool {
        let required = Capability::audit_read();
        self.has_capability(&required.resource, &required.action)
    }
}

/// Claims placed into a freshly minted token.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub capabilities: HashSet<Capability>,
}
