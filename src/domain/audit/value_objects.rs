use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

const MAX_ENTITY_TYPE_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AuditLogId(pub i64);

impl From<AuditLogId> for i64 {
    fn from(value: AuditLogId) -> Self {
        value.0
    }
}

/// Category of an administrative action. Closed set; stored as the
/// upper-case name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Create,
    Update,
    Delete,
    Login,
    Logout,
}

impl ActionType {
    pub const ALL: [ActionType; 5] = [
        ActionType::Create,
        ActionType::Update,
        ActionType::Delete,
        ActionType::Login,
        ActionType::Logout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Create => "CREATE",
            ActionType::Update => "UPDATE",
            ActionType::Delete => "DELETE",
            ActionType::Login => "LOGIN",
            ActionType::Logout => "LOGOUT",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ActionType::ALL
            .into_iter()
            .find(|action| action.as_str() == upper)
            .ok_or_else(|| DomainError::Validation(format!("unknown action type '{s}'")))
    }
}

/// Name of the affected resource class, e.g. `Track` or `Instructor`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityType(String);

impl EntityType {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("entity type cannot be empty".into()));
        }
        if trimmed.chars().count() > MAX_ENTITY_TYPE_LEN {
            return Err(DomainError::Validation(format!(
                "entity type must be at most {MAX_ENTITY_TYPE_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EntityType> for String {
    fn from(value: EntityType) -> Self {
        value.0
    }
}
