use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("user id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capability {
    pub resource: String,
    pub action: String,
}

impl Capability {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }

    /// Read access to the audit trail; granted to PMs.
    pub fn audit_read() -> Self {
        Self::new("audit", "read")
    }

    /// `*` in either position matches anything.
    pub fn matches(&self, resource: &str, action: &str) -> bool {
        (self.resource == "*" || self.resource == resource)
            && (self.action == "*" || self.action == action)
    }
}

/// Portal roles carried in the token's `role` fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Pm,
    #[default]
    Instructor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Pm => "pm",
            Role::Instructor => "instructor",
        }
    }

    pub fn default_capabilities(&self) -> HashSet<Capability> {
        match self {
            Role::Pm => HashSet::from([Capability::audit_read()]),
            Role::Instructor => HashSet::new(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pm" => Ok(Role::Pm),
            "instructor" => Ok(Role::Instructor),
            other => Err(DomainError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_non_positive() {
        assert!(UserId::new(0).is_err());
        assert!(UserId::new(-4).is_err());
        assert_eq!(i64::from(UserId::new(7).unwrap()), 7);
    }

    #[test]
    fn only_pm_can_read_audit() {
        assert!(
            Role::Pm
                .default_capabilities()
                .iter()
                .any(|c| c.matches("audit", "read"))
        );
        assert!(Role::Instructor.default_capabilities().is_empty());
    }

    #[test]
    fn wildcard_capability_matches_any_action() {
        let cap = Capability::new("audit", "*");
        assert!(cap.matches("audit", "read"));
        assert!(!cap.matches("tracks", "read"));
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("PM".parse::<Role>().unwrap(), Role::Pm);
        assert_eq!("instructor".parse::<Role>().unwrap(), Role::Instructor);
        assert!("admin".parse::<Role>().is_err());
    }
}
