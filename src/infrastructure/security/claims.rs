// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Capability, Role, UserId};
use biscuit_auth::builder::{Fact, Term};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Identity facts read back from a verified token. Facts the service does not
/// understand are ignored.
#[derive(Debug, Default)]
pub struct PortalClaims {
    user: Option<(i64, String)>,
    role: Option<String>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
    rights: HashSet<Capability>,
}

impl PortalClaims {
    pub fn from_facts(facts: impl IntoIterator<Item = Fact>) -> Self {
        facts.into_iter().fold(Self::default(), |mut claims, fact| {
            let terms = fact.predicate.terms.as_slice();
            match (fact.predicate.name.as_str(), terms) {
                ("user", [Term::Integer(id), Term::Str(name)]) => {
                    claims.user = Some((*id, name.clone()));
                }
                ("role", [Term::Str(role)]) => claims.role = Some(role.clone()),
                ("issued_at", [Term::Date(secs)]) => claims.issued_at = Some(at(*secs)),
                ("expires_at", [Term::Date(secs)]) => claims.expires_at = Some(at(*secs)),
                ("right", [Term::Str(resource), Term::Str(action)]) => {
                    claims
                        .rights
                        .insert(Capability::new(resource.clone(), action.clone()));
                }
                _ => {}
            }
            claims
        })
    }

    /// Capabilities are the role defaults plus any explicit `right` facts.
    pub fn into_user(self) -> ApplicationResult<AuthenticatedUser> {
        let (user_id, username) = self.user.ok_or_else(|| missing("user"))?;
        let role: Role = self
            .role
            .ok_or_else(|| missing("role"))?
            .parse()
            .map_err(|_| ApplicationError::unauthorized("token carries an unknown role"))?;
        let issued_at = self.issued_at.ok_or_else(|| missing("issued_at"))?;
        let expires_at = self.expires_at.ok_or_else(|| missing("expires_at"))?;

        let mut capabilities = role.default_capabilities();
        capabilities.extend(self.rights);

        Ok(AuthenticatedUser {
            id: UserId::new(user_id).map_err(|_| missing("valid user id"))?,
            username,
            role,
            capabilities,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
        })
    }
}

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

fn missing(claim: &str) -> ApplicationError {
    ApplicationError::unauthorized(format!("token is missing the {claim} claim"))
}
