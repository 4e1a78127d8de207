// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use onboarding_audit::application::{
    ApplicationResult, dto::AuthenticatedUser, error::ApplicationError,
    ports::security::TokenManager,
};
use onboarding_audit::domain::user::{Role, UserId};

pub const PM_TOKEN: &str = "pm-token";
pub const INSTRUCTOR_TOKEN: &str = "instructor-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let now = super::time::fixed_now();
        match token {
            PM_TOKEN => Ok(pm_user_at(now)),
            INSTRUCTOR_TOKEN => Ok(instructor_user_at(now)),
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("expired token")),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

fn user_at(id: i64, username: &str, role: Role, now: DateTime<Utc>) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(id).expect("invalid user id"),
        username: username.into(),
        role,
        capabilities: role.default_capabilities(),
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}

fn pm_user_at(now: DateTime<Utc>) -> AuthenticatedUser {
    user_at(1, "pm-park", Role::Pm, now)
}

fn instructor_user_at(now: DateTime<Utc>) -> AuthenticatedUser {
    user_at(2, "instructor-choi", Role::Instructor, now)
}

pub fn pm_user() -> AuthenticatedUser {
    pm_user_at(super::time::fixed_now())
}

pub fn instructor_user() -> AuthenticatedUser {
    instructor_user_at(super::time::fixed_now())
}
