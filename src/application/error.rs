use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Failures surfaced by the audit services. Domain validation and storage
/// errors pass through unchanged; the remaining variants describe the caller
/// or the service's own wiring.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("authentication required: {0}")]
    Unauthorized(String),

    #[error("access denied: {0}")]
    Forbidden(String),

    #[error("service misconfigured: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    pub fn infrastructure(reason: impl Into<String>) -> Self {
        Self::Infrastructure(reason.into())
    }
}
