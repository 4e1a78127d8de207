// tests/support/helpers.rs
use super::mocks;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use onboarding_audit::application::ports::{security::TokenManager, time::Clock};
use onboarding_audit::application::queries::audit::DEFAULT_MAX_PAGE_SIZE;
use onboarding_audit::application::services::ApplicationServices;
use onboarding_audit::config::RateLimitPolicy;
use onboarding_audit::domain::audit::AuditLogRepository;
use onboarding_audit::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use std::sync::Arc;

pub fn build_services(repo: Arc<dyn AuditLogRepository>) -> ApplicationServices {
    let token_manager: Arc<dyn TokenManager> = Arc::new(mocks::DummyTokenManager);
    let clock: Arc<dyn Clock> = Arc::new(mocks::FixedClock);
    ApplicationServices::new(repo, token_manager, clock, DEFAULT_MAX_PAGE_SIZE)
}

pub fn build_test_state(repo: Arc<dyn AuditLogRepository>) -> HttpState {
    HttpState {
        services: Arc::new(build_services(repo)),
    }
}

/// Router with mocked services and no rate limiting.
pub fn make_test_router(repo: Arc<dyn AuditLogRepository>) -> axum::Router {
    let origins = vec!["http://localhost:3000".to_string()];
    build_router(build_test_state(repo), &origins, None)
}

/// Router with mocked services behind the per-client rate limiter.
pub fn make_rate_limited_router(
    repo: Arc<dyn AuditLogRepository>,
    policy: RateLimitPolicy,
) -> axum::Router {
    build_router(build_test_state(repo), &[], Some(policy))
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("build request")
}

pub async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Assert the response is an `ErrorResponse` with the given status and
/// canonical `error` string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) {
    assert_eq!(resp.status(), expected_status);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "unexpected content-type: {content_type}"
    );
    let json = body_json(resp).await;
    let error = json.get("error").and_then(Value::as_str).unwrap_or("");
    let message = json.get("message").and_then(Value::as_str).unwrap_or("");
    assert_eq!(error, expected_error, "unexpected error field: {error}");
    assert!(!message.is_empty(), "expected non-empty message");
}
