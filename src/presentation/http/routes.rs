// src/presentation/http/routes.rs
use crate::config::RateLimitPolicy;
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::audit,
    middleware::rate_limit::rate_limit_layer,
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::get,
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Rate limiting keys on the forwarded client IP, falling back to the peer
/// address from the connect-info service built in `main`.
pub fn build_router(
    state: HttpState,
    allowed_origins: &[String],
    rate_limit: Option<RateLimitPolicy>,
) -> Router {
    let router = Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route("/api/v1/audit-logs/recent", get(audit::list_recent))
        .route("/api/v1/audit-logs/users/{user_id}", get(audit::list_by_actor))
        .route(
            "/api/v1/audit-logs/entity-types/{entity_type}",
            get(audit::list_by_entity_type),
        )
        .route(
            "/api/v1/audit-logs/history/{entity_type}/{entity_id}",
            get(audit::history),
        )
        .route("/api/v1/audit-logs/range", get(audit::list_in_range))
        .route("/api/v1/audit-logs/search", get(audit::search))
        .route(
            "/api/v1/audit-logs/stats/action-types",
            get(audit::count_by_action_type),
        )
        .route(
            "/api/v1/audit-logs/stats/entity-types",
            get(audit::count_by_entity_type),
        )
        .route("/api/v1/audit-logs/stats/summary", get(audit::summary));

    let router = match rate_limit.and_then(rate_limit_layer) {
        Some(layer) => router.layer(layer),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ])
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
