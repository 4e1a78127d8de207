use crate::config::RateLimitPolicy;
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

pub type AuditRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Per-client token bucket keyed on `X-Forwarded-For` / `X-Real-IP`, falling
/// back to the peer address. Returns `None` when the policy is degenerate.
pub fn rate_limit_layer(policy: RateLimitPolicy) -> Option<AuditRateLimitLayer> {
    let mut builder = GovernorConfigBuilder::default();
    // The governor builder takes the interval between refills, not a rate.
    builder.per_millisecond(replenish_interval_ms(policy.per_second));
    builder.burst_size(policy.burst);
    let config = builder.key_extractor(SmartIpKeyExtractor).finish()?;

    tracing::info!(
        per_second = policy.per_second,
        burst = policy.burst,
        "rate limiting enabled"
    );
    Some(GovernorLayer::new(config))
}

/// Milliseconds between single-token refills for `per_second` requests a second.
fn replenish_interval_ms(per_second: u64) -> u64 {
    (1000 / per_second.max(1)).max(1)
}
