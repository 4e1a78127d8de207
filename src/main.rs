use anyhow::Result;
use onboarding_audit::application::{
    ports::{security::TokenManager, time::Clock},
    services::ApplicationServices,
};
use onboarding_audit::config::AppConfig;
use onboarding_audit::domain::audit::AuditLogRepository;
use onboarding_audit::infrastructure::{
    database, repositories::PostgresAuditLogRepository, security::token::BiscuitTokenManager,
    time::SystemClock,
};
use onboarding_audit::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "info,onboarding_audit=debug,tower_http=info,sqlx=warn";

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.database_max_connections()).await?;
    database::run_migrations(&pool).await?;

    let audit_repo: Arc<dyn AuditLogRepository> =
        Arc::new(PostgresAuditLogRepository::new(pool.clone()));
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(ApplicationServices::new(
        audit_repo,
        token_manager,
        clock,
        config.audit_max_page_size(),
    ));

    let state = HttpState { services };
    let app = build_router(state, config.allowed_origins(), config.rate_limit());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(
        %address,
        max_page_size = config.audit_max_page_size(),
        rate_limited = config.rate_limit().is_some(),
        "audit service listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    let initialised = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
    if initialised.is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let reason = tokio::select! {
        _ = ctrl_c => "ctrl-c",
        _ = terminate => "SIGTERM",
    };
    tracing::info!(reason, "draining connections before shutdown");
}
