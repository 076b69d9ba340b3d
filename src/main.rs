//! Shelfbound payment reconciliation service entrypoint.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use shelfbound::adapters::gateway::{HttpGatewayClient, HttpGatewayConfig};
use shelfbound::adapters::http::{payment_router, PaymentAppState};
use shelfbound::adapters::notify::TracingNotifier;
use shelfbound::adapters::postgres::{
    PostgresAuditRecorder, PostgresCatalogReader, PostgresOrderRepository, PostgresSettlementStore,
};
use shelfbound::config::AppConfig;
use shelfbound::domain::foundation::Timestamp;
use shelfbound::domain::gateway::SignatureVerifier;

/// Audit events older than this are pruned by the daily retention sweep.
const AUDIT_RETENTION_DAYS: i64 = 90;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        sandbox_gateway = config.gateway.is_sandbox(),
        "Starting shelfbound payment service"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let gateway_client = HttpGatewayClient::new(
        HttpGatewayConfig::new(
            config.gateway.server_key.clone(),
            config.gateway.base_url.clone(),
        )
        .with_timeout(Duration::from_secs(config.gateway.status_timeout_secs)),
    )?;

    let state = PaymentAppState {
        verifier: SignatureVerifier::new(config.gateway.server_key.clone()),
        orders: Arc::new(PostgresOrderRepository::new(pool.clone())),
        catalog: Arc::new(PostgresCatalogReader::new(pool.clone())),
        settlements: Arc::new(PostgresSettlementStore::new(pool.clone())),
        gateway: Arc::new(gateway_client),
        audit: Arc::new(PostgresAuditRecorder::new(pool.clone())),
        notifier: Arc::new(TracingNotifier),
    };

    // Daily audit retention sweep.
    {
        let audit = state.audit.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(24 * 60 * 60));
            loop {
                interval.tick().await;
                let cutoff = Timestamp::now().minus_days(AUDIT_RETENTION_DAYS);
                match audit.delete_before(cutoff).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Pruned expired audit events");
                    }
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(error = %err, "Audit retention sweep failed");
                    }
                }
            }
        });
    }

    let cors = {
        let origins: Vec<axum::http::HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        if origins.is_empty() {
            CorsLayer::permissive()
        } else {
            CorsLayer::new().allow_origin(origins)
        }
    };

    let app = Router::new()
        .nest("/api", payment_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening for gateway notifications");

    axum::serve(listener, app).await?;

    Ok(())
}
