//! # Folio API Server
//!
//! Backend for a personal portfolio: an authenticated admin surface for
//! profile content, a contact inbox and a public read-only JSON API.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p folio-api                  # serve
//! cargo run -p folio-api -- create-admin  # register the admin account
//! ```

use clap::Parser;
use folio_api::{
    app::{build_router, AppState},
    cli::{create_admin, Cli, Command},
    config::Config,
};
use folio_shared::db::{
    migrations::{migration_status, run_migrations},
    pool::{close_pool, create_pool, DatabaseConfig},
};
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "folio_api=debug,folio_shared=debug,tower_http=debug".into()
            }),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}

async fn serve(pool: PgPool, config: Config) -> anyhow::Result<()> {
    let address = config.bind_address();
    let state = AppState::from_config(pool, config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    init_tracing();

    tracing::info!(
        "Folio API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let pool = create_pool(DatabaseConfig {
        max_connections: config.database.max_connections,
        ..DatabaseConfig::for_url(config.database.url.as_str())
    })
    .await?;

    run_migrations(&pool).await?;
    let status = migration_status(&pool).await?;
    tracing::info!(
        applied = status.applied_migrations,
        latest = ?status.latest_version,
        "Database schema ready"
    );

    let result = match cli.command() {
        Command::Serve => serve(pool.clone(), config).await,
        Command::CreateAdmin { email, password } => {
            let state = AppState::from_config(pool.clone(), config)?;
            create_admin(&pool, state.identity.as_ref(), &email, &password)
                .await
                .map(|user| tracing::info!(user_id = user.id, email = %user.email, "Admin created"))
        }
    };

    close_pool(pool).await;
    result
}
