mod admin;
mod config;
mod db;
mod engine;
mod errors;
mod layout;
mod models;
mod notify;
mod quiz;
mod report;
mod routes;
mod state;
mod submission;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::layout::default_page_config;
use crate::notify::{DisabledNotifier, Notifier, SmtpNotifier};
use crate::quiz::Catalog;
use crate::routes::build_router;
use crate::state::AppState;
use crate::submission::store::{PgSubmissionStore, SubmissionStore, UnavailableStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Quiz API v{}", env!("CARGO_PKG_VERSION"));

    // Quiz catalog: invariant violations abort startup
    let catalog = Catalog::builtin()?;
    info!("Quiz catalog loaded ({} quizzes)", catalog.all().len());

    // Submission store
    let store: Arc<dyn SubmissionStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            let store = PgSubmissionStore::new(pool);
            store.ensure_schema().await?;
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set; submissions will fail with PERSISTENCE_UNAVAILABLE");
            Arc::new(UnavailableStore)
        }
    };

    // Notification mailer
    let notifier: Arc<dyn Notifier> = match &config.smtp {
        Some(smtp) => {
            info!("SMTP notifications enabled via {}:{}", smtp.host, smtp.port);
            Arc::new(SmtpNotifier::new(smtp)?)
        }
        None => {
            info!("SMTP notifications disabled");
            Arc::new(DisabledNotifier)
        }
    };

    let page_config = default_page_config();

    // Build app state
    let state = AppState {
        catalog: Arc::new(catalog),
        store,
        notifier,
        config: config.clone(),
        page_config,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
