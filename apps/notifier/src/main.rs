use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use reminder_cell::{build_scheduler, ReminderService};
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Holistic Fitness notifier");

    let config = Arc::new(AppConfig::from_env().context("loading configuration")?);
    let service = Arc::new(
        ReminderService::from_config(Arc::clone(&config)).context("connecting to the document store")?,
    );

    // Handle must outlive the server for the jobs to keep firing
    let scheduler = build_scheduler(Arc::clone(&service))
        .await
        .context("registering scheduled jobs")?;
    scheduler.start().await.context("starting scheduler")?;

    let app = router::create_router(service).layer(
        TraceLayer::new_for_http()
            .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
            .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await.context("serving admin routes")?;

    Ok(())
}
