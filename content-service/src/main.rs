mod config;
mod error;
mod handlers;
mod models;
mod queue;
mod storage;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::Config;
use crate::queue::publisher::{NotificationPublisher, SqsQueue};
use crate::storage::gateway::ObjectGateway;
use crate::storage::s3_client::S3ObjectStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ObjectGateway>,
    pub publisher: Arc<NotificationPublisher>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Content Service...");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize AWS clients; credentials come from the SDK's default
    // provider chain.
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.storage.region.clone()))
        .load()
        .await;
    let s3_client = aws_sdk_s3::Client::new(&aws_config);
    let sqs_client = aws_sdk_sqs::Client::new(&aws_config);
    info!("AWS clients initialized");

    // Build application state
    let store = Arc::new(S3ObjectStore::new(s3_client, config.storage.bucket.clone()));
    let state = AppState {
        gateway: Arc::new(ObjectGateway::new(store)),
        publisher: Arc::new(NotificationPublisher::new(
            Arc::new(SqsQueue::new(sqs_client)),
            config.queue.queue_url.clone(),
        )),
    };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build our application with routes
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/objects/url", get(handlers::objects::get_object_url))
        .route(
            "/objects",
            post(handlers::objects::create_object).delete(handlers::objects::delete_object),
        )
        .route("/notify/upload", post(handlers::notify::notify_upload))
        .route("/notify/delete", post(handlers::notify::notify_delete))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Content Service listening on {}", addr);

    // Run the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "Content Service is healthy"
}
