use std::net::SocketAddr;
use std::sync::Arc;

use booflight_api::coordinator::SearchCoordinator;
use booflight_api::{app, AppState};
use booflight_core::airports::AirportIndex;
use booflight_store::{SerpApiClient, TicketStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "booflight_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = booflight_store::app_config::Config::load().expect("Failed to load config");
    if config.provider.api_key.is_none() {
        tracing::warn!("Flight provider API key is not configured; searches will fail");
    }
    tracing::info!("Starting booflight API on port {}", config.server.port);

    let state = AppState {
        airports: AirportIndex::global(),
        provider: Arc::new(SerpApiClient::new(config.provider.clone())),
        tickets: Arc::new(TicketStore::new()),
        searches: Arc::new(SearchCoordinator::new()),
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
