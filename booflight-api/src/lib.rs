use axum::http::{HeaderName, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod airports;
pub mod coordinator;
pub mod error;
pub mod flights;
pub mod session;
pub mod state;
pub mod tickets;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(session::SESSION_HEADER),
        ]);

    Router::new()
        .route("/api/airports/suggest", get(airports::suggest_airports))
        .route("/api/flights", get(flights::search_flights))
        .route("/api/flights/booking", get(flights::booking_options))
        .route(
            "/api/ticket",
            get(tickets::get_ticket)
                .put(tickets::put_ticket)
                .delete(tickets::delete_ticket),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
