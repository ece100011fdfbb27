use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use booflight_core::flight::FlightResult;
use booflight_core::search::SearchQuery;
use booflight_store::normalize::{normalize_booking, normalize_search};
use booflight_store::ProviderSearchRequest;

use crate::error::ApiError;
use crate::session::session_id;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FlightSearchParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub date: Option<String>,
    pub passengers: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<FlightResult>,
    pub meta: Value,
}

#[derive(Debug, Deserialize)]
pub struct BookingParams {
    pub token: Option<String>,
}

/// GET /api/flights
/// Validate, resolve both endpoints, call the provider, normalize.
pub async fn search_flights(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<FlightSearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    // 1. Validate raw parameters; nothing leaves the process on failure.
    let query = SearchQuery::build(
        params.from.as_deref(),
        params.to.as_deref(),
        params.date.as_deref(),
        params.passengers.as_deref(),
    )?;

    // 2. Resolve free text to IATA codes. Unresolvable input is a client
    // validation failure, not a provider call.
    let (departure_id, arrival_id) = match (
        state.airports.resolve(&query.from),
        state.airports.resolve(&query.to),
    ) {
        (Some(d), Some(a)) => (d, a),
        _ => {
            return Err(ApiError::Validation(
                "Please enter valid airport codes or cities.".to_string(),
            ))
        }
    };

    tracing::info!(
        %departure_id,
        %arrival_id,
        date = %query.date,
        passengers = query.passengers,
        "Searching flights"
    );

    // 3. Take a generation handle so a rapid follow-up search can supersede
    // this one. Requests without a session header are not tracked.
    let handle = match session_id(&headers) {
        Some(session) => Some(state.searches.begin(&session).await),
        None => None,
    };

    let request = ProviderSearchRequest {
        departure_id,
        arrival_id,
        outbound_date: query.date.clone(),
        adults: query.passengers,
    };

    let outcome = state.provider.search(&request).await;

    // 4. Staleness check happens before the outcome is surfaced: even an
    // error from a superseded search is stale.
    if let Some(handle) = &handle {
        if !handle.is_current().await {
            tracing::debug!("Discarding superseded search response");
            return Err(ApiError::Superseded);
        }
    }

    let payload = outcome.map_err(|e| ApiError::from_provider(e, "Failed to fetch flights"))?;

    let normalized = normalize_search(payload);
    Ok(Json(SearchResponse {
        results: normalized.results,
        meta: normalized.meta,
    }))
}

/// GET /api/flights/booking
/// Purchase options for one itinerary, addressed by its booking token.
pub async fn booking_options(
    State(state): State<AppState>,
    Query(params): Query<BookingParams>,
) -> Result<Json<Value>, ApiError> {
    let token = params
        .token
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("Missing booking token".to_string()))?;

    let token_prefix: String = token.chars().take(20).collect();
    tracing::info!(%token_prefix, "Fetching booking options");

    let (payload, raw) = state
        .provider
        .booking_options(token)
        .await
        .map_err(|e| ApiError::from_provider(e, "Failed to fetch booking options"))?;

    let search_metadata = payload.search_metadata.clone();
    let options = normalize_booking(payload);
    tracing::info!("Found {} booking options", options.len());

    Ok(Json(json!({
        "booking_options": options,
        "search_metadata": search_metadata,
        "raw": raw,
    })))
}
