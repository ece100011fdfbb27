use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use booflight_core::ticket::Ticket;
use uuid::Uuid;

use crate::error::ApiError;
use crate::session::session_id;
use crate::state::AppState;

fn require_session(headers: &HeaderMap) -> Result<String, ApiError> {
    session_id(headers)
        .ok_or_else(|| ApiError::Validation("Missing X-Session-Id header".to_string()))
}

/// GET /api/ticket
pub async fn get_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Ticket>, ApiError> {
    let session = require_session(&headers)?;
    match state.tickets.load(&session).await? {
        Some(ticket) => Ok(Json(ticket)),
        None => Err(ApiError::NotFound("No ticket in progress".to_string())),
    }
}

/// PUT /api/ticket
/// Overwrites the whole in-progress ticket for this session, assigning
/// booking references on first save.
pub async fn put_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut ticket): Json<Ticket>,
) -> Result<Json<Ticket>, ApiError> {
    let session = require_session(&headers)?;

    ticket.ensure_references();
    if ticket.booking_no.is_none() {
        let suffix: String = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
        ticket.booking_no = Some(format!("BF-{}", suffix));
    }

    state.tickets.save(&session, &ticket).await?;
    tracing::debug!(%session, "Saved in-progress ticket");
    Ok(Json(ticket))
}

/// DELETE /api/ticket
pub async fn delete_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let session = require_session(&headers)?;
    state.tickets.clear(&session).await;
    Ok(StatusCode::NO_CONTENT)
}
