use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::AppState;

const SUGGESTION_LIMIT: usize = 8;

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
}

/// GET /api/airports/suggest
pub async fn suggest_airports(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Json<Value> {
    let suggestions = state.airports.suggest(&params.q, SUGGESTION_LIMIT);
    Json(json!({ "suggestions": suggestions }))
}
