use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use booflight_core::CoreError;
use booflight_store::ProviderError;
use serde_json::{json, Value};

/// Every failure is recovered here and turned into a structured response;
/// nothing is allowed to crash the request handler.
#[derive(Debug)]
pub enum ApiError {
    /// Bad client input, detected before any external call.
    Validation(String),
    /// Missing provider credentials. Not retryable without operator action.
    NotConfigured(String),
    /// The provider failed; its status and message are forwarded as-is.
    Upstream {
        status: StatusCode,
        message: String,
        details: Option<Value>,
    },
    /// A newer search for the same session started while this one was in
    /// flight; the stale response is discarded.
    Superseded,
    NotFound(String),
    /// Unexpected failure, wrapped with the original text for diagnostics.
    Internal {
        message: String,
        details: Option<String>,
    },
}

impl ApiError {
    /// `fallback` is the generic message used when the provider call failed
    /// in transit rather than with a structured upstream error.
    pub fn from_provider(err: ProviderError, fallback: &str) -> Self {
        match err {
            ProviderError::NotConfigured => ApiError::NotConfigured(err.to_string()),
            ProviderError::Upstream {
                status,
                message,
                details,
            } => ApiError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
                details,
            },
            ProviderError::Transport(e) => ApiError::Internal {
                message: fallback.to_string(),
                details: Some(e.to_string()),
            },
            ProviderError::Decode(e) => ApiError::Internal {
                message: fallback.to_string(),
                details: Some(e.to_string()),
            },
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => ApiError::Validation(msg),
            CoreError::InternalError(msg) => ApiError::Internal {
                message: msg,
                details: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotConfigured(msg) => {
                tracing::error!("Provider not configured: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
            ApiError::Upstream {
                status,
                message,
                details,
            } => {
                tracing::error!(%status, "Upstream provider error: {}", message);
                (status, message, details)
            }
            ApiError::Superseded => (
                StatusCode::CONFLICT,
                "Search superseded by a newer request".to_string(),
                None,
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Internal { message, details } => {
                tracing::error!(?details, "Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                    details.map(Value::String),
                )
            }
        };

        let mut body = json!({ "error": message });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}
