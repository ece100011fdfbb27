use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::app_config::ProviderConfig;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Missing credentials. Fatal for this deployment until an operator
    /// supplies the key; never worth retrying.
    #[error("Flight provider API key not configured in environment variables")]
    NotConfigured,
    /// The provider reported a failure, either via HTTP status or a logical
    /// `error` field in a 200 body. Status and message are forwarded as-is.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        details: Option<Value>,
    },
    #[error("Provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One-way search as sent to the provider. Codes are uppercased on the way
/// out; currency and language come from configuration.
#[derive(Debug, Clone)]
pub struct ProviderSearchRequest {
    pub departure_id: String,
    pub arrival_id: String,
    pub outbound_date: String,
    pub adults: u32,
}

// ============================================================================
// Raw provider payloads
// ============================================================================
//
// Permissive shapes for what the provider actually sends. Nothing outside
// this module and `normalize` touches them; the strict domain schema is the
// only thing handed further up.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub best_flights: Option<Vec<RawItinerary>>,
    #[serde(default)]
    pub other_flights: Option<Vec<RawItinerary>>,
    #[serde(default)]
    pub search_metadata: Option<Value>,
    #[serde(default)]
    pub search_parameters: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItinerary {
    #[serde(default)]
    pub flights: Vec<RawLeg>,
    #[serde(default)]
    pub layovers: Vec<Value>,
    #[serde(default)]
    pub total_duration: Option<i64>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub departure_token: Option<String>,
    #[serde(default)]
    pub carbon_emissions: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLeg {
    #[serde(default)]
    pub departure_airport: Option<RawAirport>,
    #[serde(default)]
    pub arrival_airport: Option<RawAirport>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub airline: Option<String>,
    #[serde(default)]
    pub airline_logo: Option<String>,
    #[serde(default)]
    pub travel_class: Option<String>,
    #[serde(default)]
    pub flight_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAirport {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingPayload {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub booking_options: Vec<RawBookingOption>,
    #[serde(default)]
    pub search_metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBookingOption {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(rename = "type", default)]
    pub fare_type: Option<String>,
}

// ============================================================================
// Provider client
// ============================================================================

#[async_trait]
pub trait FlightProvider: Send + Sync {
    async fn search(&self, req: &ProviderSearchRequest) -> Result<SearchPayload, ProviderError>;

    /// Purchase options for one prior search result. Returns the typed
    /// payload plus the raw body, which the API keeps for debugging.
    async fn booking_options(&self, token: &str)
        -> Result<(BookingPayload, Value), ProviderError>;
}

/// SerpAPI Google Flights client. The API key never appears in logs or in
/// any error surfaced to the caller.
pub struct SerpApiClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl SerpApiClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ProviderError::NotConfigured)
    }

    async fn fetch(&self, params: &[(&str, &str)]) -> Result<Value, ProviderError> {
        let redacted: Vec<&(&str, &str)> =
            params.iter().filter(|(k, _)| *k != "api_key").collect();
        tracing::debug!(params = ?redacted, "Fetching from SerpAPI");

        let response = self
            .http
            .get(&self.config.base_url)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%status, "SerpAPI response status");

        if !status.is_success() {
            let text = response.text().await?;
            return Err(match serde_json::from_str::<Value>(&text) {
                Ok(body) => {
                    let message = body
                        .get("error")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("SerpAPI Error: {}", status));
                    ProviderError::Upstream {
                        status: status.as_u16(),
                        message,
                        details: Some(body),
                    }
                }
                Err(_) => ProviderError::Upstream {
                    status: status.as_u16(),
                    message: format!("SerpAPI request failed: {}", status),
                    details: Some(Value::String(text)),
                },
            });
        }

        let body: Value = response.json().await?;

        // Logical error field in a 200 body still counts as an upstream
        // failure, surfaced with a 400-equivalent status.
        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Err(ProviderError::Upstream {
                status: 400,
                message: message.to_string(),
                details: None,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl FlightProvider for SerpApiClient {
    async fn search(&self, req: &ProviderSearchRequest) -> Result<SearchPayload, ProviderError> {
        let api_key = self.api_key()?.to_string();
        let departure = req.departure_id.to_uppercase();
        let arrival = req.arrival_id.to_uppercase();
        let adults = req.adults.to_string();

        let params = [
            ("engine", "google_flights"),
            ("departure_id", departure.as_str()),
            ("arrival_id", arrival.as_str()),
            ("outbound_date", req.outbound_date.as_str()),
            ("adults", adults.as_str()),
            ("currency", self.config.currency.as_str()),
            ("hl", self.config.locale.as_str()),
            // 2 = one way, 1 = round trip
            ("type", "2"),
            ("api_key", api_key.as_str()),
        ];

        let body = self.fetch(&params).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn booking_options(
        &self,
        token: &str,
    ) -> Result<(BookingPayload, Value), ProviderError> {
        let api_key = self.api_key()?.to_string();
        let params = [
            ("engine", "google_flights"),
            ("booking_token", token),
            ("api_key", api_key.as_str()),
        ];

        let body = self.fetch(&params).await?;
        let payload: BookingPayload = serde_json::from_value(body.clone())?;
        Ok((payload, body))
    }
}
