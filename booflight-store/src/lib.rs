pub mod app_config;
pub mod normalize;
pub mod serpapi;
pub mod ticket_store;

pub use serpapi::{FlightProvider, ProviderError, ProviderSearchRequest, SerpApiClient};
pub use ticket_store::TicketStore;
