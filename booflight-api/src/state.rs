use std::sync::Arc;

use booflight_core::airports::AirportIndex;
use booflight_store::{FlightProvider, TicketStore};

use crate::coordinator::SearchCoordinator;

#[derive(Clone)]
pub struct AppState {
    pub airports: &'static AirportIndex,
    pub provider: Arc<dyn FlightProvider>,
    pub tickets: Arc<TicketStore>,
    pub searches: Arc<SearchCoordinator>,
}
