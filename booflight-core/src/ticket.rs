use rand::Rng;
use serde::{Deserialize, Serialize};

/// PNR alphabet without the lookalikes I, O, 0 and 1.
pub const PNR_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Fixed 3-digit ticketing prefix for the display-only e-ticket number.
const TICKETING_PREFIX: &str = "998";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Passenger {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
    #[serde(rename = "class", skip_serializing_if = "Option::is_none")]
    pub travel_class: Option<String>,
}

/// The single in-progress booking for one session. Serialized as one JSON
/// blob at the persistence edge and overwritten on every change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Ticket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<u32>,
    /// Final total for all passengers, as a display string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_passenger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
    pub passengers: Vec<Passenger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_passengers: Option<u32>,
}

impl Ticket {
    /// Assigns a PNR and e-ticket number if the booking does not carry them
    /// yet. Existing references are kept so a reloaded ticket stays stable.
    pub fn ensure_references(&mut self) {
        if self.pnr.is_none() {
            self.pnr = Some(generate_pnr());
        }
        if self.ticket_number.is_none() {
            self.ticket_number = Some(generate_ticket_number());
        }
    }

    /// Grows or trims the passenger list to `count`, keeping entered details.
    pub fn set_passenger_count(&mut self, count: usize) {
        self.passengers.resize_with(count, Passenger::default);
        self.total_passengers = Some(count as u32);
    }
}

/// Display-only booking reference, not a real airline reservation.
pub fn generate_pnr() -> String {
    let mut rng = rand::thread_rng();
    (0..6)
        .map(|_| PNR_ALPHABET[rng.gen_range(0..PNR_ALPHABET.len())] as char)
        .collect()
}

/// 13-digit e-ticket number: ticketing prefix plus a 10-digit document part.
pub fn generate_ticket_number() -> String {
    let mut rng = rand::thread_rng();
    format!("{}{:010}", TICKETING_PREFIX, rng.gen_range(0u64..10_000_000_000))
}
