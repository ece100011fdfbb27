//! The single boundary between the provider's duck-typed JSON and the
//! strict domain schema. Raw payload types never leave this crate.

use booflight_core::flight::{format_duration, format_inr, BookingOption, FlightResult, Segment};
use serde_json::{json, Value};

use crate::serpapi::{BookingPayload, RawItinerary, RawLeg, SearchPayload};

pub struct NormalizedSearch {
    pub results: Vec<FlightResult>,
    pub meta: Value,
}

/// Merges the provider's two ranked lists (best first, provider order kept)
/// and maps each itinerary into the domain shape. An absent pair of lists is
/// a normal empty result, not an error.
pub fn normalize_search(payload: SearchPayload) -> NormalizedSearch {
    if payload.best_flights.is_none() && payload.other_flights.is_none() {
        tracing::info!("No flights found in provider response");
        return NormalizedSearch {
            results: Vec::new(),
            meta: json!({
                "message": "No flights found for this route",
                "search_parameters": payload.search_parameters,
            }),
        };
    }

    let mut merged = payload.best_flights.unwrap_or_default();
    merged.extend(payload.other_flights.unwrap_or_default());

    let mut results = Vec::new();
    for itinerary in merged {
        // The domain invariant is a non-empty, ordered segment list; an
        // itinerary without legs cannot satisfy it.
        if itinerary.flights.is_empty() {
            tracing::warn!("Dropping provider itinerary with no legs");
            continue;
        }
        let index = results.len();
        results.push(normalize_itinerary(itinerary, index));
    }

    tracing::info!("Normalized {} flights", results.len());

    let meta = json!({
        "search_metadata": payload.search_metadata,
        "search_parameters": payload.search_parameters,
        "total_results": results.len(),
    });

    NormalizedSearch { results, meta }
}

fn normalize_itinerary(itinerary: RawItinerary, index: usize) -> FlightResult {
    let first = itinerary.flights.first();
    let airline = first
        .and_then(|l| l.airline.clone())
        .unwrap_or_else(|| "Unknown".to_string());
    let airline_logo = first.and_then(|l| l.airline_logo.clone()).unwrap_or_default();
    let segments: Vec<Segment> = itinerary.flights.iter().map(normalize_leg).collect();

    FlightResult {
        id: format!("flight-{}", index),
        airline,
        airline_logo,
        price: itinerary
            .price
            .map(format_inr)
            .unwrap_or_else(|| "N/A".to_string()),
        duration: format_duration(itinerary.total_duration.unwrap_or(0)),
        stops: segments.len().saturating_sub(1),
        booking_token: itinerary.departure_token.unwrap_or_default(),
        segments,
        carbon_emissions: itinerary.carbon_emissions,
        layovers: itinerary.layovers,
    }
}

fn normalize_leg(leg: &RawLeg) -> Segment {
    Segment {
        airline: leg.airline.clone().unwrap_or_default(),
        flight_number: leg.flight_number.clone().unwrap_or_default(),
        departure_airport: leg
            .departure_airport
            .as_ref()
            .and_then(|a| a.id.clone())
            .unwrap_or_default(),
        arrival_airport: leg
            .arrival_airport
            .as_ref()
            .and_then(|a| a.id.clone())
            .unwrap_or_default(),
        departure_time: leg
            .departure_airport
            .as_ref()
            .and_then(|a| a.time.clone())
            .unwrap_or_default(),
        arrival_time: leg
            .arrival_airport
            .as_ref()
            .and_then(|a| a.time.clone())
            .unwrap_or_default(),
        duration: leg.duration.unwrap_or(0),
        travel_class: leg.travel_class.clone().unwrap_or_default(),
    }
}

/// The provider does not guarantee option ids, so they are positional.
pub fn normalize_booking(payload: BookingPayload) -> Vec<BookingOption> {
    payload
        .booking_options
        .into_iter()
        .enumerate()
        .map(|(index, option)| BookingOption {
            id: format!("booking-{}", index),
            source: option.source.unwrap_or_else(|| "Unknown".to_string()),
            price: option
                .price
                .map(format_inr)
                .unwrap_or_else(|| "N/A".to_string()),
            link: option.link.unwrap_or_else(|| "#".to_string()),
            fare_type: option.fare_type.unwrap_or_else(|| "Standard".to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> SearchPayload {
        serde_json::from_value(value).expect("test payload deserializes")
    }

    fn itinerary(airline: &str, token: &str) -> Value {
        json!({
            "flights": [
                {
                    "airline": airline,
                    "flight_number": "XX 100",
                    "duration": 155,
                    "travel_class": "Economy",
                    "departure_airport": { "id": "DEL", "time": "2025-11-01 06:15" },
                    "arrival_airport": { "id": "BOM", "time": "2025-11-01 08:50" }
                }
            ],
            "total_duration": 155,
            "price": 4500,
            "departure_token": token
        })
    }

    #[test]
    fn best_flights_come_before_other_flights() {
        let normalized = normalize_search(payload(json!({
            "best_flights": [itinerary("IndiGo", "tok-best")],
            "other_flights": [itinerary("Air India", "tok-other")]
        })));

        assert_eq!(normalized.results.len(), 2);
        assert_eq!(normalized.results[0].airline, "IndiGo");
        assert_eq!(normalized.results[0].booking_token, "tok-best");
        assert_eq!(normalized.results[1].airline, "Air India");
        assert_eq!(normalized.results[0].id, "flight-0");
        assert_eq!(normalized.results[1].id, "flight-1");
        assert_eq!(normalized.meta["total_results"], 2);
    }

    #[test]
    fn duration_price_and_stops_are_derived() {
        let normalized = normalize_search(payload(json!({
            "best_flights": [itinerary("IndiGo", "tok")]
        })));

        let flight = &normalized.results[0];
        assert_eq!(flight.duration, "2h 35m");
        assert_eq!(flight.price, "₹4,500");
        assert_eq!(flight.stops, 0);
        assert_eq!(flight.segments.len(), 1);
        assert_eq!(flight.segments[0].departure_airport, "DEL");
        assert_eq!(flight.segments[0].arrival_airport, "BOM");
    }

    #[test]
    fn multi_leg_itinerary_counts_stops() {
        let normalized = normalize_search(payload(json!({
            "other_flights": [{
                "flights": [
                    { "airline": "Air India", "departure_airport": { "id": "DEL" }, "arrival_airport": { "id": "HYD" } },
                    { "airline": "Air India", "departure_airport": { "id": "HYD" }, "arrival_airport": { "id": "BOM" } }
                ],
                "total_duration": 300,
                "price": 7200
            }]
        })));

        let flight = &normalized.results[0];
        assert_eq!(flight.stops, 1);
        assert_eq!(flight.segments[0].departure_airport, "DEL");
        assert_eq!(flight.segments[1].arrival_airport, "BOM");
        // No token on this itinerary; the field defaults to empty.
        assert_eq!(flight.booking_token, "");
    }

    #[test]
    fn missing_lists_yield_empty_results_with_message() {
        let normalized = normalize_search(payload(json!({
            "search_parameters": { "departure_id": "DEL" }
        })));
        assert!(normalized.results.is_empty());
        assert_eq!(normalized.meta["message"], "No flights found for this route");
        assert_eq!(normalized.meta["search_parameters"]["departure_id"], "DEL");
    }

    #[test]
    fn legless_itineraries_are_dropped_and_ids_stay_positional() {
        let normalized = normalize_search(payload(json!({
            "best_flights": [{ "total_duration": 90, "price": 3000 }],
            "other_flights": [itinerary("SpiceJet", "tok")]
        })));

        assert_eq!(normalized.results.len(), 1);
        assert_eq!(normalized.results[0].id, "flight-0");
        assert_eq!(normalized.results[0].airline, "SpiceJet");
    }

    #[test]
    fn unknown_airline_and_missing_price_are_defaulted() {
        let normalized = normalize_search(payload(json!({
            "best_flights": [{
                "flights": [{ "departure_airport": { "id": "DEL" }, "arrival_airport": { "id": "BOM" } }],
                "total_duration": 120
            }]
        })));

        let flight = &normalized.results[0];
        assert_eq!(flight.airline, "Unknown");
        assert_eq!(flight.price, "N/A");
    }

    #[test]
    fn booking_options_get_positional_ids_and_defaults() {
        let payload: BookingPayload = serde_json::from_value(json!({
            "booking_options": [
                { "source": "Cleartrip", "price": 4654, "link": "https://example.test/b", "type": "Flexible" },
                {}
            ]
        }))
        .unwrap();

        let options = normalize_booking(payload);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].id, "booking-0");
        assert_eq!(options[0].source, "Cleartrip");
        assert_eq!(options[0].price, "₹4,654");
        assert_eq!(options[1].id, "booking-1");
        assert_eq!(options[1].source, "Unknown");
        assert_eq!(options[1].price, "N/A");
        assert_eq!(options[1].link, "#");
        assert_eq!(options[1].fare_type, "Standard");
    }
}
