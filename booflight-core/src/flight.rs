use serde::{Deserialize, Serialize};

/// One normalized itinerary as served to the client. Produced fresh per
/// search response at the provider boundary; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightResult {
    pub id: String,
    pub airline: String,
    pub airline_logo: String,
    /// Display price, e.g. `"₹4,500"`, or `"N/A"` when the provider omits it.
    pub price: String,
    /// Display duration, e.g. `"2h 35m"`.
    pub duration: String,
    pub stops: usize,
    pub booking_token: String,
    /// Non-empty and ordered by actual flight order: the first segment's
    /// departure is the overall departure, the last segment's arrival the
    /// overall arrival.
    pub segments: Vec<Segment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_emissions: Option<serde_json::Value>,
    #[serde(default)]
    pub layovers: Vec<serde_json::Value>,
}

/// One non-stop leg within an itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub airline: String,
    pub flight_number: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: i64,
    pub travel_class: String,
}

/// A purchase option for one itinerary, fetched lazily per booking token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingOption {
    pub id: String,
    pub source: String,
    pub price: String,
    pub link: String,
    #[serde(rename = "type")]
    pub fare_type: String,
}

pub fn format_duration(total_minutes: i64) -> String {
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

/// Rupee display amount with Indian digit grouping: the last three digits,
/// then pairs. `450000` becomes `"₹4,50,000"`.
pub fn format_inr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let grouped = group_indian(&digits);
    if amount < 0 {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut parts: Vec<&str> = Vec::new();
    let mut i = head.len();
    while i > 2 {
        parts.push(&head[i - 2..i]);
        i -= 2;
    }
    parts.push(&head[..i]);
    parts.reverse();
    format!("{},{}", parts.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_formats_hours_and_minutes() {
        assert_eq!(format_duration(155), "2h 35m");
        assert_eq!(format_duration(60), "1h 0m");
        assert_eq!(format_duration(45), "0h 45m");
    }

    #[test]
    fn inr_groups_thousands() {
        assert_eq!(format_inr(4500), "₹4,500");
        assert_eq!(format_inr(999), "₹999");
        assert_eq!(format_inr(0), "₹0");
    }

    #[test]
    fn inr_uses_indian_grouping_above_thousands() {
        assert_eq!(format_inr(45000), "₹45,000");
        assert_eq!(format_inr(450000), "₹4,50,000");
        assert_eq!(format_inr(14500000), "₹1,45,00,000");
    }

    #[test]
    fn flight_result_serde_round_trip() {
        let result = FlightResult {
            id: "flight-0".into(),
            airline: "IndiGo".into(),
            airline_logo: String::new(),
            price: "₹4,500".into(),
            duration: "2h 35m".into(),
            stops: 0,
            booking_token: "tok".into(),
            segments: vec![Segment {
                airline: "IndiGo".into(),
                flight_number: "6E 205".into(),
                departure_airport: "DEL".into(),
                arrival_airport: "BOM".into(),
                departure_time: "2025-11-01 06:15".into(),
                arrival_time: "2025-11-01 08:30".into(),
                duration: 135,
                travel_class: "Economy".into(),
            }],
            carbon_emissions: None,
            layovers: vec![],
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: FlightResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
