use crate::{CoreError, CoreResult};
use chrono::NaiveDate;

/// A validated one-way search. `from` and `to` are still free text here;
/// resolution to IATA codes happens after validation, before the provider
/// call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub from: String,
    pub to: String,
    pub date: String,
    pub passengers: u32,
}

impl SearchQuery {
    /// Validates raw query-string values. All failures here are client
    /// errors, detected before any external call.
    pub fn build(
        from: Option<&str>,
        to: Option<&str>,
        date: Option<&str>,
        passengers: Option<&str>,
    ) -> CoreResult<Self> {
        let (from, to, date) = match (non_empty(from), non_empty(to), non_empty(date)) {
            (Some(f), Some(t), Some(d)) => (f, t, d),
            _ => {
                return Err(CoreError::ValidationError(
                    "Missing required parameters: from, to, date".to_string(),
                ))
            }
        };

        validate_date(date)?;

        let passengers = match non_empty(passengers) {
            None => 1,
            Some(p) => p
                .parse::<u32>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| {
                    CoreError::ValidationError(
                        "Passenger count must be a positive integer".to_string(),
                    )
                })?,
        };

        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            date: date.to_string(),
            passengers,
        })
    }
}

/// `YYYY-MM-DD` shape and a real calendar date. `2025-13-40` fails here,
/// before any network call is made.
fn validate_date(date: &str) -> CoreResult<()> {
    let bytes = date.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(CoreError::ValidationError(
            "Invalid date format. Use YYYY-MM-DD".to_string(),
        ));
    }
    Ok(())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_are_rejected() {
        for (from, to, date) in [
            (None, Some("BOM"), Some("2025-11-01")),
            (Some("DEL"), None, Some("2025-11-01")),
            (Some("DEL"), Some("BOM"), None),
            (Some(""), Some("BOM"), Some("2025-11-01")),
        ] {
            let err = SearchQuery::build(from, to, date, None).unwrap_err();
            assert!(err.to_string().contains("Missing required parameters"));
        }
    }

    #[test]
    fn impossible_calendar_date_is_rejected() {
        let err = SearchQuery::build(Some("DEL"), Some("BOM"), Some("2025-13-40"), None)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid date format"));
    }

    #[test]
    fn malformed_date_shapes_are_rejected() {
        for date in ["01-11-2025", "2025/11/01", "2025-1-2", "tomorrow"] {
            assert!(SearchQuery::build(Some("DEL"), Some("BOM"), Some(date), None).is_err());
        }
    }

    #[test]
    fn passengers_default_to_one() {
        let q = SearchQuery::build(Some("DEL"), Some("BOM"), Some("2025-11-01"), None).unwrap();
        assert_eq!(q.passengers, 1);
        let q = SearchQuery::build(Some("DEL"), Some("BOM"), Some("2025-11-01"), Some(""))
            .unwrap();
        assert_eq!(q.passengers, 1);
    }

    #[test]
    fn zero_or_junk_passenger_counts_are_rejected() {
        for p in ["0", "-2", "many"] {
            assert!(
                SearchQuery::build(Some("DEL"), Some("BOM"), Some("2025-11-01"), Some(p)).is_err()
            );
        }
    }
}
