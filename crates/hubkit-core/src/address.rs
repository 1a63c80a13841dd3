// ── Customer address domain type ──

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::CoreError;
use crate::validate::{ADDRESS_SCHEMA, validate_schema};

/// A customer postal / geolocation record.
///
/// Field order matches the export column order. Numeric fields keep the
/// number exactly as the service sent it (integer or float).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: Number,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub postcode: String,
    pub state: String,
    pub country: String,
    pub lat: Number,
    pub lon: Number,
}

/// Export columns: field name and header label, in output order.
pub const COLUMNS: [(&str, &str); 9] = [
    ("id", "ID"),
    ("first_name", "First Name"),
    ("last_name", "Last Name"),
    ("street", "Street"),
    ("postcode", "Postcode"),
    ("state", "State"),
    ("country", "Country"),
    ("lat", "Latitude"),
    ("lon", "Longitude"),
];

impl Address {
    /// Validate a raw record against the address contract and convert it.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        validate_schema(&value, ADDRESS_SCHEMA)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Header labels in column order.
    pub fn header() -> impl Iterator<Item = &'static str> {
        COLUMNS.iter().map(|(_, label)| *label)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_valid_record() {
        let address = Address::from_value(json!({
            "id": 3,
            "first_name": "Alan",
            "last_name": "Turing",
            "street": "Hollymeade",
            "postcode": "SK9 4AA",
            "state": "Cheshire",
            "country": "UK",
            "lat": 53.3,
            "lon": -2.2,
            "loyalty_tier": "gold"
        }))
        .unwrap();

        assert_eq!(address.id, Number::from(3));
        assert_eq!(address.postcode, "SK9 4AA");
        assert_eq!(address.lon.as_f64(), Some(-2.2));
    }

    #[test]
    fn integer_coordinates_stay_integers() {
        let address = Address::from_value(json!({
            "id": 4,
            "first_name": "Grace",
            "last_name": "Hopper",
            "street": "1 Navy Way",
            "postcode": "10001",
            "state": "NY",
            "country": "US",
            "lat": 40,
            "lon": -74
        }))
        .unwrap();

        assert_eq!(address.lat.to_string(), "40");
        assert_eq!(address.lon.to_string(), "-74");
    }

    #[test]
    fn rejects_record_without_lat() {
        let err = Address::from_value(json!({
            "id": 3,
            "first_name": "Alan",
            "last_name": "Turing",
            "street": "Hollymeade",
            "postcode": "SK9 4AA",
            "state": "Cheshire",
            "country": "UK",
            "lon": -2.2
        }))
        .unwrap_err();

        assert!(matches!(err, CoreError::MissingField { ref field } if field == "lat"));
    }

    #[test]
    fn header_labels_follow_columns() {
        let header: Vec<&str> = Address::header().collect();
        assert_eq!(
            header,
            vec![
                "ID",
                "First Name",
                "Last Name",
                "Street",
                "Postcode",
                "State",
                "Country",
                "Latitude",
                "Longitude"
            ]
        );
    }
}
