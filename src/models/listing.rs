use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One apartment record. Every field is optional and independent; the only
/// cross-field rule is the coordinate pair: a listing is "located" iff both
/// latitude and longitude are present and finite.
///
/// Wire names are the French column names shared by the CSV and JSON
/// contracts (`loyer`, `adresse`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    #[serde(rename = "loyer", default, deserialize_with = "int_or_string")]
    pub rent: Option<i64>,
    #[serde(rename = "adresse", default)]
    pub address: Option<String>,
    #[serde(rename = "cuisine_equipee", default)]
    pub kitchen_equipped: Option<String>,
    #[serde(rename = "type", default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub parking: Option<String>,
    #[serde(rename = "chambres", default, deserialize_with = "int_or_string")]
    pub bedrooms: Option<i64>,
    #[serde(rename = "surface_m2", default, deserialize_with = "float_or_string")]
    pub surface_m2: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "float_or_string")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "float_or_string")]
    pub longitude: Option<f64>,
}

impl Listing {
    /// Both coordinates present and finite. Anything else must go to the
    /// unlocated list, never to the map-marker path.
    pub fn is_located(&self) -> bool {
        matches!(
            (self.latitude, self.longitude),
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite()
        )
    }

    /// Query string for the geocoder: the address when present, otherwise
    /// `{label}, {city_hint}`. None means no lookup is attempted.
    pub fn geocode_query(&self, city_hint: &str) -> Option<String> {
        if let Some(address) = self.address.as_deref() {
            let address = address.trim();
            if !address.is_empty() {
                return Some(address.to_string());
            }
        }
        if let Some(label) = self.label.as_deref() {
            let label = label.trim();
            if !label.is_empty() {
                return Some(format!("{}, {}", label, city_hint));
            }
        }
        None
    }

    /// Fallback query on the label even when an address exists, used as a
    /// second attempt when the address itself finds nothing.
    pub fn label_query(&self, city_hint: &str) -> Option<String> {
        let label = self.label.as_deref().unwrap_or("").trim();
        if label.is_empty() {
            None
        } else {
            Some(format!("Quartier {}, {}", label, city_hint))
        }
    }
}

/// French convention: T1 = studio (0 chambres), T2 = 1 chambre, etc.
pub fn property_type_from_bedrooms(bedrooms: i64) -> String {
    format!("T{}", std::cmp::max(1, bedrooms + 1))
}

lazy_static! {
    static ref NUMERIC: Regex = Regex::new(r"-?\d+(?:[.,]\d+)?").unwrap();
}

/// Lenient numeric coercion for free-text sources: "1 200,50 €" -> 1200.50.
/// Uncoercible input is absent, not an error.
pub(crate) fn coerce_float(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let matched = NUMERIC.find(&cleaned)?;
    matched.as_str().replace(',', ".").parse::<f64>().ok()
}

pub(crate) fn coerce_int(raw: &str) -> Option<i64> {
    coerce_float(raw).map(|value| value as i64)
}

// Custom deserialization for numeric fields as they can be int or String
fn int_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(num) => num.as_f64().map(|f| f as i64),
        Value::String(s) => coerce_int(&s),
        _ => None,
    })
}

fn float_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(num) => num.as_f64(),
        Value::String(s) => coerce_float(&s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn located_requires_both_finite_coordinates() {
        let mut listing = Listing {
            latitude: Some(43.6),
            longitude: Some(3.88),
            ..Default::default()
        };
        assert!(listing.is_located());

        listing.longitude = None;
        assert!(!listing.is_located());

        listing.longitude = Some(f64::NAN);
        assert!(!listing.is_located());
    }

    #[test]
    fn geocode_query_prefers_address_over_label() {
        let listing = Listing {
            address: Some("1 rue Foch, Montpellier".to_string()),
            label: Some("Ecusson".to_string()),
            ..Default::default()
        };
        assert_eq!(
            listing.geocode_query("Montpellier, France"),
            Some("1 rue Foch, Montpellier".to_string())
        );

        let listing = Listing {
            label: Some("Ecusson".to_string()),
            ..Default::default()
        };
        assert_eq!(
            listing.geocode_query("Montpellier, France"),
            Some("Ecusson, Montpellier, France".to_string())
        );
        assert_eq!(
            listing.label_query("Montpellier, France"),
            Some("Quartier Ecusson, Montpellier, France".to_string())
        );

        let listing = Listing::default();
        assert_eq!(listing.geocode_query("Montpellier, France"), None);
    }

    #[test]
    fn coercion_handles_decorated_numbers() {
        assert_eq!(coerce_int("800"), Some(800));
        assert_eq!(coerce_int("1 200 \u{20ac}"), Some(1200));
        assert_eq!(coerce_float("43,6"), Some(43.6));
        assert_eq!(coerce_float("n/a"), None);
        assert_eq!(coerce_int(""), None);
    }

    #[test]
    fn deserializes_numbers_or_strings() {
        let listing: Listing = serde_json::from_str(
            r#"{"loyer": "850 €", "adresse": "2 rue Y", "latitude": "43,61", "longitude": 3.88}"#,
        )
        .unwrap();
        assert_eq!(listing.rent, Some(850));
        assert_eq!(listing.latitude, Some(43.61));
        assert!(listing.is_located());

        let listing: Listing = serde_json::from_str(r#"{"loyer": {"bad": true}}"#).unwrap();
        assert_eq!(listing.rent, None);
    }

    #[test]
    fn type_from_bedrooms_follows_convention() {
        assert_eq!(property_type_from_bedrooms(0), "T1");
        assert_eq!(property_type_from_bedrooms(1), "T2");
        assert_eq!(property_type_from_bedrooms(3), "T4");
    }
}
