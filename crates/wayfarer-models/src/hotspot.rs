//! Hotspot model.

use crate::Coordinates;
use serde::{Deserialize, Deserializer, Serialize};

/// A remotely defined point of interest.
///
/// Identity is `id`. Hotspots are immutable once fetched; the inventory stores
/// the same shape for the items a user has collected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hotspot {
    /// Unique identifier. Numeric ids from the remote feed are kept as their
    /// decimal string form.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Location of the hotspot
    pub coordinates: Coordinates,
}

impl Hotspot {
    /// Create a new hotspot.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            coordinates,
        }
    }

    /// Find a hotspot by id in a list.
    pub fn find<'a>(hotspots: &'a [Hotspot], id: &str) -> Option<&'a Hotspot> {
        hotspots.iter().find(|h| h.id == id)
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Integer(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_remote_record() {
        let json = r#"{
            "id": "1",
            "name": "Fountain",
            "description": "A fountain in the park",
            "coordinates": { "latitude": 51.9173, "longitude": 4.4843 }
        }"#;
        let hotspot: Hotspot = serde_json::from_str(json).unwrap();
        assert_eq!(hotspot.id, "1");
        assert_eq!(hotspot.name, "Fountain");
        assert_eq!(hotspot.coordinates, Coordinates::new(51.9173, 4.4843));
    }

    #[test]
    fn numeric_id_becomes_string() {
        let json = r#"{"id": 42, "name": "Tower", "description": "", "coordinates": {"latitude": 1.0, "longitude": 2.0}}"#;
        let hotspot: Hotspot = serde_json::from_str(json).unwrap();
        assert_eq!(hotspot.id, "42");
    }

    #[test]
    fn missing_description_defaults_empty() {
        let json = r#"{"id": "7", "name": "Bridge", "coordinates": {"latitude": 1.0, "longitude": 2.0}}"#;
        let hotspot: Hotspot = serde_json::from_str(json).unwrap();
        assert!(hotspot.description.is_empty());
    }

    #[test]
    fn missing_coordinates_is_rejected() {
        let json = r#"{"id": "7", "name": "Bridge"}"#;
        assert!(serde_json::from_str::<Hotspot>(json).is_err());
    }

    #[test]
    fn find_by_id() {
        let list = vec![
            Hotspot::new("a", "A", "", Coordinates::new(0.0, 0.0)),
            Hotspot::new("b", "B", "", Coordinates::new(1.0, 1.0)),
        ];
        assert_eq!(Hotspot::find(&list, "b").map(|h| h.name.as_str()), Some("B"));
        assert!(Hotspot::find(&list, "c").is_none());
    }
}
