//! Administrative region models (division, district, upazila)

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a division or district as issued by the directory service.
///
/// The backend is inconsistent about whether ids are JSON strings or
/// integers, so both decode into the same string-backed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    /// Create an id from any string-like value
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RegionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for RegionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(value) => Self::new(value),
            RawId::Number(value) => Self(value.to_string()),
        })
    }
}

/// Top-level administrative region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub id: RegionId,
    pub name: String,
}

/// Region nested inside a division
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: RegionId,
    pub name: String,
    /// Parent division, when the backend echoes it
    #[serde(default, alias = "divisionId", skip_serializing_if = "Option::is_none")]
    pub division_id: Option<RegionId>,
}

/// Sub-district; only the name is used by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upazila {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RegionId>,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn region_id_accepts_numbers_and_strings() {
        let divisions: Vec<Division> = serde_json::from_str(
            r#"[{"id": 3, "name": "Dhaka"}, {"id": " 6 ", "name": "Rajshahi"}]"#,
        )
        .unwrap();
        assert_eq!(divisions[0].id, RegionId::from("3"));
        assert_eq!(divisions[1].id.as_str(), "6");
    }

    #[test]
    fn district_ignores_unknown_backend_fields() {
        let district: District = serde_json::from_str(
            r#"{"_id": "65ab", "id": "41", "division_id": "3", "name": "Gazipur", "bn_name": "x"}"#,
        )
        .unwrap();
        assert_eq!(district.name, "Gazipur");
        assert_eq!(district.division_id, Some(RegionId::from("3")));
    }

    #[test]
    fn upazila_id_is_optional() {
        let upazila: Upazila = serde_json::from_str(r#"{"name": "Kaliakair"}"#).unwrap();
        assert_eq!(upazila.id, None);
        assert_eq!(upazila.name, "Kaliakair");
    }
}
