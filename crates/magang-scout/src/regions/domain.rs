use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative region identifier as issued by the region provider, e.g. `36.03`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionCode(pub String);

impl RegionCode {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The listing provider expects codes without separators (`36.03` becomes `3603`).
    pub fn query_value(&self) -> String {
        self.0.chars().filter(|ch| *ch != '.').collect()
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A province or regency entry. Immutable once retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub code: RegionCode,
    pub name: String,
}

impl Region {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: RegionCode::new(code),
            name: name.into(),
        }
    }
}

/// Envelope used by the region provider and mirrored by the proxy endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionListing {
    #[serde(default)]
    pub data: Vec<Region>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_value_strips_separators() {
        assert_eq!(RegionCode::new("36.03").query_value(), "3603");
        assert_eq!(RegionCode::new("11.01.02").query_value(), "110102");
        assert_eq!(RegionCode::new("36").query_value(), "36");
    }

    #[test]
    fn listing_tolerates_missing_data_and_extra_fields() {
        let listing: RegionListing =
            serde_json::from_str(r#"{"meta":{"administrative_area_level":1}}"#).expect("decodes");
        assert!(listing.data.is_empty());

        let listing: RegionListing = serde_json::from_str(
            r#"{"data":[{"code":"36","name":"BANTEN"},{"code":"32","name":"JAWA BARAT"}],"meta":{}}"#,
        )
        .expect("decodes");
        assert_eq!(listing.data[0], Region::new("36", "BANTEN"));
        assert_eq!(listing.data[1].name, "JAWA BARAT");
    }
}
