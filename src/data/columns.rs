use std::path::Path;

use serde::Deserialize;

use crate::error::DataLoadError;

/// Source column names for each [`LaunchRecord`](super::model::LaunchRecord)
/// field.
///
/// Defaults match the launch CSV layout. A JSON override file only needs to
/// name the fields that differ:
///
/// ```json
/// { "site": "LaunchSite", "flight_number": null }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMapping {
    pub site: String,
    pub outcome: String,
    pub payload_mass_kg: String,
    pub booster_category: String,
    /// Optional column; `None` disables flight numbers entirely.
    pub flight_number: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        ColumnMapping {
            site: "Launch Site".to_string(),
            outcome: "class".to_string(),
            payload_mass_kg: "Payload Mass (kg)".to_string(),
            booster_category: "Booster Version Category".to_string(),
            flight_number: Some("Flight Number".to_string()),
        }
    }
}

impl ColumnMapping {
    /// Read a (partial) mapping override from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, DataLoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| DataLoadError::ColumnMapping {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Required columns in a fixed order, for presence checks.
    pub fn required(&self) -> [&str; 4] {
        [
            &self.site,
            &self.outcome,
            &self.payload_mass_kg,
            &self.booster_category,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let mapping: ColumnMapping =
            serde_json::from_str(r#"{ "site": "LaunchSite" }"#).unwrap();
        assert_eq!(mapping.site, "LaunchSite");
        assert_eq!(mapping.outcome, "class");
        assert_eq!(mapping.flight_number.as_deref(), Some("Flight Number"));
    }

    #[test]
    fn null_disables_flight_number() {
        let mapping: ColumnMapping =
            serde_json::from_str(r#"{ "flight_number": null }"#).unwrap();
        assert_eq!(mapping.flight_number, None);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = serde_json::from_str::<ColumnMapping>(r#"{ "sight": "x" }"#);
        assert!(err.is_err());
    }
}
