//! Engine Configuration

use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::selector::is_valid_ident;

/// Style sync configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Names of the fingerprint attributes written on every managed element
    pub fingerprint_attributes: Vec<String>,

    /// Prefix of the fingerprint value (`prefix + slot`)
    pub slot_prefix: String,

    /// Priority marker appended to every emitted declaration
    pub priority: String,

    /// Attribute listing properties the host page has claimed
    pub force_attribute: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            fingerprint_attributes: ["data-rf-a", "data-rf-b", "data-rf-c", "data-rf-d", "data-rf-e"]
                .into_iter()
                .map(String::from)
                .collect(),
            slot_prefix: "a".to_string(),
            priority: "!important".to_string(),
            force_attribute: "data-force-css".to_string(),
        }
    }
}

impl SyncConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SyncError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SyncError> {
        if self.fingerprint_attributes.is_empty() {
            return Err(SyncError::InvalidConfig("no fingerprint attributes".into()));
        }
        for (i, name) in self.fingerprint_attributes.iter().enumerate() {
            if !is_valid_ident(name) {
                return Err(SyncError::InvalidConfig(format!("bad attribute name {name:?}")));
            }
            if self.fingerprint_attributes[..i].contains(name) {
                return Err(SyncError::InvalidConfig(format!("duplicate attribute name {name:?}")));
            }
        }
        if self.fingerprint_attributes.contains(&self.force_attribute) {
            return Err(SyncError::InvalidConfig(
                "force attribute doubles as a fingerprint attribute".into(),
            ));
        }
        if !is_valid_ident(&self.slot_prefix) {
            return Err(SyncError::InvalidConfig(format!("bad slot prefix {:?}", self.slot_prefix)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SyncConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fingerprint_attributes.len(), 5);
    }

    #[test]
    fn test_from_json_partial() {
        let config = SyncConfig::from_json(r#"{ "slot_prefix": "rf" }"#).unwrap();
        assert_eq!(config.slot_prefix, "rf");
        assert_eq!(config.priority, "!important");
    }

    #[test]
    fn test_rejects_bad_configs() {
        for json in [
            r#"{ "fingerprint_attributes": [] }"#,
            r#"{ "fingerprint_attributes": ["x", "x"] }"#,
            r#"{ "fingerprint_attributes": ["9x"] }"#,
            r#"{ "slot_prefix": "1" }"#,
            r#"{ "force_attribute": "data-rf-a" }"#,
        ] {
            assert!(
                matches!(SyncConfig::from_json(json), Err(SyncError::InvalidConfig(_))),
                "accepted {json}"
            );
        }
        assert!(matches!(SyncConfig::from_json("{"), Err(SyncError::Json(_))));
    }
}
