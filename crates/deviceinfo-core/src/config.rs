// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DeviceInfoError, Result};
use crate::types::{BuildField, BuildProfile};

/// Channel identifier shared with the UI layer. Must match byte-for-byte.
pub const DEFAULT_CHANNEL: &str = "platformchannel.companyname.com/deviceinfo";

/// What to report when a build property cannot be read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MissingPropertyPolicy {
    /// Report an empty value.
    #[default]
    Empty,
    /// Report the given text in place of the value.
    Placeholder { text: String },
    /// Fail the whole request.
    Error,
}

impl MissingPropertyPolicy {
    /// Produce the stand-in value for an unavailable `field`.
    pub fn fill(&self, field: BuildField) -> Result<String> {
        match self {
            MissingPropertyPolicy::Empty => Ok(String::new()),
            MissingPropertyPolicy::Placeholder { text } => Ok(text.clone()),
            MissingPropertyPolicy::Error => Err(DeviceInfoError::PropertyUnavailable(field)),
        }
    }
}

/// Persistent bridge settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Channel name the bridge registers on.
    pub channel: String,
    /// Behaviour for unavailable build properties.
    pub missing_property: MissingPropertyPolicy,
    /// Build properties reported on platforms without a native source
    /// (desktop, CI).
    pub profile: Option<BuildProfile>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            missing_property: MissingPropertyPolicy::default(),
            profile: None,
        }
    }
}

impl BridgeConfig {
    /// Read a config from a JSON file. Absent keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&data)?;
        tracing::debug!(path = %path.display(), "bridge config loaded");
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_shared_channel_and_empty_policy() {
        let config = BridgeConfig::default();
        assert_eq!(config.channel, "platformchannel.companyname.com/deviceinfo");
        assert_eq!(config.missing_property, MissingPropertyPolicy::Empty);
        assert!(config.profile.is_none());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");

        let config = BridgeConfig {
            missing_property: MissingPropertyPolicy::Placeholder {
                text: "unknown".into(),
            },
            profile: Some(BuildProfile {
                manufacturer: Some("Google".into()),
                version_sdk: Some(33),
                ..Default::default()
            }),
            ..Default::default()
        };
        config.save(&path).expect("save");

        let loaded = BridgeConfig::load(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "missing_property": { "mode": "error" } }"#).unwrap();

        let loaded = BridgeConfig::load(&path).expect("load");
        assert_eq!(loaded.channel, DEFAULT_CHANNEL);
        assert_eq!(loaded.missing_property, MissingPropertyPolicy::Error);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = BridgeConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DeviceInfoError::Io(_)));
    }

    #[test]
    fn policy_fill() {
        assert_eq!(
            MissingPropertyPolicy::Empty.fill(BuildField::Model).unwrap(),
            ""
        );
        let placeholder = MissingPropertyPolicy::Placeholder { text: "n/a".into() };
        assert_eq!(placeholder.fill(BuildField::Model).unwrap(), "n/a");
        let err = MissingPropertyPolicy::Error
            .fill(BuildField::Fingerprint)
            .unwrap_err();
        assert!(matches!(
            err,
            DeviceInfoError::PropertyUnavailable(BuildField::Fingerprint)
        ));
        assert_eq!(err.to_string(), "build property unavailable: Fingerprint");
    }
}
