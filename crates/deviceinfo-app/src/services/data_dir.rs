// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Config directory resolution and loading.

use std::path::{Path, PathBuf};

use deviceinfo_core::BridgeConfig;

const CONFIG_FILE: &str = "config.json";

/// Return the directory holding `config.json`.
///
/// `DEVICEINFO_DATA_DIR` wins; otherwise the XDG config dir, then
/// `~/.config`. On mobile the host passes the app's files directory through
/// the environment variable instead.
pub fn data_dir() -> PathBuf {
    resolve(|key| std::env::var(key).ok())
}

fn resolve(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = var("DEVICEINFO_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("deviceinfo");
    }
    if let Some(home) = var("HOME") {
        return PathBuf::from(home).join(".config").join("deviceinfo");
    }
    // Last resort
    PathBuf::from("/tmp").join("deviceinfo")
}

/// Load `config.json` from `dir`, falling back to defaults when it is absent
/// or unreadable.
pub fn load_config(dir: &Path) -> BridgeConfig {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return BridgeConfig::default();
    }
    match BridgeConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            BridgeConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use deviceinfo_core::MissingPropertyPolicy;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn explicit_dir_wins() {
        let dir = resolve(env(&[
            ("DEVICEINFO_DATA_DIR", "/data/app"),
            ("XDG_CONFIG_HOME", "/xdg"),
            ("HOME", "/home/u"),
        ]));
        assert_eq!(dir, PathBuf::from("/data/app"));
    }

    #[test]
    fn xdg_then_home() {
        assert_eq!(
            resolve(env(&[("XDG_CONFIG_HOME", "/xdg"), ("HOME", "/home/u")])),
            PathBuf::from("/xdg/deviceinfo")
        );
        assert_eq!(
            resolve(env(&[("HOME", "/home/u")])),
            PathBuf::from("/home/u/.config/deviceinfo")
        );
        assert_eq!(resolve(env(&[])), PathBuf::from("/tmp/deviceinfo"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(load_config(dir.path()), BridgeConfig::default());
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(load_config(dir.path()), BridgeConfig::default());
    }

    #[test]
    fn saved_file_is_loaded() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = BridgeConfig {
            missing_property: MissingPropertyPolicy::Error,
            ..Default::default()
        };
        config.save(&dir.path().join(CONFIG_FILE)).expect("save");
        assert_eq!(load_config(dir.path()), config);
    }
}
