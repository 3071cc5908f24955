// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub property source for desktop/CI builds where there is no native build
// property store. Values come from the configured `BuildProfile`; anything
// the profile leaves out is reported as unavailable.

use deviceinfo_core::error::Result;
use deviceinfo_core::{BuildField, BuildProfile};

use crate::traits::BuildProperties;

/// Property source backed by a fixed profile.
#[derive(Debug, Clone, Default)]
pub struct StubBuildProperties {
    profile: BuildProfile,
}

impl StubBuildProperties {
    pub fn new(profile: BuildProfile) -> Self {
        Self { profile }
    }
}

impl BuildProperties for StubBuildProperties {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn property(&self, field: BuildField) -> Result<Option<String>> {
        Ok(self.profile.get(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_reports_nothing() {
        let source = StubBuildProperties::default();
        for field in BuildField::ALL {
            assert_eq!(source.property(field).unwrap(), None);
        }
    }

    #[test]
    fn profile_values_are_reported() {
        let source = StubBuildProperties::new(BuildProfile {
            model: Some("Pixel 8".into()),
            version_sdk: Some(34),
            ..Default::default()
        });
        assert_eq!(
            source.property(BuildField::Model).unwrap().as_deref(),
            Some("Pixel 8")
        );
        assert_eq!(
            source.property(BuildField::VersionSdk).unwrap().as_deref(),
            Some("34")
        );
    }
}
