// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the device-info bridge.

use serde::{Deserialize, Serialize};

/// The seven build properties reported by the bridge, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildField {
    /// Device codename (`Build.DEVICE`).
    Device,
    /// Hardware manufacturer (`Build.MANUFACTURER`).
    Manufacturer,
    /// End-user visible model name (`Build.MODEL`).
    Model,
    /// Overall product name (`Build.PRODUCT`).
    Product,
    /// User-visible OS version string (`Build.VERSION.RELEASE`).
    VersionRelease,
    /// OS SDK integer level (`Build.VERSION.SDK_INT`).
    VersionSdk,
    /// Unique build fingerprint (`Build.FINGERPRINT`).
    Fingerprint,
}

impl BuildField {
    /// Every field, in the order it appears in the formatted block.
    pub const ALL: [BuildField; 7] = [
        BuildField::Device,
        BuildField::Manufacturer,
        BuildField::Model,
        BuildField::Product,
        BuildField::VersionRelease,
        BuildField::VersionSdk,
        BuildField::Fingerprint,
    ];

    /// Position of the field in [`BuildField::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Fixed label printed before the value.
    pub fn label(self) -> &'static str {
        match self {
            BuildField::Device => "Device",
            BuildField::Manufacturer => "Manufacturer",
            BuildField::Model => "Model",
            BuildField::Product => "Product",
            BuildField::VersionRelease => "Version Release",
            BuildField::VersionSdk => "Version SDK",
            BuildField::Fingerprint => "Fingerprint",
        }
    }
}

impl std::fmt::Display for BuildField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A snapshot of the device build properties.
///
/// Recomputed on every request; never cached. The SDK level is stored as its
/// textual rendering so that placeholder text can stand in for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub device: String,
    pub manufacturer: String,
    pub model: String,
    pub product: String,
    pub version_release: String,
    pub version_sdk: String,
    pub fingerprint: String,
}

impl DeviceInfo {
    /// Build a record by resolving each field through `resolve`, in display
    /// order. The first error aborts the build.
    pub fn try_from_fields<E>(
        mut resolve: impl FnMut(BuildField) -> Result<String, E>,
    ) -> Result<Self, E> {
        Ok(Self {
            device: resolve(BuildField::Device)?,
            manufacturer: resolve(BuildField::Manufacturer)?,
            model: resolve(BuildField::Model)?,
            product: resolve(BuildField::Product)?,
            version_release: resolve(BuildField::VersionRelease)?,
            version_sdk: resolve(BuildField::VersionSdk)?,
            fingerprint: resolve(BuildField::Fingerprint)?,
        })
    }

    /// Value of a single field.
    pub fn value(&self, field: BuildField) -> &str {
        match field {
            BuildField::Device => &self.device,
            BuildField::Manufacturer => &self.manufacturer,
            BuildField::Model => &self.model,
            BuildField::Product => &self.product,
            BuildField::VersionRelease => &self.version_release,
            BuildField::VersionSdk => &self.version_sdk,
            BuildField::Fingerprint => &self.fingerprint,
        }
    }
}

/// Renders the seven-line `Label: value` block with no trailing newline.
impl std::fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, field) in BuildField::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}: {}", field.label(), self.value(*field))?;
        }
        Ok(())
    }
}

/// Build properties supplied from configuration rather than the OS.
///
/// Used by the desktop/CI property source. A `None` value means the
/// property is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildProfile {
    pub device: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub product: Option<String>,
    pub version_release: Option<String>,
    pub version_sdk: Option<i32>,
    pub fingerprint: Option<String>,
}

impl BuildProfile {
    /// Look up one field, rendering the SDK level as text.
    pub fn get(&self, field: BuildField) -> Option<String> {
        match field {
            BuildField::Device => self.device.clone(),
            BuildField::Manufacturer => self.manufacturer.clone(),
            BuildField::Model => self.model.clone(),
            BuildField::Product => self.product.clone(),
            BuildField::VersionRelease => self.version_release.clone(),
            BuildField::VersionSdk => self.version_sdk.map(|sdk| sdk.to_string()),
            BuildField::Fingerprint => self.fingerprint.clone(),
        }
    }
}
