// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic source of build properties.

use deviceinfo_core::BuildField;
use deviceinfo_core::error::Result;

/// Outcome of reading one property: `Ok(None)` when the platform has no
/// value, `Err` when the read itself failed.
pub type PropertyRead = Result<Option<String>>;

/// Read access to the platform's immutable build properties.
pub trait BuildProperties: Send + Sync {
    /// Human-readable platform name (e.g. "Android").
    fn platform_name(&self) -> &str;

    /// Read one property.
    fn property(&self, field: BuildField) -> PropertyRead;

    /// Read every property, indexed by [`BuildField::index`].
    ///
    /// The outer `Err` means no property could be read at all. Sources with
    /// per-read setup cost (attaching to a VM) override this to pay it once.
    fn properties(&self) -> Result<[PropertyRead; 7]> {
        Ok(BuildField::ALL.map(|field| self.property(field)))
    }
}
