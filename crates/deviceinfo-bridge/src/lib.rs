// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Device-info bridge: answers `getDeviceInfo` on a method channel with the
//! device's build properties.
//!
//! The build properties come from a [`traits::BuildProperties`] source picked
//! per target OS: JNI into `android.os.Build` on Android, a configured
//! profile everywhere else.

use std::sync::Arc;

use deviceinfo_core::BridgeConfig;

pub mod device_info;
pub mod methods;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

pub use device_info::DeviceInfoBridge;
pub use methods::Method;

/// Build-property source for the target operating system.
pub fn platform_build_properties(config: &BridgeConfig) -> Arc<dyn traits::BuildProperties> {
    #[cfg(target_os = "android")]
    {
        // Android: reads `android.os.Build` through `jni-rs`; the configured
        // profile is ignored.
        let _ = config;
        Arc::new(android::AndroidBuildProperties::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // Desktop/CI: report whatever the config's profile supplies.
        Arc::new(stub::StubBuildProperties::new(
            config.profile.clone().unwrap_or_default(),
        ))
    }
}
