// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Device-info method handler.
//
// Registered once on the host's messenger by the composition root. Each call
// reads the build properties fresh; nothing is cached between calls and the
// handler holds no mutable state, so concurrent delivery needs no locking.

use std::sync::Arc;

use deviceinfo_channel::{BinaryMessenger, MethodCall, MethodCallHandler, MethodChannel, MethodResult};
use deviceinfo_core::error::Result;
use deviceinfo_core::{BridgeConfig, BuildField, DeviceInfo, MissingPropertyPolicy};
use serde_json::Value;

use crate::methods::Method;
use crate::traits::BuildProperties;

/// Error code sent when the device info cannot be assembled.
pub const UNAVAILABLE: &str = "UNAVAILABLE";

/// Answers `getDeviceInfo`; everything else is not implemented.
pub struct DeviceInfoBridge {
    source: Arc<dyn BuildProperties>,
    policy: MissingPropertyPolicy,
}

impl DeviceInfoBridge {
    pub fn new(source: Arc<dyn BuildProperties>, policy: MissingPropertyPolicy) -> Self {
        Self { source, policy }
    }

    /// Bridge over the target platform's property source.
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(
            crate::platform_build_properties(config),
            config.missing_property.clone(),
        )
    }

    /// Register this bridge as the handler for `channel` on `messenger`.
    ///
    /// Calls on that channel route here until the handler is removed or
    /// replaced. The returned channel can be used to do either.
    pub fn register(
        self: Arc<Self>,
        messenger: Arc<dyn BinaryMessenger>,
        channel: &str,
    ) -> MethodChannel {
        let method_channel = MethodChannel::new(messenger, channel);
        tracing::info!(
            channel,
            platform = self.source.platform_name(),
            "device info bridge registered"
        );
        let handler: Arc<dyn MethodCallHandler> = self;
        method_channel.set_method_call_handler(Some(handler));
        method_channel
    }

    /// Answer one call. `result` is completed exactly once.
    pub fn dispatch(&self, call: MethodCall, result: Box<dyn MethodResult>) {
        match Method::from_name(&call.method) {
            Some(Method::GetDeviceInfo) => match self.read_device_info() {
                Ok(info) => result.success(Value::String(info.to_string())),
                Err(e) => {
                    tracing::warn!(error = %e, "device info unavailable");
                    result.error(UNAVAILABLE, Some(&e.to_string()), None);
                }
            },
            None => {
                tracing::debug!(method = %call.method, "method not implemented");
                result.not_implemented();
            }
        }
    }

    /// Read the seven build properties.
    ///
    /// Unavailable or unreadable properties are filled in according to the
    /// configured [`MissingPropertyPolicy`]. Values are trimmed and any line
    /// breaks inside them become spaces, so the block stays seven lines.
    pub fn read_device_info(&self) -> Result<DeviceInfo> {
        let reads = match self.source.properties() {
            Ok(reads) => reads,
            Err(e) => {
                tracing::warn!(error = %e, "build properties unreadable");
                BuildField::ALL.map(|_| Ok(None))
            }
        };

        DeviceInfo::try_from_fields(|field| -> Result<String> {
            let value = match &reads[field.index()] {
                Ok(Some(value)) => value.clone(),
                Ok(None) => {
                    tracing::warn!(%field, "build property unavailable");
                    self.policy.fill(field)?
                }
                Err(e) => {
                    tracing::warn!(%field, error = %e, "build property read failed");
                    self.policy.fill(field)?
                }
            };
            Ok(single_line(&value))
        })
    }
}

/// Trim surrounding whitespace and fold inner line breaks into single
/// spaces.
fn single_line(value: &str) -> String {
    value
        .trim()
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl MethodCallHandler for DeviceInfoBridge {
    fn on_method_call(&self, call: MethodCall, result: Box<dyn MethodResult>) {
        self.dispatch(call, result);
    }
}
