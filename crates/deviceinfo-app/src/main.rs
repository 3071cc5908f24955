// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Device-info bridge composition root.
//
// Entry point. Initialises logging, loads config, registers the bridge on an
// in-process messenger and invokes one method on the configured channel,
// the same way the UI layer would.
//
//   deviceinfo [method]      (default: getDeviceInfo)

mod services;

use std::process::ExitCode;
use std::sync::Arc;

use deviceinfo_bridge::{DeviceInfoBridge, Method};
use deviceinfo_channel::{Envelope, InProcessMessenger, MethodChannel};
use serde_json::Value;

use services::data_dir;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let method = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Method::GetDeviceInfo.name().to_string());

    let dir = data_dir::data_dir();
    let config = data_dir::load_config(&dir);
    tracing::info!(channel = %config.channel, config_dir = %dir.display(), "device info bridge starting");

    let messenger = Arc::new(InProcessMessenger::new());
    let bridge = Arc::new(DeviceInfoBridge::from_config(&config));
    bridge.register(messenger.clone(), &config.channel);

    // Caller side: what the UI layer holds.
    let channel = MethodChannel::new(messenger, config.channel.as_str());
    match channel.invoke_method(&method, Value::Null) {
        Ok(Envelope::Success(Value::String(text))) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Ok(Envelope::Success(other)) => {
            println!("{other}");
            ExitCode::SUCCESS
        }
        Ok(Envelope::NotImplemented) => {
            eprintln!("{method}: not implemented");
            ExitCode::from(2)
        }
        Ok(Envelope::Error { code, message, .. }) => {
            eprintln!("{method}: {code}: {}", message.unwrap_or_default());
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "method call failed");
            ExitCode::FAILURE
        }
    }
}
