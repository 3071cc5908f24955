// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the device-info bridge.

use thiserror::Error;

use crate::types::BuildField;

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum DeviceInfoError {
    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    #[error("build property unavailable: {0}")]
    PropertyUnavailable(BuildField),

    // -- Channel transport --
    #[error("method codec error: {0}")]
    Codec(String),

    #[error("no reply received on channel {channel}")]
    NoReply { channel: String },

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DeviceInfoError>;
