// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method codecs. Translate method calls and reply envelopes to and from
// the bytes carried by a `BinaryMessenger`.
//
// ## JSON wire format
//
//   call            {"method": "<name>", "args": <value or null>}
//   success reply   [<value>]
//   error reply     ["<code>", "<message>" or null, <details or null>]
//   not implemented (empty reply, no bytes)

use deviceinfo_core::error::{DeviceInfoError, Result};
use serde_json::Value;

use crate::call::MethodCall;

/// A decoded reply, as seen by the calling side.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// The handler completed with a value.
    Success(Value),
    /// The handler completed with an error.
    Error {
        code: String,
        message: Option<String>,
        details: Value,
    },
    /// No handler recognised the method, or nothing was listening.
    NotImplemented,
}

/// Encoding rules for method calls and their reply envelopes.
pub trait MethodCodec: Send + Sync {
    fn encode_method_call(&self, call: &MethodCall) -> Result<Vec<u8>>;

    fn decode_method_call(&self, message: &[u8]) -> Result<MethodCall>;

    fn encode_success_envelope(&self, value: &Value) -> Result<Vec<u8>>;

    fn encode_error_envelope(
        &self,
        code: &str,
        message: Option<&str>,
        details: Option<&Value>,
    ) -> Result<Vec<u8>>;

    /// Decode a reply. `None` and zero-length replies mean "not implemented".
    fn decode_envelope(&self, reply: Option<&[u8]>) -> Result<Envelope>;
}

/// UTF-8 JSON codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMethodCodec;

impl MethodCodec for JsonMethodCodec {
    fn encode_method_call(&self, call: &MethodCall) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(call)?)
    }

    fn decode_method_call(&self, message: &[u8]) -> Result<MethodCall> {
        serde_json::from_slice(message)
            .map_err(|e| DeviceInfoError::Codec(format!("invalid method call: {e}")))
    }

    fn encode_success_envelope(&self, value: &Value) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&Value::Array(vec![value.clone()]))?)
    }

    fn encode_error_envelope(
        &self,
        code: &str,
        message: Option<&str>,
        details: Option<&Value>,
    ) -> Result<Vec<u8>> {
        let envelope = Value::Array(vec![
            Value::String(code.to_string()),
            message.map_or(Value::Null, |m| Value::String(m.to_string())),
            details.cloned().unwrap_or(Value::Null),
        ]);
        Ok(serde_json::to_vec(&envelope)?)
    }

    fn decode_envelope(&self, reply: Option<&[u8]>) -> Result<Envelope> {
        let bytes = match reply {
            None => return Ok(Envelope::NotImplemented),
            Some(b) if b.is_empty() => return Ok(Envelope::NotImplemented),
            Some(b) => b,
        };

        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| DeviceInfoError::Codec(format!("invalid envelope: {e}")))?;

        let Value::Array(mut items) = value else {
            return Err(DeviceInfoError::Codec("envelope is not an array".into()));
        };

        match items.len() {
            1 => Ok(Envelope::Success(items.remove(0))),
            3 => {
                let details = items.pop().unwrap_or(Value::Null);
                let message = match items.pop() {
                    Some(Value::String(m)) => Some(m),
                    Some(Value::Null) | None => None,
                    Some(other) => {
                        return Err(DeviceInfoError::Codec(format!(
                            "error message is not a string: {other}"
                        )));
                    }
                };
                let code = match items.pop() {
                    Some(Value::String(c)) => c,
                    other => {
                        return Err(DeviceInfoError::Codec(format!(
                            "error code is not a string: {other:?}"
                        )));
                    }
                };
                Ok(Envelope::Error {
                    code,
                    message,
                    details,
                })
            }
            n => Err(DeviceInfoError::Codec(format!(
                "envelope has {n} elements, expected 1 or 3"
            ))),
        }
    }
}
