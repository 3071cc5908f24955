// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Named method channels on top of a `BinaryMessenger`.
//
// Every incoming call is answered exactly once. The `MethodResult` methods
// consume the result, so a handler cannot complete it twice; a result that
// is dropped without being completed answers with an `unhandled` error.

use std::sync::{Arc, mpsc};

use deviceinfo_core::error::{DeviceInfoError, Result};
use serde_json::Value;

use crate::call::MethodCall;
use crate::codec::{Envelope, JsonMethodCodec, MethodCodec};
use crate::messenger::{BinaryMessageHandler, BinaryMessenger, BinaryReply};

/// Error code sent when an incoming message cannot be decoded.
pub const INVALID_CALL: &str = "invalid_call";

/// Error code sent when a handler drops its result without completing it.
pub const UNHANDLED: &str = "unhandled";

/// Error code sent when the codec cannot encode the real reply.
pub const ENCODE_FAILED: &str = "encode_failed";

/// Minimal error reply for when encoding the real one failed.
///
/// Only if the codec cannot encode even this is an empty reply sent, which
/// the caller reads as not implemented.
fn encode_failure_reply(codec: &dyn MethodCodec) -> Option<Vec<u8>> {
    codec.encode_error_envelope(ENCODE_FAILED, None, None).ok()
}

/// One-shot response sink for a single `MethodCall`.
pub trait MethodResult: Send {
    /// Complete with a value.
    fn success(self: Box<Self>, value: Value);

    /// Complete with an error.
    fn error(self: Box<Self>, code: &str, message: Option<&str>, details: Option<Value>);

    /// Signal that the method is not handled here.
    fn not_implemented(self: Box<Self>);
}

/// Handles decoded calls arriving on a `MethodChannel`.
pub trait MethodCallHandler: Send + Sync {
    fn on_method_call(&self, call: MethodCall, result: Box<dyn MethodResult>);
}

impl<F> MethodCallHandler for F
where
    F: Fn(MethodCall, Box<dyn MethodResult>) + Send + Sync,
{
    fn on_method_call(&self, call: MethodCall, result: Box<dyn MethodResult>) {
        self(call, result)
    }
}

/// A named channel bound to a messenger and a codec.
#[derive(Clone)]
pub struct MethodChannel {
    name: String,
    messenger: Arc<dyn BinaryMessenger>,
    codec: Arc<dyn MethodCodec>,
}

impl MethodChannel {
    /// Create a channel using the JSON codec.
    pub fn new(messenger: Arc<dyn BinaryMessenger>, name: impl Into<String>) -> Self {
        Self::with_codec(messenger, name, Arc::new(JsonMethodCodec))
    }

    pub fn with_codec(
        messenger: Arc<dyn BinaryMessenger>,
        name: impl Into<String>,
        codec: Arc<dyn MethodCodec>,
    ) -> Self {
        Self {
            name: name.into(),
            messenger,
            codec,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Install (`Some`) or remove (`None`) the handler for this channel.
    pub fn set_method_call_handler(&self, handler: Option<Arc<dyn MethodCallHandler>>) {
        let binary = handler.map(|handler| {
            Arc::new(IncomingCalls {
                channel: self.name.clone(),
                codec: Arc::clone(&self.codec),
                handler,
            }) as Arc<dyn BinaryMessageHandler>
        });
        self.messenger.set_message_handler(&self.name, binary);
    }

    /// Call `method` on the other side and return the decoded reply.
    ///
    /// Requires a messenger that replies before `send` returns; otherwise
    /// fails with `NoReply`.
    pub fn invoke_method(&self, method: &str, arguments: Value) -> Result<Envelope> {
        let call = MethodCall::with_arguments(method, arguments);
        let message = self.codec.encode_method_call(&call)?;

        let (tx, rx) = mpsc::channel();
        self.messenger.send(
            &self.name,
            Some(message),
            Box::new(move |reply: Option<Vec<u8>>| {
                // The receiver only goes away once `invoke_method` has
                // already given up on this call.
                let _ = tx.send(reply);
            }),
        );

        let reply = rx.try_recv().map_err(|_| DeviceInfoError::NoReply {
            channel: self.name.clone(),
        })?;
        self.codec.decode_envelope(reply.as_deref())
    }
}

/// Adapts a `MethodCallHandler` to the messenger's byte-level interface.
struct IncomingCalls {
    channel: String,
    codec: Arc<dyn MethodCodec>,
    handler: Arc<dyn MethodCallHandler>,
}

impl BinaryMessageHandler for IncomingCalls {
    fn on_message(&self, message: Option<Vec<u8>>, reply: BinaryReply) {
        let decoded = match message.as_deref() {
            Some(bytes) => self.codec.decode_method_call(bytes),
            None => Err(DeviceInfoError::Codec("empty message".into())),
        };

        let call = match decoded {
            Ok(call) => call,
            Err(e) => {
                tracing::warn!(channel = %self.channel, error = %e, "rejecting undecodable call");
                let envelope = self
                    .codec
                    .encode_error_envelope(INVALID_CALL, Some(&e.to_string()), None)
                    .ok()
                    .or_else(|| encode_failure_reply(self.codec.as_ref()));
                reply(envelope);
                return;
            }
        };

        tracing::debug!(channel = %self.channel, method = %call.method, "dispatching method call");
        let result = ReplySink {
            channel: self.channel.clone(),
            method: call.method.clone(),
            codec: Arc::clone(&self.codec),
            reply: Some(reply),
        };
        self.handler.on_method_call(call, Box::new(result));
    }
}

/// `MethodResult` that encodes the outcome and hands it to the messenger.
struct ReplySink {
    channel: String,
    method: String,
    codec: Arc<dyn MethodCodec>,
    reply: Option<BinaryReply>,
}

impl ReplySink {
    fn complete(&mut self, encoded: Result<Option<Vec<u8>>>) {
        let Some(reply) = self.reply.take() else {
            return;
        };
        match encoded {
            Ok(bytes) => reply(bytes),
            Err(e) => {
                tracing::error!(
                    channel = %self.channel,
                    method = %self.method,
                    error = %e,
                    "failed to encode reply"
                );
                reply(encode_failure_reply(self.codec.as_ref()));
            }
        }
    }
}

impl MethodResult for ReplySink {
    fn success(mut self: Box<Self>, value: Value) {
        let encoded = self.codec.encode_success_envelope(&value).map(Some);
        self.complete(encoded);
    }

    fn error(mut self: Box<Self>, code: &str, message: Option<&str>, details: Option<Value>) {
        let encoded = self
            .codec
            .encode_error_envelope(code, message, details.as_ref())
            .map(Some);
        self.complete(encoded);
    }

    fn not_implemented(mut self: Box<Self>) {
        self.complete(Ok(None));
    }
}

impl Drop for ReplySink {
    fn drop(&mut self) {
        if self.reply.is_some() {
            tracing::error!(
                channel = %self.channel,
                method = %self.method,
                "method result dropped without a reply"
            );
            let encoded = self
                .codec
                .encode_error_envelope(UNHANDLED, Some("handler did not reply"), None)
                .map(Some);
            self.complete(encoded);
        }
    }
}
