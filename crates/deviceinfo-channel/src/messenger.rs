// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Binary messengers: route opaque byte messages to per-channel handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One-shot callback carrying the reply bytes. `None` is an empty reply.
pub type BinaryReply = Box<dyn FnOnce(Option<Vec<u8>>) + Send>;

/// Receives raw messages for one channel.
pub trait BinaryMessageHandler: Send + Sync {
    /// Handle `message` and invoke `reply` exactly once.
    fn on_message(&self, message: Option<Vec<u8>>, reply: BinaryReply);
}

/// Transport between the UI layer and native code.
pub trait BinaryMessenger: Send + Sync {
    /// Deliver `message` to the handler registered for `channel`.
    ///
    /// If nothing is registered the message is dropped and `reply` receives
    /// an empty reply.
    fn send(&self, channel: &str, message: Option<Vec<u8>>, reply: BinaryReply);

    /// Install (`Some`) or remove (`None`) the handler for `channel`.
    /// Installing replaces any previous handler.
    fn set_message_handler(&self, channel: &str, handler: Option<Arc<dyn BinaryMessageHandler>>);
}

/// Messenger that dispatches synchronously on the sending thread.
///
/// Stands in for the host runtime's engine messenger in the composition
/// root and in tests.
#[derive(Default)]
pub struct InProcessMessenger {
    handlers: Mutex<HashMap<String, Arc<dyn BinaryMessageHandler>>>,
}

impl InProcessMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a handler is currently registered for `channel`.
    pub fn has_handler(&self, channel: &str) -> bool {
        self.handlers
            .lock()
            .expect("handler registry lock poisoned")
            .contains_key(channel)
    }
}

impl BinaryMessenger for InProcessMessenger {
    fn send(&self, channel: &str, message: Option<Vec<u8>>, reply: BinaryReply) {
        // Release the registry lock before dispatch so handlers may send or
        // re-register.
        let handler = self
            .handlers
            .lock()
            .expect("handler registry lock poisoned")
            .get(channel)
            .cloned();

        match handler {
            Some(handler) => handler.on_message(message, reply),
            None => {
                tracing::debug!(channel, "no handler registered, message dropped");
                reply(None);
            }
        }
    }

    fn set_message_handler(&self, channel: &str, handler: Option<Arc<dyn BinaryMessageHandler>>) {
        let mut handlers = self.handlers.lock().expect("handler registry lock poisoned");
        match handler {
            Some(handler) => {
                if handlers.insert(channel.to_string(), handler).is_some() {
                    tracing::debug!(channel, "replaced existing message handler");
                }
            }
            None => {
                handlers.remove(channel);
                tracing::debug!(channel, "message handler removed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    struct Echo;

    impl BinaryMessageHandler for Echo {
        fn on_message(&self, message: Option<Vec<u8>>, reply: BinaryReply) {
            reply(message);
        }
    }

    fn send_and_wait(
        messenger: &InProcessMessenger,
        channel: &str,
        message: &[u8],
    ) -> Option<Vec<u8>> {
        let (tx, rx) = mpsc::channel();
        messenger.send(
            channel,
            Some(message.to_vec()),
            Box::new(move |reply: Option<Vec<u8>>| {
                tx.send(reply).ok();
            }),
        );
        rx.try_recv().expect("reply delivered synchronously")
    }

    #[test]
    fn routes_to_registered_handler() {
        let messenger = InProcessMessenger::new();
        messenger.set_message_handler("echo", Some(Arc::new(Echo)));
        assert!(messenger.has_handler("echo"));
        assert_eq!(
            send_and_wait(&messenger, "echo", b"ping").as_deref(),
            Some(&b"ping"[..])
        );
    }

    #[test]
    fn unknown_channel_gets_empty_reply() {
        let messenger = InProcessMessenger::new();
        messenger.set_message_handler("echo", Some(Arc::new(Echo)));
        assert_eq!(send_and_wait(&messenger, "Echo", b"ping"), None);
    }

    /// Replies with a fixed tag so the caller can tell handlers apart.
    struct Tagged(&'static [u8]);

    impl BinaryMessageHandler for Tagged {
        fn on_message(&self, _message: Option<Vec<u8>>, reply: BinaryReply) {
            reply(Some(self.0.to_vec()));
        }
    }

    #[test]
    fn re_registering_replaces_previous_handler() {
        let messenger = InProcessMessenger::new();
        messenger.set_message_handler("tagged", Some(Arc::new(Tagged(b"first"))));
        messenger.set_message_handler("tagged", Some(Arc::new(Tagged(b"second"))));

        for _ in 0..3 {
            assert_eq!(
                send_and_wait(&messenger, "tagged", b"ping").as_deref(),
                Some(&b"second"[..])
            );
        }
    }

    #[test]
    fn removed_handler_no_longer_receives() {
        let messenger = InProcessMessenger::new();
        messenger.set_message_handler("echo", Some(Arc::new(Echo)));
        messenger.set_message_handler("echo", None);
        assert!(!messenger.has_handler("echo"));
        assert_eq!(send_and_wait(&messenger, "echo", b"ping"), None);
    }
}
