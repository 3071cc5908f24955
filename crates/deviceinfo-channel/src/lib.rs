// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method-channel transport between the UI layer and native code.
//
// A `BinaryMessenger` moves opaque byte messages between named channels. A
// `MethodChannel` layers a `MethodCodec` on top so that handlers see decoded
// `MethodCall`s and answer through a one-shot `MethodResult`.

pub mod call;
pub mod codec;
pub mod messenger;
pub mod method_channel;

pub use call::MethodCall;
pub use codec::{Envelope, JsonMethodCodec, MethodCodec};
pub use messenger::{BinaryMessageHandler, BinaryMessenger, BinaryReply, InProcessMessenger};
pub use method_channel::{MethodCallHandler, MethodChannel, MethodResult};
