// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android build-property source via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Reads the static fields of `android.os.Build`
// and `android.os.Build$VERSION` through the ART runtime.
//
// The `JavaVM*` comes from `ndk_context`, which the host Activity's native
// glue initialises before any call can arrive on the channel.

#![cfg(target_os = "android")]

use jni::objects::{JObject, JString};
use jni::{JNIEnv, JavaVM};

use deviceinfo_core::BuildField;
use deviceinfo_core::error::{DeviceInfoError, Result};

use crate::traits::{BuildProperties, PropertyRead};

const BUILD_CLASS: &str = "android/os/Build";
const VERSION_CLASS: &str = "android/os/Build$VERSION";
const STRING_SIG: &str = "Ljava/lang/String;";

/// Class ref, field value and string value.
const LOCAL_FRAME_CAPACITY: i32 = 4;

/// Obtain the process-wide [`JavaVM`] from the global Android context.
fn java_vm() -> Result<JavaVM> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| DeviceInfoError::Bridge(format!("failed to obtain JavaVM: {e}")))
}

/// Convenience: map any `jni::errors::Error` into `DeviceInfoError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> DeviceInfoError {
    DeviceInfoError::Bridge(format!("{context}: {e}"))
}

/// Class and static field name backing each build property.
fn field_location(field: BuildField) -> (&'static str, &'static str) {
    match field {
        BuildField::Device => (BUILD_CLASS, "DEVICE"),
        BuildField::Manufacturer => (BUILD_CLASS, "MANUFACTURER"),
        BuildField::Model => (BUILD_CLASS, "MODEL"),
        BuildField::Product => (BUILD_CLASS, "PRODUCT"),
        BuildField::VersionRelease => (VERSION_CLASS, "RELEASE"),
        BuildField::VersionSdk => (VERSION_CLASS, "SDK_INT"),
        BuildField::Fingerprint => (BUILD_CLASS, "FINGERPRINT"),
    }
}

/// Android implementation of [`BuildProperties`].
///
/// The struct is zero-sized; each request attaches the current thread to the
/// VM once (a no-op when already attached) and queries ART directly.
#[derive(Debug, Default)]
pub struct AndroidBuildProperties;

impl AndroidBuildProperties {
    /// Create a new Android property source.
    ///
    /// This does **not** touch JNI; the first JNI call happens lazily when
    /// a property is read.
    pub fn new() -> Self {
        Self
    }
}

impl BuildProperties for AndroidBuildProperties {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn property(&self, field: BuildField) -> PropertyRead {
        let vm = java_vm()?;
        let mut env = vm
            .attach_current_thread()
            .map_err(|e| jni_err("attach_current_thread", e))?;
        read_in_local_frame(&mut env, field)
    }

    /// Attaches once for all seven reads.
    fn properties(&self) -> Result<[PropertyRead; 7]> {
        let vm = java_vm()?;
        let mut env = vm
            .attach_current_thread()
            .map_err(|e| jni_err("attach_current_thread", e))?;
        Ok(BuildField::ALL.map(|field| read_in_local_frame(&mut env, field)))
    }
}

/// Read one field inside its own local reference frame, so the `Build`
/// class and string refs are released before the next read.
fn read_in_local_frame(env: &mut JNIEnv<'_>, field: BuildField) -> PropertyRead {
    let value = env
        .with_local_frame(LOCAL_FRAME_CAPACITY, |env| -> jni::errors::Result<PropertyRead> {
            Ok(read_static_field(env, field))
        })
        .map_err(|e| jni_err("with_local_frame", e))
        .and_then(|read| read);
    if value.is_err() {
        clear_pending_exception(env);
    }
    value
}

fn read_static_field(env: &mut JNIEnv<'_>, field: BuildField) -> PropertyRead {
    let (class, name) = field_location(field);

    if field == BuildField::VersionSdk {
        let sdk = env
            .get_static_field(class, name, "I")
            .map_err(|e| jni_err(name, e))?
            .i()
            .map_err(|e| jni_err("SDK_INT->i", e))?;
        return Ok(Some(sdk.to_string()));
    }

    let obj: JObject = env
        .get_static_field(class, name, STRING_SIG)
        .map_err(|e| jni_err(name, e))?
        .l()
        .map_err(|e| jni_err("static field->l", e))?;

    // Build.UNKNOWN is the usual stand-in, but some ROMs leave fields null.
    if obj.is_null() {
        return Ok(None);
    }

    let value: String = env
        .get_string(&JString::from(obj))
        .map_err(|e| jni_err("get_string", e))?
        .into();
    Ok(Some(value))
}

/// A failed field lookup leaves a `NoSuchFieldError` pending; clear it so
/// the next JNI call on this thread is not poisoned.
fn clear_pending_exception(env: &mut JNIEnv<'_>) {
    if env.exception_check().unwrap_or(false) {
        tracing::warn!("clearing pending Java exception after build property read");
        let _ = env.exception_clear();
    }
}
