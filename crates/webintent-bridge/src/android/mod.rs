// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method runs inside its own JNI local
// frame, so references created while walking an intent are released when
// the call returns even though the native thread stays attached.
//
// ## Architecture notes
//
// Intents are converted eagerly into `Message` values: bundles are walked
// recursively, arrays are read through `java.lang.reflect.Array` (which
// boxes primitive elements), and every object outside the closed value set
// is rendered with `toString()`. Every intent field, extras entry, array
// element and clip item is its own fault boundary: a Java exception while
// reading one is cleared and logged, and only that value is lost.
//
// The host Activity forwards `onNewIntent` through `message_from_intent`.

#![cfg(target_os = "android")]

use std::fs::File;
use std::io::Read;
use std::os::fd::FromRawFd;
use std::path::PathBuf;
use std::sync::OnceLock;

use jni::objects::{JObject, JObjectArray, JString, JValue};
use jni::{JNIEnv, JavaVM};

use webintent_core::error::{Result, WebIntentError};
use webintent_core::{BridgeConfig, ClipItem, ClipSlot, ContentUri, ExtraValue, Extras, Message};

use crate::degrade;
use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// `android.database.Cursor.FIELD_TYPE_NULL`.
const FIELD_TYPE_NULL: i32 = 0;

/// `android.database.Cursor.FIELD_TYPE_BLOB`.
const FIELD_TYPE_BLOB: i32 = 4;

/// Capacity hint for per-call local frames.
const FRAME_CAPACITY: i32 = 64;

/// The process-wide `JavaVM`, resolved once from the NDK context.
fn java_vm() -> Result<&'static JavaVM> {
    static VM: OnceLock<JavaVM> = OnceLock::new();
    if let Some(vm) = VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| WebIntentError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    Ok(VM.get_or_init(|| vm))
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| WebIntentError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the current Android `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(WebIntentError::Bridge(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Convenience: map any `jni::errors::Error` into `WebIntentError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> WebIntentError {
    WebIntentError::Bridge(format!("{context}: {e}"))
}

/// Describe and clear a pending Java exception so later JNI calls are legal.
fn clear_exception(env: &mut JNIEnv<'_>) {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
}

/// Run `f` with the activity inside a fresh local frame.
fn in_frame<T>(f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> Result<T>) -> Result<T> {
    let mut env = jni_env()?;
    let activity = activity()?;

    env.push_local_frame(FRAME_CAPACITY)
        .map_err(|e| jni_err("PushLocalFrame", e))?;
    let result = f(&mut env, &activity);
    if result.is_err() {
        clear_exception(&mut env);
    }
    // SAFETY: nothing created inside the frame escapes it; `T` only holds
    // Rust-owned data.
    if let Err(e) = unsafe { env.pop_local_frame(&JObject::null()) } {
        tracing::warn!(error = %e, "PopLocalFrame failed");
    }
    result
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the webintent platform bridge.
///
/// All state lives on the Java side; the struct only carries the API level
/// threshold for clip data.
pub struct AndroidBridge {
    min_clip_data_sdk: i32,
}

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI — the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self::with_config(&BridgeConfig::default())
    }

    pub fn with_config(config: &BridgeConfig) -> Self {
        Self {
            min_clip_data_sdk: config.min_clip_data_sdk,
        }
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// HostActivity — Activity.getIntent / getFilesDir
// ---------------------------------------------------------------------------

impl HostActivity for AndroidBridge {
    fn current_message(&self) -> Result<Message> {
        let clip_data = self.supports_clip_data();
        in_frame(|env, activity| {
            let intent = env
                .call_method(activity, "getIntent", "()Landroid/content/Intent;", &[])
                .and_then(|v| v.l())
                .map_err(|e| jni_err("getIntent", e))?;
            if intent.is_null() {
                return Err(WebIntentError::Bridge("activity has no intent".into()));
            }
            Ok(read_message(env, &intent, clip_data))
        })
    }

    fn files_dir(&self) -> Result<PathBuf> {
        in_frame(|env, activity| {
            let dir = env
                .call_method(activity, "getFilesDir", "()Ljava/io/File;", &[])
                .and_then(|v| v.l())
                .map_err(|e| jni_err("getFilesDir", e))?;
            string_result(env, &dir, "getAbsolutePath", "()Ljava/lang/String;")
                .map_err(|e| jni_err("getAbsolutePath", e))?
                .map(PathBuf::from)
                .ok_or_else(|| WebIntentError::Bridge("getFilesDir returned null".into()))
        })
    }

    /// `ClipData` on intents exists from API 19 (KitKat) on.
    fn supports_clip_data(&self) -> bool {
        match sdk_int() {
            Ok(sdk) => sdk >= self.min_clip_data_sdk,
            Err(e) => {
                tracing::warn!(error = %e, "could not read SDK_INT, assuming no clip data");
                false
            }
        }
    }
}

/// Convert an `android.content.Intent` into a [`Message`].
///
/// Entry point for the host's `onNewIntent` glue.
pub fn message_from_intent(
    env: &mut JNIEnv<'_>,
    intent: &JObject<'_>,
    config: &BridgeConfig,
) -> Result<Message> {
    let sdk = env
        .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .and_then(|v| v.i())
        .map_err(|e| jni_err("Build.VERSION.SDK_INT", e))?;

    env.push_local_frame(FRAME_CAPACITY)
        .map_err(|e| jni_err("PushLocalFrame", e))?;
    let message = read_message(env, intent, sdk >= config.min_clip_data_sdk);
    // SAFETY: the returned `Message` holds no JNI references.
    if let Err(e) = unsafe { env.pop_local_frame(&JObject::null()) } {
        tracing::warn!(error = %e, "PopLocalFrame failed");
    }
    Ok(message)
}

fn sdk_int() -> Result<i32> {
    let mut env = jni_env()?;
    env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .and_then(|v| v.i())
        .map_err(|e| jni_err("Build.VERSION.SDK_INT", e))
}

// ---------------------------------------------------------------------------
// Intent -> Message
// ---------------------------------------------------------------------------

fn read_message(env: &mut JNIEnv<'_>, intent: &JObject<'_>, clip_data: bool) -> Message {
    let mut message = Message::new();

    message.action = read_field(env, "getAction", |env| {
        string_result(env, intent, "getAction", "()Ljava/lang/String;")
    })
    .flatten();
    message.mime_type = read_field(env, "getType", |env| {
        string_result(env, intent, "getType", "()Ljava/lang/String;")
    })
    .flatten();
    message.data = read_field(env, "getDataString", |env| {
        string_result(env, intent, "getDataString", "()Ljava/lang/String;")
    })
    .flatten();
    message.flags = read_field(env, "getFlags", |env| {
        env.call_method(intent, "getFlags", "()I", &[])?.i()
    })
    .unwrap_or(0);
    message.component = read_field(env, "getComponent", |env| {
        display_result(env, intent, "getComponent", "()Landroid/content/ComponentName;")
    })
    .flatten();
    message.package = read_field(env, "getPackage", |env| {
        string_result(env, intent, "getPackage", "()Ljava/lang/String;")
    })
    .flatten();

    // getCategories() returns null, not an empty set, when there are none.
    message.categories = read_field(env, "getCategories", |env| {
        let categories = env
            .call_method(intent, "getCategories", "()Ljava/util/Set;", &[])?
            .l()?;
        if categories.is_null() {
            return Ok(Vec::new());
        }
        read_string_set(env, &categories)
    })
    .unwrap_or_default()
    .into_iter()
    .collect();

    message.extras = read_field(env, "getExtras", |env| {
        let extras = env
            .call_method(intent, "getExtras", "()Landroid/os/Bundle;", &[])?
            .l()?;
        if extras.is_null() {
            return Ok(None);
        }
        read_bundle(env, &extras).map(Some)
    })
    .flatten();

    if clip_data {
        message.clip_items = read_clip_data(env, intent).unwrap_or_else(|e| {
            clear_exception(env);
            tracing::warn!(error = %e, "clip data unreadable, omitted");
            None
        });
    }

    tracing::debug!(
        action = message.action.as_deref().unwrap_or(""),
        extras = message.extras.as_ref().map_or(0, Extras::len),
        clip_items = message.clip_items.as_ref().map_or(0, Vec::len),
        "Android: intent read"
    );
    message
}

/// Read one intent field; a failure clears the pending exception and
/// omits the field.
fn read_field<T>(
    env: &mut JNIEnv<'_>,
    field: &str,
    read: impl FnOnce(&mut JNIEnv<'_>) -> jni::errors::Result<T>,
) -> Option<T> {
    let result = read(env);
    if result.is_err() {
        clear_exception(env);
    }
    degrade::degrade(field, result)
}

fn read_clip_data(env: &mut JNIEnv<'_>, intent: &JObject<'_>) -> Result<Option<Vec<ClipSlot>>> {
    let clip = env
        .call_method(intent, "getClipData", "()Landroid/content/ClipData;", &[])
        .and_then(|v| v.l())
        .map_err(|e| jni_err("getClipData", e))?;
    if clip.is_null() {
        return Ok(None);
    }

    let count = env
        .call_method(&clip, "getItemCount", "()I", &[])
        .and_then(|v| v.i())
        .map_err(|e| jni_err("ClipData.getItemCount", e))?;

    let mut slots = Vec::with_capacity(count.max(0) as usize);
    for index in 0..count {
        let read = env.with_local_frame(16, |env| read_clip_item(env, &clip, index));
        let slot = match read {
            Ok(item) => ClipSlot::Read(item),
            Err(e) => {
                clear_exception(env);
                ClipSlot::Unreadable(format!("clip item {index}: {e}"))
            }
        };
        slots.push(slot);
    }
    Ok(Some(slots))
}

fn read_clip_item(
    env: &mut JNIEnv<'_>,
    clip: &JObject<'_>,
    index: i32,
) -> jni::errors::Result<ClipItem> {
    let item = env
        .call_method(
            clip,
            "getItemAt",
            "(I)Landroid/content/ClipData$Item;",
            &[JValue::Int(index)],
        )?
        .l()?;

    Ok(ClipItem {
        html_text: string_result(env, &item, "getHtmlText", "()Ljava/lang/String;")?,
        intent: display_result(env, &item, "getIntent", "()Landroid/content/Intent;")?,
        text: display_result(env, &item, "getText", "()Ljava/lang/CharSequence;")?,
        uri: display_result(env, &item, "getUri", "()Landroid/net/Uri;")?,
    })
}

/// Walk a `Bundle` into [`Extras`]. Null keys cannot be represented and
/// are skipped; so is any value that throws while being read.
fn read_bundle(env: &mut JNIEnv<'_>, bundle: &JObject<'_>) -> jni::errors::Result<Extras> {
    let key_set = env
        .call_method(bundle, "keySet", "()Ljava/util/Set;", &[])?
        .l()?;
    let keys = read_string_set(env, &key_set)?;

    Ok(degrade::collect_extras(keys, |key| {
        let value = env.with_local_frame(16, |env| {
            let j_key = env.new_string(key)?;
            let value = env
                .call_method(
                    bundle,
                    "get",
                    "(Ljava/lang/String;)Ljava/lang/Object;",
                    &[JValue::Object(&j_key)],
                )?
                .l()?;
            read_value(env, &value)
        });
        if value.is_err() {
            clear_exception(env);
        }
        value
    }))
}

/// Type-dispatch one boxed Java value into the closed [`ExtraValue`] set.
fn read_value(env: &mut JNIEnv<'_>, value: &JObject<'_>) -> jni::errors::Result<ExtraValue> {
    if value.is_null() {
        return Ok(ExtraValue::Null);
    }
    if env.is_instance_of(value, "android/os/Bundle")? {
        return read_bundle(env, value).map(ExtraValue::Bundle);
    }

    let class = env.get_object_class(value)?;
    if env.call_method(&class, "isArray", "()Z", &[])?.z()? {
        return read_array(env, value).map(ExtraValue::Array);
    }

    if env.is_instance_of(value, "java/lang/String")? {
        let text: &JString = value.into();
        return Ok(ExtraValue::String(env.get_string(text)?.into()));
    }
    if env.is_instance_of(value, "java/lang/Boolean")? {
        return Ok(ExtraValue::Bool(
            env.call_method(value, "booleanValue", "()Z", &[])?.z()?,
        ));
    }
    if env.is_instance_of(value, "java/lang/Integer")? {
        return Ok(ExtraValue::Int(
            env.call_method(value, "intValue", "()I", &[])?.i()?,
        ));
    }
    if env.is_instance_of(value, "java/lang/Long")? {
        return Ok(ExtraValue::Long(
            env.call_method(value, "longValue", "()J", &[])?.j()?,
        ));
    }
    if env.is_instance_of(value, "java/lang/Double")? {
        return Ok(ExtraValue::Double(
            env.call_method(value, "doubleValue", "()D", &[])?.d()?,
        ));
    }

    Ok(ExtraValue::Other(object_to_string(env, value)?))
}

fn read_array(env: &mut JNIEnv<'_>, array: &JObject<'_>) -> jni::errors::Result<Vec<ExtraValue>> {
    let len = env
        .call_static_method(
            "java/lang/reflect/Array",
            "getLength",
            "(Ljava/lang/Object;)I",
            &[JValue::Object(array)],
        )?
        .i()?;

    Ok(degrade::collect_array(len.max(0) as usize, |index| {
        let item = env.with_local_frame(8, |env| {
            let element = env
                .call_static_method(
                    "java/lang/reflect/Array",
                    "get",
                    "(Ljava/lang/Object;I)Ljava/lang/Object;",
                    &[JValue::Object(array), JValue::Int(index as i32)],
                )?
                .l()?;
            read_value(env, &element)
        });
        if item.is_err() {
            clear_exception(env);
        }
        item
    }))
}

/// Read a `java.util.Set<String>` through `toArray()`.
fn read_string_set(env: &mut JNIEnv<'_>, set: &JObject<'_>) -> jni::errors::Result<Vec<String>> {
    let array = JObjectArray::from(
        env.call_method(set, "toArray", "()[Ljava/lang/Object;", &[])?
            .l()?,
    );
    let len = env.get_array_length(&array)?;

    let mut strings = Vec::with_capacity(len.max(0) as usize);
    for index in 0..len {
        let element = env.get_object_array_element(&array, index)?;
        if let Some(s) = java_string(env, element)? {
            strings.push(s);
        }
    }
    Ok(strings)
}

// ---------------------------------------------------------------------------
// ContentResolver — android.content.ContentResolver
// ---------------------------------------------------------------------------

impl ContentResolver for AndroidBridge {
    /// `resolver.query(uri, null, null, null, null)`, every row and column
    /// rendered as text. BLOB columns read as `None`.
    fn query(&self, uri: &ContentUri) -> Result<Vec<MetadataRow>> {
        in_frame(|env, activity| {
            let resolver = content_resolver(env, activity)?;
            let j_uri = parse_uri(env, uri)?;
            let null = JObject::null();

            let cursor = env
                .call_method(
                    &resolver,
                    "query",
                    "(Landroid/net/Uri;[Ljava/lang/String;Ljava/lang/String;[Ljava/lang/String;Ljava/lang/String;)Landroid/database/Cursor;",
                    &[
                        JValue::Object(&j_uri),
                        JValue::Object(&null),
                        JValue::Object(&null),
                        JValue::Object(&null),
                        JValue::Object(&null),
                    ],
                )
                .and_then(|v| v.l())
                .map_err(|e| jni_err("ContentResolver.query", e))?;
            if cursor.is_null() {
                return Err(WebIntentError::MetadataQuery(format!(
                    "provider returned no cursor for {uri}"
                )));
            }

            let rows = read_cursor(env, &cursor).map_err(|e| jni_err("Cursor read", e));
            if rows.is_err() {
                clear_exception(env);
            }
            // The cursor is closed whether or not reading it worked.
            if let Err(e) = env.call_method(&cursor, "close", "()V", &[]) {
                clear_exception(env);
                tracing::warn!(error = %e, "Cursor.close failed");
            }

            let rows = rows?;
            tracing::debug!(uri = %uri, rows = rows.len(), "Android: metadata queried");
            Ok(rows)
        })
    }

    /// `openFileDescriptor(uri, "r")`; the descriptor is detached from the
    /// `ParcelFileDescriptor` and owned by the returned `File`.
    fn open_input(&self, uri: &ContentUri) -> Result<Box<dyn Read + Send>> {
        in_frame(|env, activity| {
            let resolver = content_resolver(env, activity)?;
            let j_uri = parse_uri(env, uri)?;
            let j_mode = env
                .new_string("r")
                .map_err(|e| jni_err("new_string(mode)", e))?;

            let pfd = env
                .call_method(
                    &resolver,
                    "openFileDescriptor",
                    "(Landroid/net/Uri;Ljava/lang/String;)Landroid/os/ParcelFileDescriptor;",
                    &[JValue::Object(&j_uri), JValue::Object(&j_mode)],
                )
                .and_then(|v| v.l())
                .map_err(|e| {
                    WebIntentError::InvalidReference(format!("openFileDescriptor({uri}): {e}"))
                })?;
            if pfd.is_null() {
                return Err(WebIntentError::InvalidReference(format!(
                    "provider returned no descriptor for {uri}"
                )));
            }

            let fd = env
                .call_method(&pfd, "detachFd", "()I", &[])
                .and_then(|v| v.i())
                .map_err(|e| jni_err("ParcelFileDescriptor.detachFd", e))?;
            if fd < 0 {
                return Err(WebIntentError::InvalidReference(format!(
                    "invalid descriptor for {uri}"
                )));
            }

            // SAFETY: `detachFd` transfers ownership of a valid, open
            // descriptor to the caller; nothing else will close it.
            let file = unsafe { File::from_raw_fd(fd) };
            tracing::debug!(uri = %uri, fd, "Android: content stream opened");
            Ok(Box::new(file) as Box<dyn Read + Send>)
        })
    }

    fn mime_type(&self, uri: &ContentUri) -> Result<Option<String>> {
        in_frame(|env, activity| {
            let resolver = content_resolver(env, activity)?;
            let j_uri = parse_uri(env, uri)?;
            let mime = env
                .call_method(
                    &resolver,
                    "getType",
                    "(Landroid/net/Uri;)Ljava/lang/String;",
                    &[JValue::Object(&j_uri)],
                )
                .and_then(|v| v.l())
                .map_err(|e| jni_err("ContentResolver.getType", e))?;
            java_string(env, mime).map_err(|e| jni_err("getType->string", e))
        })
    }
}

// ---------------------------------------------------------------------------
// MimeTypeMap — android.webkit.MimeTypeMap
// ---------------------------------------------------------------------------

impl MimeTypeMap for AndroidBridge {
    fn extension_for_mime(&self, mime_type: &str) -> Option<String> {
        let lookup = in_frame(|env, _activity| {
            let map = env
                .call_static_method(
                    "android/webkit/MimeTypeMap",
                    "getSingleton",
                    "()Landroid/webkit/MimeTypeMap;",
                    &[],
                )
                .and_then(|v| v.l())
                .map_err(|e| jni_err("MimeTypeMap.getSingleton", e))?;
            let j_mime = env
                .new_string(mime_type)
                .map_err(|e| jni_err("new_string(mime)", e))?;
            let extension = env
                .call_method(
                    &map,
                    "getExtensionFromMimeType",
                    "(Ljava/lang/String;)Ljava/lang/String;",
                    &[JValue::Object(&j_mime)],
                )
                .and_then(|v| v.l())
                .map_err(|e| jni_err("getExtensionFromMimeType", e))?;
            java_string(env, extension).map_err(|e| jni_err("extension->string", e))
        });

        lookup.unwrap_or_else(|e| {
            tracing::warn!(mime = mime_type, error = %e, "Android: extension lookup failed");
            None
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn content_resolver<'l>(env: &mut JNIEnv<'l>, activity: &JObject<'_>) -> Result<JObject<'l>> {
    env.call_method(
        activity,
        "getContentResolver",
        "()Landroid/content/ContentResolver;",
        &[],
    )
    .and_then(|v| v.l())
    .map_err(|e| jni_err("getContentResolver", e))
}

/// `Uri.parse(uri)`.
fn parse_uri<'l>(env: &mut JNIEnv<'l>, uri: &ContentUri) -> Result<JObject<'l>> {
    let j_uri_str: JString = env
        .new_string(uri.as_str())
        .map_err(|e| jni_err("new_string(uri)", e))?;
    env.call_static_method(
        "android/net/Uri",
        "parse",
        "(Ljava/lang/String;)Landroid/net/Uri;",
        &[JValue::Object(&j_uri_str)],
    )
    .and_then(|v| v.l())
    .map_err(|e| jni_err("Uri.parse", e))
}

fn read_cursor(env: &mut JNIEnv<'_>, cursor: &JObject<'_>) -> jni::errors::Result<Vec<MetadataRow>> {
    let names = JObjectArray::from(
        env.call_method(cursor, "getColumnNames", "()[Ljava/lang/String;", &[])?
            .l()?,
    );
    let column_count = env.get_array_length(&names)?;
    let mut columns = Vec::with_capacity(column_count.max(0) as usize);
    for index in 0..column_count {
        let name = env.get_object_array_element(&names, index)?;
        columns.push(java_string(env, name)?.unwrap_or_default());
    }

    let mut rows = Vec::new();
    let mut positioned = env.call_method(cursor, "moveToFirst", "()Z", &[])?.z()?;
    while positioned {
        let row = env.with_local_frame(16, |env| {
            let mut row = MetadataRow::new();
            for (index, name) in columns.iter().enumerate() {
                let column = index as i32;
                let kind = env
                    .call_method(cursor, "getType", "(I)I", &[JValue::Int(column)])?
                    .i()?;
                let value = if kind == FIELD_TYPE_NULL || kind == FIELD_TYPE_BLOB {
                    None
                } else {
                    let text = env
                        .call_method(
                            cursor,
                            "getString",
                            "(I)Ljava/lang/String;",
                            &[JValue::Int(column)],
                        )?
                        .l()?;
                    java_string(env, text)?
                };
                row.insert(name.clone(), value);
            }
            Ok::<_, jni::errors::Error>(row)
        })?;
        rows.push(row);
        positioned = env.call_method(cursor, "moveToNext", "()Z", &[])?.z()?;
    }
    Ok(rows)
}

/// Call a no-argument method returning `java.lang.String`.
fn string_result(
    env: &mut JNIEnv<'_>,
    obj: &JObject<'_>,
    method: &str,
    sig: &str,
) -> jni::errors::Result<Option<String>> {
    let value = env.call_method(obj, method, sig, &[])?.l()?;
    java_string(env, value)
}

/// Call a no-argument method and render its result with `toString()`.
fn display_result(
    env: &mut JNIEnv<'_>,
    obj: &JObject<'_>,
    method: &str,
    sig: &str,
) -> jni::errors::Result<Option<String>> {
    let value = env.call_method(obj, method, sig, &[])?.l()?;
    if value.is_null() {
        return Ok(None);
    }
    object_to_string(env, &value).map(Some)
}

fn object_to_string(env: &mut JNIEnv<'_>, obj: &JObject<'_>) -> jni::errors::Result<String> {
    let text = env
        .call_method(obj, "toString", "()Ljava/lang/String;", &[])?
        .l()?;
    Ok(java_string(env, text)?.unwrap_or_else(|| "null".into()))
}

fn java_string(env: &mut JNIEnv<'_>, obj: JObject<'_>) -> jni::errors::Result<Option<String>> {
    if obj.is_null() {
        return Ok(None);
    }
    let text = JString::from(obj);
    Ok(Some(env.get_string(&text)?.into()))
}
