//! Direct binding convention: primitives cross the boundary as JNI
//! primitives. The handle travels as a `jlong`, words as a `String[]`,
//! and the result comes back as a constructed
//! `dev.gigapixel.tok4j.Tokenization` object. All lifecycle and
//! packaging semantics live in `tok4j_core`; this crate only translates.

mod convert;

use jni::objects::{JClass, JObject, JObjectArray, JString};
use jni::sys::jlong;
use jni::JNIEnv;
use jni_fn::jni_fn;

use tok4j_core::{factory, registry, TokenizerHandle};

use crate::convert::{read_string, read_string_array, tokenization_to_java};

/// Thrown for handles that were never issued or are already destroyed.
const INVALID_HANDLE_EXCEPTION: &str = "java/lang/IllegalStateException";
/// Thrown for creation and tokenization failures.
const BRIDGE_EXCEPTION: &str = "java/lang/RuntimeException";

fn exception_class(err: &convert::Error) -> &'static str {
    match err {
        convert::Error::Bridge(tok4j_core::Error::InvalidHandle(_)) => INVALID_HANDLE_EXCEPTION,
        _ => BRIDGE_EXCEPTION,
    }
}

fn throw(env: &mut JNIEnv<'_>, err: &convert::Error) {
    // A pending JNI exception means the JVM is already unwinding.
    if matches!(env.exception_check(), Ok(true)) {
        return;
    }
    let _ = env.throw_new(exception_class(err), err.to_string());
}

fn create_with(
    env: &mut JNIEnv<'_>,
    source: &JString<'_>,
    build: impl FnOnce(String) -> tok4j_core::Result<TokenizerHandle>,
) -> jlong {
    let result = read_string(env, source)
        .and_then(|source| build(source).map_err(convert::Error::from));
    match result {
        Ok(handle) => handle.as_raw(),
        Err(err) => {
            throw(env, &err);
            0
        }
    }
}

#[jni_fn("dev.gigapixel.tok4j.NativeTokenizer")]
pub fn createFromName<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    name: JString<'local>,
) -> jlong {
    create_with(&mut env, &name, |name| factory::from_name(&name))
}

#[jni_fn("dev.gigapixel.tok4j.NativeTokenizer")]
pub fn createFromPretrained<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    name: JString<'local>,
) -> jlong {
    create_with(&mut env, &name, |name| factory::from_pretrained(&name))
}

#[jni_fn("dev.gigapixel.tok4j.NativeTokenizer")]
pub fn createFromFile<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    path: JString<'local>,
) -> jlong {
    create_with(&mut env, &path, factory::from_file)
}

#[jni_fn("dev.gigapixel.tok4j.NativeTokenizer")]
pub fn deserializeFromContent<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    content: JString<'local>,
) -> jlong {
    create_with(&mut env, &content, |content| factory::from_content(&content))
}

#[jni_fn("dev.gigapixel.tok4j.NativeTokenizer")]
pub fn destroy<'local>(mut env: JNIEnv<'local>, _class: JClass<'local>, handle: jlong) {
    if let Err(err) = registry::release(TokenizerHandle::from_raw(handle)) {
        throw(&mut env, &err.into());
    }
}

#[jni_fn("dev.gigapixel.tok4j.NativeTokenizer")]
pub fn tokenize<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
    words: JObjectArray<'local>,
) -> JObject<'local> {
    match run_tokenize(&mut env, handle, &words) {
        Ok(object) => object,
        Err(err) => {
            throw(&mut env, &err);
            JObject::null()
        }
    }
}

fn run_tokenize<'local>(
    env: &mut JNIEnv<'local>,
    handle: jlong,
    words: &JObjectArray<'local>,
) -> convert::Result<JObject<'local>> {
    let words = read_string_array(env, words)?;
    let tokenization = tok4j_core::tokenize(TokenizerHandle::from_raw(handle), &words)?;
    tokenization_to_java(env, &tokenization)
}
