//! Marshaling between JNI values and the core's types.

use jni::objects::{JIntArray, JObject, JObjectArray, JString, JValue};
use jni::sys::jint;
use jni::JNIEnv;

use tok4j_core::Tokenization;

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("jni error: {0}")]
    Jni(#[from] jni::errors::Error),
    #[error(transparent)]
    Bridge(#[from] tok4j_core::Error),
}

/// Java class constructed for every tokenize result:
/// `Tokenization(int[] tokenIds, int[] wordIds, String[] tokens)`.
pub(crate) const TOKENIZATION_CLASS: &str = "dev/gigapixel/tok4j/Tokenization";
const TOKENIZATION_CTOR: &str = "([I[I[Ljava/lang/String;)V";

pub(crate) fn read_string(env: &mut JNIEnv<'_>, value: &JString<'_>) -> Result<String> {
    Ok(env.get_string(value)?.into())
}

pub(crate) fn read_string_array(
    env: &mut JNIEnv<'_>,
    array: &JObjectArray<'_>,
) -> Result<Vec<String>> {
    let length = env.get_array_length(array)?;
    let mut items = Vec::with_capacity(length as usize);
    for idx in 0..length {
        let element = env.get_object_array_element(array, idx)?;
        let j_string: JString<'_> = element.into();
        items.push(env.get_string(&j_string)?.into());
    }
    Ok(items)
}

pub(crate) fn tokenization_to_java<'local>(
    env: &mut JNIEnv<'local>,
    tokenization: &Tokenization,
) -> Result<JObject<'local>> {
    let token_ids = new_int_array(env, &tokenization.jvm_token_ids())?;
    let word_ids = new_int_array(env, &tokenization.jvm_word_ids())?;
    let tokens = new_string_array(env, &tokenization.tokens)?;
    let object = env.new_object(
        TOKENIZATION_CLASS,
        TOKENIZATION_CTOR,
        &[
            JValue::Object(&token_ids),
            JValue::Object(&word_ids),
            JValue::Object(&tokens),
        ],
    )?;
    Ok(object)
}

fn new_int_array<'local>(env: &mut JNIEnv<'local>, items: &[i32]) -> Result<JIntArray<'local>> {
    let array = env.new_int_array(items.len() as jint)?;
    env.set_int_array_region(&array, 0, items)?;
    Ok(array)
}

fn new_string_array<'local>(
    env: &mut JNIEnv<'local>,
    items: &[String],
) -> Result<JObjectArray<'local>> {
    let empty = env.new_string("")?;
    let string_class = env.get_object_class(&empty)?;
    let array = env.new_object_array(items.len() as jint, string_class, &empty)?;
    for (idx, item) in items.iter().enumerate() {
        let element = env.new_string(item)?;
        env.set_object_array_element(&array, idx as jint, element)?;
    }
    Ok(array)
}
