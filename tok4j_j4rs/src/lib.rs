//! Instance-marshaling binding convention. The JVM side cannot pass
//! primitives through this mechanism, so every value, the handle
//! included, crosses boxed in a j4rs `Instance` and is unwrapped on each
//! side. Semantics are those of `tok4j_core`, identical to the direct
//! convention; an `Err` returned here is rethrown as a Java exception by
//! the j4rs runtime.

use std::convert::TryFrom;

use j4rs::errors::J4RsError;
use j4rs::prelude::*;
use j4rs::InvocationArg;
use j4rs_derive::call_from_java;

use tok4j_core::{factory, registry, Tokenization, TokenizerHandle};

/// Java class constructed for every tokenize result. Its constructor
/// takes the three parallel columns as `AbstractList`s, which is how
/// j4rs materializes the slices passed below.
const TOKENIZATION_CLASS: &str = "dev.gigapixel.tok4j.j4rs.J4rsTokenization";

#[call_from_java("dev.gigapixel.tok4j.j4rs.J4rsTokenizer.createFromName")]
fn create_from_name(name_instance: Instance) -> Result<Instance, String> {
    let jvm = attach()?;
    let name: String = jvm.to_rust(name_instance).map_err(stringify)?;
    let handle = factory::from_name(&name).map_err(stringify)?;
    handle_instance(handle)
}

#[call_from_java("dev.gigapixel.tok4j.j4rs.J4rsTokenizer.createFromPretrained")]
fn create_from_pretrained(name_instance: Instance) -> Result<Instance, String> {
    let jvm = attach()?;
    let name: String = jvm.to_rust(name_instance).map_err(stringify)?;
    let handle = factory::from_pretrained(&name).map_err(stringify)?;
    handle_instance(handle)
}

#[call_from_java("dev.gigapixel.tok4j.j4rs.J4rsTokenizer.createFromFile")]
fn create_from_file(path_instance: Instance) -> Result<Instance, String> {
    let jvm = attach()?;
    let path: String = jvm.to_rust(path_instance).map_err(stringify)?;
    let handle = factory::from_file(&path).map_err(stringify)?;
    handle_instance(handle)
}

#[call_from_java("dev.gigapixel.tok4j.j4rs.J4rsTokenizer.deserializeFromContent")]
fn deserialize_from_content(content_instance: Instance) -> Result<Instance, String> {
    let jvm = attach()?;
    let content: String = jvm.to_rust(content_instance).map_err(stringify)?;
    let handle = factory::from_content(&content).map_err(stringify)?;
    handle_instance(handle)
}

#[call_from_java("dev.gigapixel.tok4j.j4rs.J4rsTokenizer.destroy")]
fn destroy(handle_instance: Instance) -> Result<Instance, String> {
    let jvm = attach()?;
    let raw: i64 = jvm.to_rust(handle_instance).map_err(stringify)?;
    registry::release(TokenizerHandle::from_raw(raw)).map_err(stringify)?;
    // The caller discards this; a boxed true is just the Ok shape.
    wrap_arg(InvocationArg::try_from(true))
}

#[call_from_java("dev.gigapixel.tok4j.j4rs.J4rsTokenizer.tokenize")]
fn tokenize(handle_instance: Instance, words_instance: Instance) -> Result<Instance, String> {
    let jvm = attach()?;
    let raw: i64 = jvm.to_rust(handle_instance).map_err(stringify)?;
    let words: Vec<String> = jvm.to_rust(words_instance).map_err(stringify)?;
    let tokenization =
        tok4j_core::tokenize(TokenizerHandle::from_raw(raw), &words).map_err(stringify)?;
    tokenization_instance(&jvm, &tokenization)
}

fn tokenization_instance(jvm: &Jvm, tokenization: &Tokenization) -> Result<Instance, String> {
    let token_ids = tokenization.jvm_token_ids();
    let word_ids = tokenization.jvm_word_ids();
    jvm.create_instance(
        TOKENIZATION_CLASS,
        &[
            InvocationArg::try_from(&token_ids[..]).map_err(stringify)?,
            InvocationArg::try_from(&word_ids[..]).map_err(stringify)?,
            InvocationArg::try_from(&tokenization.tokens[..]).map_err(stringify)?,
        ],
    )
    .map_err(stringify)
}

fn handle_instance(handle: TokenizerHandle) -> Result<Instance, String> {
    wrap_arg(InvocationArg::try_from(handle.as_raw()))
}

fn attach() -> Result<Jvm, String> {
    Jvm::attach_thread().map_err(stringify)
}

fn wrap_arg(arg: std::result::Result<InvocationArg, J4RsError>) -> Result<Instance, String> {
    Instance::try_from(arg.map_err(stringify)?).map_err(stringify)
}

fn stringify(err: impl std::fmt::Display) -> String {
    err.to_string()
}
