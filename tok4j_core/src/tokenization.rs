//! The tokenize operation and its exchange data model.

use tokenizers::Encoding;

use crate::error::{Error, Result};
use crate::registry::{self, TokenizerHandle};

/// Boundary encoding of an unaligned word id. JVM arrays cannot carry an
/// optional integer, so `None` crosses as this value.
pub const UNALIGNED_WORD_ID: i32 = -1;

/// Result of one tokenize call: three parallel sequences of equal length.
///
/// The value is owned by the caller that requested it and has no further
/// coupling to the handle that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenization {
    /// Vocabulary index of each produced subword token.
    pub token_ids: Vec<u32>,
    /// For each subword token, the input word (by position) it came from,
    /// or `None` for structural tokens the engine added on its own.
    pub word_ids: Vec<Option<u32>>,
    /// Surface form of each produced subword token.
    pub tokens: Vec<String>,
}

impl Tokenization {
    pub fn len(&self) -> usize {
        self.token_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }

    /// Token ids flattened for an `int[]` boundary.
    pub fn jvm_token_ids(&self) -> Vec<i32> {
        self.token_ids.iter().map(|&id| id as i32).collect()
    }

    /// The alignment column flattened for an `int[]` boundary: unaligned
    /// tokens become [`UNALIGNED_WORD_ID`]. Both binding conventions use
    /// this helper, so the sentinel has exactly one definition.
    pub fn jvm_word_ids(&self) -> Vec<i32> {
        self.word_ids
            .iter()
            .map(|word_id| word_id.map_or(UNALIGNED_WORD_ID, |id| id as i32))
            .collect()
    }
}

impl From<Encoding> for Tokenization {
    fn from(encoding: Encoding) -> Self {
        Tokenization {
            token_ids: encoding.get_ids().to_vec(),
            word_ids: encoding.get_word_ids().to_vec(),
            tokens: encoding.get_tokens().to_vec(),
        }
    }
}

/// Runs the engine behind `handle` over pre-split words.
///
/// The engine decides subword boundaries and alignment; this layer only
/// repackages its encoding, without reordering or truncation. An empty
/// word sequence is legal and yields whatever the engine's post-processor
/// produces for it. Engine failures surface as [`Error::Tokenization`]
/// and leave the handle usable.
pub fn tokenize(handle: TokenizerHandle, words: &[String]) -> Result<Tokenization> {
    let tokenizer = registry::resolve(handle)?;
    let encoding = tokenizer
        .encode(&words[..], true)
        .map_err(Error::tokenization)?;
    Ok(Tokenization::from(encoding))
}
