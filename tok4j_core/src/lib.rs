//! Native side of a JVM tokenizer bridge.
//!
//! A managed caller builds a [`tokenizers::Tokenizer`] from one of four
//! configuration sources, receives an opaque handle, runs word sequences
//! through it, and destroys it explicitly. This crate owns the handle
//! lifecycle and the result packaging; the binding crates (`tok4j_jni`,
//! `tok4j_j4rs`) only translate their calling convention onto the
//! functions exported here, so every convention shares one set of
//! semantics.

pub mod error;
pub mod factory;
pub mod registry;
pub mod tokenization;

pub use error::{CreationError, Error, Result};
pub use registry::TokenizerHandle;
pub use tokenization::{tokenize, Tokenization, UNALIGNED_WORD_ID};

#[cfg(test)]
pub(crate) mod testutil {
    use std::collections::HashMap;

    use tokenizers::models::wordpiece::WordPiece;
    use tokenizers::pre_tokenizers::whitespace::Whitespace;
    use tokenizers::processors::template::TemplateProcessing;
    use tokenizers::Tokenizer;

    /// WordPiece engine over a toy vocabulary. "world" is only reachable
    /// through the pieces "wor" + "##ld", and the [CLS]/[SEP] template
    /// guarantees unaligned structural tokens in every encoding.
    pub(crate) fn small_tokenizer() -> Tokenizer {
        let vocab: HashMap<String, u32> = [
            ("[UNK]", 0),
            ("[CLS]", 1),
            ("[SEP]", 2),
            ("hello", 3),
            ("wor", 4),
            ("##ld", 5),
            ("rust", 6),
        ]
        .into_iter()
        .map(|(token, id)| (token.to_string(), id))
        .collect();
        let model = WordPiece::builder()
            .vocab(vocab)
            .unk_token("[UNK]".to_string())
            .build()
            .expect("toy wordpiece vocab");
        let mut tokenizer = Tokenizer::new(model);
        tokenizer.with_pre_tokenizer(Whitespace {});
        let template = TemplateProcessing::builder()
            .try_single("[CLS] $A [SEP]")
            .expect("toy template")
            .special_tokens(vec![("[CLS]".to_string(), 1), ("[SEP]".to_string(), 2)])
            .build()
            .expect("toy post processor");
        tokenizer.with_post_processor(template);
        tokenizer
    }

    pub(crate) fn small_tokenizer_json() -> String {
        small_tokenizer()
            .to_string(false)
            .expect("serializable tokenizer")
    }

    /// An engine that fails at encode time: its unknown token is not in
    /// the vocabulary, so any out-of-vocabulary word is unrepresentable.
    pub(crate) fn broken_tokenizer() -> Tokenizer {
        let vocab: HashMap<String, u32> = [("hello", 0), ("rust", 1)]
            .into_iter()
            .map(|(token, id)| (token.to_string(), id))
            .collect();
        let model = WordPiece::builder()
            .vocab(vocab)
            .unk_token("[UNK]".to_string())
            .build()
            .expect("toy wordpiece vocab");
        let mut tokenizer = Tokenizer::new(model);
        tokenizer.with_pre_tokenizer(Whitespace {});
        tokenizer
    }
}
