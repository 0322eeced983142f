//! Construction of engine instances from configuration sources.
//!
//! Four mutually exclusive paths, all producing handles of identical
//! shape. Each path first builds the `Tokenizer` value and only then
//! registers it, so a failed create leaves the registry untouched.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tokenizers::Tokenizer;

use crate::error::{CreationError, Result};
use crate::registry::{self, TokenizerHandle};

/// Colon-separated list of directories searched by [`from_name`] for
/// bundled configurations (`<name>.json` or `<name>/tokenizer.json`).
pub const BUNDLE_PATH_VAR: &str = "TOK4J_BUNDLE_PATH";

/// Resolves `name` against the bundled configurations on
/// [`BUNDLE_PATH_VAR`].
pub fn from_name(name: &str) -> Result<TokenizerHandle> {
    Ok(registry::register(build_from_name(name)?))
}

/// Fetches `name` from the pretrained-model hub (or its local cache).
pub fn from_pretrained(name: &str) -> Result<TokenizerHandle> {
    Ok(registry::register(build_from_pretrained(name)?))
}

/// Loads a serialized configuration from a local file.
pub fn from_file(path: impl AsRef<Path>) -> Result<TokenizerHandle> {
    Ok(registry::register(build_from_file(path.as_ref())?))
}

/// Reconstructs a configuration from an in-memory serialized blob. This
/// is how the JVM side feeds resource-embedded configurations across the
/// boundary without touching the filesystem.
pub fn from_content(content: &str) -> Result<TokenizerHandle> {
    Ok(registry::register(build_from_content(content)?))
}

fn build_from_name(name: &str) -> std::result::Result<Tokenizer, CreationError> {
    let path =
        bundled_config(name).ok_or_else(|| CreationError::UnknownName(name.to_string()))?;
    log::debug!("resolved bundled tokenizer {name:?} to {path:?}");
    Tokenizer::from_file(&path).map_err(CreationError::malformed)
}

fn build_from_pretrained(name: &str) -> std::result::Result<Tokenizer, CreationError> {
    log::debug!("fetching pretrained tokenizer {name:?}");
    Tokenizer::from_pretrained(name, None).map_err(|err| CreationError::SourceUnreachable {
        name: name.to_string(),
        reason: err.to_string(),
    })
}

fn build_from_file(path: &Path) -> std::result::Result<Tokenizer, CreationError> {
    let bytes = fs::read(path).map_err(|err| CreationError::UnreadableFile {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    Tokenizer::from_bytes(&bytes).map_err(CreationError::malformed)
}

fn build_from_content(content: &str) -> std::result::Result<Tokenizer, CreationError> {
    Tokenizer::from_bytes(content.as_bytes()).map_err(CreationError::malformed)
}

fn bundled_config(name: &str) -> Option<PathBuf> {
    let raw = env::var(BUNDLE_PATH_VAR).ok()?;
    for dir in raw.split(':').filter(|dir| !dir.is_empty()) {
        let flat = Path::new(dir).join(format!("{name}.json"));
        if flat.is_file() {
            return Some(flat);
        }
        let nested = Path::new(dir).join(name).join("tokenizer.json");
        if nested.is_file() {
            return Some(nested);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testutil::small_tokenizer_json;

    #[test]
    fn from_content_yields_resolvable_handle() {
        let handle = from_content(&small_tokenizer_json()).unwrap();
        assert!(registry::resolve(handle).is_ok());
        registry::release(handle).unwrap();
    }

    #[test]
    fn from_content_rejects_garbage() {
        let err = from_content("definitely not a tokenizer").unwrap_err();
        assert!(matches!(
            err,
            Error::Creation(CreationError::Malformed(_))
        ));
    }

    #[test]
    fn from_file_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");
        fs::write(&path, small_tokenizer_json()).unwrap();

        let handle = from_file(&path).unwrap();
        assert!(registry::resolve(handle).is_ok());
        registry::release(handle).unwrap();
    }

    #[test]
    fn from_file_reports_unreadable_path() {
        let err = from_file("/nonexistent/tokenizer.json").unwrap_err();
        assert!(matches!(
            err,
            Error::Creation(CreationError::UnreadableFile { .. })
        ));
    }

    #[test]
    fn from_file_reports_malformed_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");
        fs::write(&path, "{\"truncated\":").unwrap();

        let err = from_file(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::Creation(CreationError::Malformed(_))
        ));
    }

    // All assertions against the bundle path live in this one test; the
    // variable is process-global and tests run concurrently.
    #[test]
    fn from_name_searches_the_bundle_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("toy.json"), small_tokenizer_json()).unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("tokenizer.json"), small_tokenizer_json()).unwrap();
        env::set_var(BUNDLE_PATH_VAR, dir.path());

        let flat = from_name("toy").unwrap();
        assert!(registry::resolve(flat).is_ok());
        let nested = from_name("nested").unwrap();
        assert!(registry::resolve(nested).is_ok());
        let err = from_name("no-such-bundle").unwrap_err();
        assert!(matches!(
            err,
            Error::Creation(CreationError::UnknownName(_))
        ));

        registry::release(flat).unwrap();
        registry::release(nested).unwrap();
    }
}
