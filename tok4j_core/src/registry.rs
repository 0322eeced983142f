//! Arena of live engine instances, keyed by opaque handles.
//!
//! The registry is the sole arbiter of instance lifetime: nothing outside
//! this module ever sees a `Tokenizer` except through [`resolve`], and the
//! `Arc` a caller gets back dies with the call that requested it. Handle
//! values come from a monotone counter and are never reissued, so a
//! destroyed handle stays invalid for the rest of the process.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use tokenizers::Tokenizer;

use crate::error::{Error, Result};

/// Opaque identifier for one live engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenizerHandle(i64);

impl TokenizerHandle {
    /// Rebuilds a handle from the integral form that crossed the boundary.
    pub fn from_raw(raw: i64) -> Self {
        TokenizerHandle(raw)
    }

    /// The integral form passed across the boundary.
    pub fn as_raw(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TokenizerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Registry {
    slots: RwLock<HashMap<i64, Arc<Tokenizer>>>,
    next: AtomicI64,
}

impl Registry {
    fn new() -> Self {
        Registry {
            slots: RwLock::new(HashMap::new()),
            // 0 is reserved: the direct convention returns it from failed
            // creates, so it must never denote a live instance.
            next: AtomicI64::new(1),
        }
    }

    fn register(&self, tokenizer: Tokenizer) -> TokenizerHandle {
        let handle = TokenizerHandle(self.next.fetch_add(1, Ordering::Relaxed));
        let mut slots = self.slots.write().expect("registry lock poisoned");
        slots.insert(handle.0, Arc::new(tokenizer));
        handle
    }

    fn resolve(&self, handle: TokenizerHandle) -> Result<Arc<Tokenizer>> {
        let slots = self.slots.read().expect("registry lock poisoned");
        slots
            .get(&handle.0)
            .cloned()
            .ok_or(Error::InvalidHandle(handle))
    }

    fn release(&self, handle: TokenizerHandle) -> Result<()> {
        let mut slots = self.slots.write().expect("registry lock poisoned");
        slots
            .remove(&handle.0)
            .map(|_| ())
            .ok_or(Error::InvalidHandle(handle))
    }

    fn live_count(&self) -> usize {
        self.slots.read().expect("registry lock poisoned").len()
    }
}

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Takes ownership of a fresh engine instance and issues its handle.
pub fn register(tokenizer: Tokenizer) -> TokenizerHandle {
    let handle = REGISTRY.register(tokenizer);
    log::debug!("registered tokenizer as handle {handle}");
    handle
}

/// Looks up the instance behind `handle`. The returned `Arc` keeps the
/// instance alive for the duration of the operation even if a release
/// lands concurrently.
pub fn resolve(handle: TokenizerHandle) -> Result<Arc<Tokenizer>> {
    REGISTRY.resolve(handle)
}

/// Unbinds `handle` and drops the registry's reference to the instance.
/// Not idempotent: releasing twice reports the second call's handle as
/// invalid.
pub fn release(handle: TokenizerHandle) -> Result<()> {
    REGISTRY.release(handle)?;
    log::debug!("released tokenizer handle {handle}");
    Ok(())
}

/// Number of currently live instances.
pub fn live_count() -> usize {
    REGISTRY.live_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::small_tokenizer;

    #[test]
    fn register_then_resolve_round_trips() {
        let registry = Registry::new();
        let handle = registry.register(small_tokenizer());
        assert!(registry.resolve(handle).is_ok());
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn handles_are_distinct_per_instance() {
        let registry = Registry::new();
        let first = registry.register(small_tokenizer());
        let second = registry.register(small_tokenizer());
        assert_ne!(first, second);
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn resolve_of_unissued_handle_fails() {
        let registry = Registry::new();
        assert!(matches!(
            registry.resolve(TokenizerHandle::from_raw(41)),
            Err(Error::InvalidHandle(handle)) if handle.as_raw() == 41
        ));
    }

    #[test]
    fn release_unbinds_and_is_not_idempotent() {
        let registry = Registry::new();
        let handle = registry.register(small_tokenizer());
        registry.release(handle).unwrap();
        assert_eq!(registry.live_count(), 0);
        assert!(matches!(
            registry.resolve(handle),
            Err(Error::InvalidHandle(_))
        ));
        assert!(matches!(
            registry.release(handle),
            Err(Error::InvalidHandle(_))
        ));
    }

    #[test]
    fn released_values_are_never_reissued() {
        let registry = Registry::new();
        let released = registry.register(small_tokenizer());
        registry.release(released).unwrap();
        for _ in 0..8 {
            let fresh = registry.register(small_tokenizer());
            assert_ne!(fresh, released);
        }
    }

    #[test]
    fn global_registry_round_trips() {
        let handle = register(small_tokenizer());
        assert!(resolve(handle).is_ok());
        release(handle).unwrap();
        assert!(matches!(resolve(handle), Err(Error::InvalidHandle(_))));
    }
}
