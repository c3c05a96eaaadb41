//! Lazily derived configurations cached per factory.
//!
//! Readers take the lock-free path: one atomic load of the cached
//! configuration. Only a miss takes the slot's lock, rechecks the cache, and
//! derives a fresh configuration from the current base. Invalidation takes
//! the same lock, so a fill that read a stale base can never be published
//! after the invalidation that should have discarded it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::{ArcSwap, ArcSwapOption};
use parking_lot::Mutex;

use crate::config::Configuration;

pub(crate) type Derive = fn(&Configuration) -> Configuration;

/// One derived configuration slot.
pub(crate) struct DerivedConfiguration {
    label: &'static str,
    cached: ArcSwapOption<Configuration>,
    write: Mutex<()>,
    derive: Derive,
    recomputations: AtomicU64,
}

impl DerivedConfiguration {
    pub(crate) fn new(label: &'static str, derive: Derive) -> Self {
        Self {
            label,
            cached: ArcSwapOption::empty(),
            write: Mutex::new(()),
            derive,
            recomputations: AtomicU64::new(0),
        }
    }

    /// Returns the cached configuration, deriving it from `base` on a miss.
    pub(crate) fn get(&self, base: &ArcSwap<Configuration>) -> Arc<Configuration> {
        if let Some(cached) = self.cached.load_full() {
            return cached;
        }

        let _guard = self.write.lock();
        // Another thread may have filled the slot while we waited.
        if let Some(cached) = self.cached.load_full() {
            return cached;
        }
        let derived = Arc::new((self.derive)(&base.load()));
        self.cached.store(Some(Arc::clone(&derived)));
        let recomputations = self.recomputations.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!(slot = self.label, recomputations, "derived configuration recomputed");
        derived
    }

    /// Discards the cached configuration. Must be called after the base has
    /// been replaced.
    pub(crate) fn invalidate(&self) {
        let _guard = self.write.lock();
        self.cached.store(None);
        tracing::trace!(slot = self.label, "derived configuration invalidated");
    }

    /// Number of times the configuration has been derived.
    pub(crate) fn recomputations(&self) -> u64 {
        self.recomputations.load(Ordering::Relaxed)
    }
}
