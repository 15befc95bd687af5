//! Memoization of stack layouts.

use plkit_core::Rect;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::config::StackConfig;
use crate::engine::{StackItem, StackLayout};

/// Hash of every input that affects a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(u64);

impl CacheKey {
    /// Build a key from layout inputs. Floats are hashed by bit pattern.
    #[must_use]
    pub fn new(config: StackConfig, bounds: Rect, items: &[StackItem]) -> Self {
        let mut hasher = DefaultHasher::new();
        config.hash(&mut hasher);
        for v in [bounds.x, bounds.y, bounds.width, bounds.height] {
            v.to_bits().hash(&mut hasher);
        }
        for item in items {
            item.view.hash(&mut hasher);
            item.measured.width.to_bits().hash(&mut hasher);
            item.measured.height.to_bits().hash(&mut hasher);
            item.spacing.to_bits().hash(&mut hasher);
        }
        Self(hasher.finish())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    layout: StackLayout,
    last_used_pass: u64,
}

/// Cache of computed layouts, evicting entries unused for two passes.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entries: HashMap<CacheKey, CacheEntry>,
    current_pass: u64,
    hits: usize,
    misses: usize,
}

impl LayoutCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a layout, marking it used in the current pass.
    pub fn get(&mut self, key: CacheKey) -> Option<StackLayout> {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.last_used_pass = self.current_pass;
            self.hits += 1;
            Some(entry.layout.clone())
        } else {
            self.misses += 1;
            None
        }
    }

    /// Store a computed layout.
    pub fn insert(&mut self, key: CacheKey, layout: StackLayout) {
        self.entries.insert(
            key,
            CacheEntry {
                layout,
                last_used_pass: self.current_pass,
            },
        );
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Number of cache hits.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Number of cache misses.
    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }

    /// Advance to the next pass and evict stale entries.
    pub fn advance_pass(&mut self) {
        self.current_pass += 1;

        let threshold = self.current_pass.saturating_sub(2);
        self.entries
            .retain(|_, entry| entry.last_used_pass >= threshold);
    }

    /// Number of cached layouts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
