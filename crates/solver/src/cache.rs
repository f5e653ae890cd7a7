//! Depth-tagged transposition cache.
//!
//! A flat, power-of-two table indexed by the low bits of the position key.
//! An entry answers a query only for the same key and the same remaining
//! ply budget: a count for `n` plies says nothing about `n - 2`. Saves always
//! overwrite the slot, so aliasing positions evict each other but never
//! return each other's counts.

/// Cached solution count for a position searched with `depth` plies left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: u64,
    pub depth: u32,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
}

pub struct TranspositionCache {
    slots: Vec<Option<CacheEntry>>,
    mask: usize,
    stats: CacheStats,
}

impl TranspositionCache {
    /// Table of at most `megabytes` MiB. Zero disables caching.
    pub fn with_megabytes(megabytes: usize) -> Self {
        let bytes = megabytes.saturating_mul(1024 * 1024);
        Self::with_capacity(bytes / std::mem::size_of::<Option<CacheEntry>>())
    }

    /// Table of `slots` entries rounded down to a power of two.
    pub fn with_capacity(slots: usize) -> Self {
        let capacity = match slots {
            0 => 0,
            n => 1 << (usize::BITS - 1 - n.leading_zeros()),
        };
        Self {
            slots: vec![None; capacity],
            mask: capacity.saturating_sub(1),
            stats: CacheStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_enabled(&self) -> bool {
        !self.slots.is_empty()
    }

    fn slot(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    /// The entry stored for `key`, whatever its depth.
    pub fn probe(&self, key: u64) -> Option<CacheEntry> {
        if !self.is_enabled() {
            return None;
        }
        self.slots[self.slot(key)].filter(|e| e.key == key)
    }

    /// The cached count for `key` at exactly `depth` plies.
    pub fn lookup(&mut self, key: u64, depth: u32) -> Option<u64> {
        let hit = self
            .probe(key)
            .filter(|e| e.depth == depth)
            .map(|e| e.value);
        match hit {
            Some(_) => self.stats.hits += 1,
            None => self.stats.misses += 1,
        }
        hit
    }

    pub fn save(&mut self, key: u64, depth: u32, value: u64) {
        if !self.is_enabled() {
            return;
        }
        let slot = self.slot(key);
        self.slots[slot] = Some(CacheEntry { key, depth, value });
        self.stats.writes += 1;
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.stats = CacheStats::default();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
