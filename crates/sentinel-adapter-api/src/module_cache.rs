//! Call-site `ModuleId` cache (spec §4.4: "caching: call-site module
//! extraction is cached by a stable hash of the top-k frames with a
//! short TTL; cache size is bounded with simple eviction"). Avoids
//! repeating `normalize::extract_caller_module`'s stack walk on every
//! call from the same call site.

use sentinel_common::ModuleId;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct CacheEntry {
    module: Option<ModuleId>,
    inserted_at: Instant,
}

pub struct ModuleCache {
    capacity: usize,
    ttl: Duration,
    entries: Mutex<HashMap<u64, CacheEntry>>,
}

impl ModuleCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up `key` (see [`hash_frames`]). On a miss — absent or past
    /// its TTL — calls `compute` and caches the result, evicting an
    /// arbitrary entry first if the cache is at capacity.
    pub fn get_or_insert_with(&self, key: u64, compute: impl FnOnce() -> Option<ModuleId>) -> Option<ModuleId> {
        let mut entries = self.entries.lock().expect("module cache mutex poisoned");
        if let Some(entry) = entries.get(&key) {
            if entry.inserted_at.elapsed() < self.ttl {
                return entry.module.clone();
            }
        }
        let module = compute();
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            if let Some(evict_key) = entries.keys().next().copied() {
                entries.remove(&evict_key);
            }
        }
        entries.insert(
            key,
            CacheEntry {
                module: module.clone(),
                inserted_at: Instant::now(),
            },
        );
        module
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("module cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stable hash of the top-k call-stack frames, used as the cache key.
/// Only needs to be stable within this process's lifetime, not across
/// runs or processes.
pub fn hash_frames(frames: &[&str]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for frame in frames {
        frame.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_avoids_recomputation() {
        let cache = ModuleCache::new(8, Duration::from_secs(60));
        let key = hash_frames(&["frame_a", "frame_b"]);
        let mut calls = 0;
        let first = cache.get_or_insert_with(key, || {
            calls += 1;
            Some(ModuleId::new("left-pad"))
        });
        let second = cache.get_or_insert_with(key, || {
            calls += 1;
            Some(ModuleId::new("left-pad"))
        });
        assert_eq!(first, second);
        assert_eq!(calls, 1);
    }

    #[test]
    fn expired_entry_is_recomputed() {
        let cache = ModuleCache::new(8, Duration::from_millis(1));
        let key = hash_frames(&["frame_a"]);
        cache.get_or_insert_with(key, || Some(ModuleId::new("left-pad")));
        std::thread::sleep(Duration::from_millis(5));
        let mut recomputed = false;
        cache.get_or_insert_with(key, || {
            recomputed = true;
            Some(ModuleId::new("left-pad"))
        });
        assert!(recomputed);
    }

    #[test]
    fn capacity_is_bounded_by_simple_eviction() {
        let cache = ModuleCache::new(2, Duration::from_secs(60));
        for i in 0..10u64 {
            let key = hash_frames(&[&i.to_string()]);
            cache.get_or_insert_with(key, || Some(ModuleId::new("pkg")));
        }
        assert!(cache.len() <= 2);
    }

    #[test]
    fn different_frame_sets_hash_differently() {
        let a = hash_frames(&["a", "b"]);
        let b = hash_frames(&["a", "c"]);
        assert_ne!(a, b);
    }
}
