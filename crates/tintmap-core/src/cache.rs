//! Concurrent memoization of mapped colors.
//!
//! Images carry far fewer distinct colors than pixels, so the engine
//! memoizes the mapping per source color. Keys are native device colors
//! compared bit for bit; the cache never looks at perceptual distance.
//!
//! Two workers may race on the same missing key and both compute it. That
//! is fine: the mapping function is pure, so the second store overwrites
//! with an identical value. The cache is an optimization only and never
//! changes results.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::color::Rgba8;

/// Thread-safe memo table from source color to mapped color.
///
/// # Example
///
/// ```rust
/// use tintmap_core::{ColorCache, Rgba8};
///
/// let cache = ColorCache::new();
/// let v = cache.get_or_compute(Rgba8::BLACK, || Rgba8::WHITE);
/// assert_eq!(v, Rgba8::WHITE);
/// // Hit: the closure is not invoked again.
/// let v = cache.get_or_compute(Rgba8::BLACK, || unreachable!());
/// assert_eq!(v, Rgba8::WHITE);
/// ```
#[derive(Debug, Default)]
pub struct ColorCache {
    map: RwLock<HashMap<Rgba8, Rgba8>>,
}

impl ColorCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, computing and storing it on miss.
    ///
    /// `compute` must be pure with respect to `key`; racing computations
    /// for the same key must produce equal values.
    pub fn get_or_compute(&self, key: Rgba8, compute: impl FnOnce() -> Rgba8) -> Rgba8 {
        if let Some(&mapped) = self.map.read().unwrap().get(&key) {
            return mapped;
        }
        let mapped = compute();
        self.map.write().unwrap().insert(key, mapped);
        mapped
    }

    /// Number of distinct source colors seen so far.
    pub fn len(&self) -> usize {
        self.map.read().unwrap().len()
    }

    /// Returns `true` if no color has been mapped yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_miss_then_hit() {
        let cache = ColorCache::new();
        let calls = AtomicUsize::new(0);

        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Rgba8::opaque(1, 2, 3)
        };

        assert_eq!(cache.get_or_compute(Rgba8::BLACK, compute), Rgba8::opaque(1, 2, 3));
        assert_eq!(
            cache.get_or_compute(Rgba8::BLACK, || panic!("should be cached")),
            Rgba8::opaque(1, 2, 3)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_keys() {
        let cache = ColorCache::new();
        cache.get_or_compute(Rgba8::new(1, 1, 1, 255), || Rgba8::BLACK);
        cache.get_or_compute(Rgba8::new(1, 1, 1, 128), || Rgba8::WHITE);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_concurrent_access() {
        let cache = ColorCache::new();

        std::thread::scope(|s| {
            for t in 0..8 {
                let cache = &cache;
                s.spawn(move || {
                    for i in 0..64u8 {
                        let key = Rgba8::opaque(i, i, i);
                        let got = cache.get_or_compute(key, || Rgba8::opaque(i, 0, 0));
                        assert_eq!(got, Rgba8::opaque(i, 0, 0), "thread {}", t);
                    }
                });
            }
        });

        assert_eq!(cache.len(), 64);
    }
}
