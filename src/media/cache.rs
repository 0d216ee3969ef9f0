// SPDX-License-Identifier: MPL-2.0
//! Decoded image cache keyed by locator.
//!
//! Tiles, story cards, the hero and the lightbox all go through this cache,
//! so an image decoded for a tile is reused when the same photo opens in the
//! lightbox.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently used images are evicted first
//! - **Locator-keyed**: Images indexed by their URL
//! - **In-flight tracking**: A locator is requested at most once at a time

use super::ImageData;
use crate::domain::CacheCapacity;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;

/// Result of asking the cache for a locator.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// The image is already decoded.
    Hit(ImageData),
    /// Nobody is fetching it yet; the caller must start the request.
    Fetch,
    /// A request is already running; its completion will be delivered.
    InFlight,
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

pub struct ImageCache {
    cache: LruCache<String, ImageData>,
    in_flight: HashSet<String>,
    stats: CacheStats,
}

impl ImageCache {
    #[must_use]
    pub fn new(capacity: CacheCapacity) -> Self {
        let capacity = NonZeroUsize::new(capacity.value()).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            in_flight: HashSet::new(),
            stats: CacheStats::default(),
        }
    }

    /// Looks up `url`, marking it in flight when a fetch must start.
    pub fn request(&mut self, url: &str) -> Lookup {
        if let Some(image) = self.cache.get(url) {
            self.stats.hits += 1;
            return Lookup::Hit(image.clone());
        }

        self.stats.misses += 1;
        if self.in_flight.insert(url.to_string()) {
            Lookup::Fetch
        } else {
            Lookup::InFlight
        }
    }

    /// Returns the cached image without touching the LRU order.
    #[must_use]
    pub fn peek(&self, url: &str) -> Option<&ImageData> {
        self.cache.peek(url)
    }

    /// Stores a finished fetch.
    pub fn complete(&mut self, url: &str, image: ImageData) {
        self.in_flight.remove(url);
        if self.cache.push(url.to_string(), image).is_some_and(|(key, _)| key != url) {
            self.stats.evictions += 1;
        }
    }

    /// Forgets a failed fetch so a later request can retry.
    pub fn abandon(&mut self, url: &str) {
        self.in_flight.remove(url);
    }

    #[must_use]
    pub fn is_in_flight(&self, url: &str) -> bool {
        self.in_flight.contains(url)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(CacheCapacity::default())
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("len", &self.cache.len())
            .field("cap", &self.cache.cap())
            .field("in_flight", &self.in_flight.len())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> ImageData {
        ImageData::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    #[test]
    fn first_request_fetches_second_waits() {
        let mut cache = ImageCache::default();
        assert!(matches!(cache.request("a"), Lookup::Fetch));
        assert!(matches!(cache.request("a"), Lookup::InFlight));
        assert!(cache.is_in_flight("a"));
    }

    #[test]
    fn completed_fetch_is_a_hit() {
        let mut cache = ImageCache::default();
        cache.request("a");
        cache.complete("a", pixel());

        assert!(!cache.is_in_flight("a"));
        assert!(matches!(cache.request("a"), Lookup::Hit(_)));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn abandoned_fetch_can_be_retried() {
        let mut cache = ImageCache::default();
        cache.request("a");
        cache.abandon("a");
        assert!(matches!(cache.request("a"), Lookup::Fetch));
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let mut cache = ImageCache::new(CacheCapacity::new(8));
        for i in 0..9 {
            cache.complete(&format!("img-{i}"), pixel());
        }
        assert_eq!(cache.len(), 8);
        assert!(cache.peek("img-0").is_none());
        assert!(cache.peek("img-8").is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn replacing_an_entry_is_not_an_eviction() {
        let mut cache = ImageCache::default();
        cache.complete("a", pixel());
        cache.complete("a", pixel());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().evictions, 0);
    }
}
