//! Process-wide cache of compiled regular expressions
//!
//! Patterns are keyed by their source text, compiled lazily on first use,
//! and never invalidated. A pattern that fails to compile is not cached, so
//! every use of it reports the compile error again.
//!
//! The cache grows with the number of distinct patterns seen. That is fine
//! for schemas with a small, stable set of patterns; callers generating
//! schemas with many distinct patterns should use their own instance.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use regex::Regex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

/// Concurrent map from pattern text to compiled regex
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: DashMap<String, Arc<Regex>>,
    compilations: AtomicUsize,
    hits: AtomicUsize,
}

impl PatternCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache shared by optimized validators
    pub fn global() -> Arc<PatternCache> {
        static GLOBAL: OnceLock<Arc<PatternCache>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(PatternCache::new())))
    }

    /// Return the compiled form of `pattern`, compiling it on first use
    ///
    /// Concurrent first uses of the same pattern are serialized on the map
    /// entry, so each valid pattern is compiled once.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<Regex>, regex::Error> {
        if let Some(found) = self.patterns.get(pattern) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(pattern, "Pattern cache hit");
            return Ok(Arc::clone(found.value()));
        }

        match self.patterns.entry(pattern.to_string()) {
            Entry::Occupied(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Ok(Arc::clone(entry.get()))
            }
            Entry::Vacant(entry) => {
                let regex = Arc::new(Regex::new(pattern)?);
                self.compilations.fetch_add(1, Ordering::Relaxed);
                debug!(pattern, "Compiled pattern");
                entry.insert(Arc::clone(&regex));
                Ok(regex)
            }
        }
    }

    /// Check if a pattern has been compiled and cached
    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.contains_key(pattern)
    }

    /// Number of cached patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> PatternCacheStats {
        PatternCacheStats {
            entries: self.patterns.len(),
            compilations: self.compilations.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
        }
    }
}

/// Pattern cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternCacheStats {
    pub entries: usize,
    pub compilations: usize,
    pub hits: usize,
}

impl PatternCacheStats {
    /// Share of lookups served from the cache, as a percentage
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.compilations;
        if lookups == 0 {
            0.0
        } else {
            (self.hits as f64 / lookups as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiles_once() {
        let cache = PatternCache::new();
        for _ in 0..5 {
            let regex = cache.get_or_compile(r"^\d+$").unwrap();
            assert!(regex.is_match("123"));
        }

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.compilations, 1);
        assert_eq!(stats.hits, 4);
        assert_eq!(stats.hit_rate(), 80.0);
    }

    #[test]
    fn test_invalid_pattern_is_not_cached() {
        let cache = PatternCache::new();
        assert!(cache.get_or_compile("(unclosed").is_err());
        assert!(cache.get_or_compile("(unclosed").is_err());
        assert!(!cache.contains("(unclosed"));
        assert!(cache.is_empty());
        assert_eq!(cache.stats().compilations, 0);
    }

    #[test]
    fn test_returns_shared_instance() {
        let cache = PatternCache::new();
        let first = cache.get_or_compile("[a-z]+").unwrap();
        let second = cache.get_or_compile("[a-z]+").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_concurrent_first_use() {
        let cache = PatternCache::new();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        cache.get_or_compile("^shared-[0-9]{3}$").unwrap();
                    }
                });
            }
        });

        let stats = cache.stats();
        assert_eq!(stats.compilations, 1);
        assert_eq!(stats.hits, 8 * 50 - 1);
    }
}
