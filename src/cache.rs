use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::models::{BodyShape, Occasion, Recommendation, SkinTone, Style};

/// Cache key types for different recommendation inputs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Recommendations {
        body_shape: BodyShape,
        skin_tone: SkinTone,
        styles: Vec<Style>,
        occasion: Option<Occasion>,
    },
}

impl CacheKey {
    /// Builds a recommendations key with a normalized style order
    ///
    /// Styles are sorted so requests that differ only in preference order
    /// share an entry.
    pub fn recommendations(
        body_shape: BodyShape,
        skin_tone: SkinTone,
        mut styles: Vec<Style>,
        occasion: Option<Occasion>,
    ) -> Self {
        styles.sort();
        CacheKey::Recommendations {
            body_shape,
            skin_tone,
            styles,
            occasion,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Recommendations {
                body_shape,
                skin_tone,
                styles,
                occasion,
            } => {
                let styles = styles
                    .iter()
                    .map(Style::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                let occasion = occasion
                    .map(|o| o.to_string())
                    .unwrap_or_else(|| "any".to_string());
                write!(f, "rec:{}:{}:{}:{}", body_shape, skin_tone, styles, occasion)
            }
        }
    }
}

/// A stored recommendation list with its insertion time
#[derive(Debug, Clone)]
struct CacheEntry {
    recommendations: Vec<Recommendation>,
    inserted_at: Instant,
}

/// In-process TTL cache for recommendation responses
///
/// Entries past the TTL are treated as absent and dropped lazily on access.
/// The lock is held only for map operations; a poisoned lock degrades the
/// cache to a miss or no-op instead of failing the caller.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns a clone of the stored list when a live entry exists
    pub fn get(&self, key: &CacheKey) -> Option<Vec<Recommendation>> {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Cache lock poisoned, treating as miss");
                return None;
            }
        };

        let slot = key.to_string();
        match entries.get(&slot) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                tracing::debug!(key = %slot, "Cache hit");
                Some(entry.recommendations.clone())
            }
            Some(_) => {
                // Expired: evict so stale entries do not accumulate
                entries.remove(&slot);
                tracing::debug!(key = %slot, "Cache entry expired");
                None
            }
            None => {
                tracing::debug!(key = %slot, "Cache miss");
                None
            }
        }
    }

    /// Stores a recommendation list under the given key
    pub fn set(&self, key: &CacheKey, recommendations: Vec<Recommendation>) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Cache lock poisoned, skipping store");
                return;
            }
        };

        entries.insert(
            key.to_string(),
            CacheEntry {
                recommendations,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Removes one entry
    pub fn delete(&self, key: &CacheKey) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(&key.to_string());
        }
    }

    /// Drops every entry
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    /// Number of stored entries, live or expired
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
