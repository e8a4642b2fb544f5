//! Destination image resolution
//!
//! Resolves a destination string to a representative photo URL through the
//! [`PhotoSearch`] capability, memoized in a bounded cache. Resolution is
//! infallible: no credential, a failed lookup, or an empty result set all
//! degrade to the fixed fallback URL.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

mod unsplash;

pub use unsplash::UnsplashClient;

/// Errors from a photo lookup - always recovered at the resolver
#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Photo service returned status {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Capability interface for the external photo search service
#[async_trait]
pub trait PhotoSearch: Send + Sync {
    /// Return candidate image URLs for a query, best first
    async fn search(&self, query: &str) -> Result<Vec<String>, PhotoError>;
}

/// Memoizing destination -> photo URL resolver
///
/// Keys are lowercase-trimmed destinations. The cache is bounded: once
/// `capacity` entries are stored, the oldest inserted entry is evicted.
pub struct ImageResolver {
    search: Option<Arc<dyn PhotoSearch>>,
    fallback_url: String,
    cache: Mutex<BoundedCache>,
}

impl ImageResolver {
    /// Create a resolver; `search` is `None` when no credential is configured
    pub fn new(search: Option<Arc<dyn PhotoSearch>>, fallback_url: impl Into<String>, capacity: usize) -> Self {
        Self {
            search,
            fallback_url: fallback_url.into(),
            cache: Mutex::new(BoundedCache::new(capacity.max(1))),
        }
    }

    /// A resolver that always answers with the fallback URL
    pub fn offline(fallback_url: impl Into<String>) -> Self {
        Self::new(None, fallback_url, 1)
    }

    /// Resolve a destination to a photo URL
    ///
    /// A cache hit returns immediately with no lookup. A miss performs at
    /// most one lookup; any failure returns the fallback URL without caching
    /// it, so a later request may retry.
    pub async fn resolve(&self, destination: &str) -> String {
        let key = destination.trim().to_lowercase();
        if key.is_empty() {
            return self.fallback_url.clone();
        }

        if let Some(url) = self.cache.lock().expect("image cache lock poisoned").get(&key) {
            debug!(%key, "ImageResolver::resolve: cache hit");
            return url;
        }

        let Some(search) = &self.search else {
            debug!(%key, "ImageResolver::resolve: no photo credential, using fallback");
            return self.fallback_url.clone();
        };

        match search.search(destination.trim()).await {
            Ok(urls) => match urls.into_iter().next() {
                Some(url) => {
                    self.cache.lock().expect("image cache lock poisoned").insert(key, url.clone());
                    url
                }
                None => {
                    debug!(%key, "ImageResolver::resolve: empty result set, using fallback");
                    self.fallback_url.clone()
                }
            },
            Err(e) => {
                warn!(%key, error = %e, "ImageResolver::resolve: lookup failed, using fallback");
                self.fallback_url.clone()
            }
        }
    }

    /// The URL returned whenever resolution cannot happen
    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }
}

/// Insertion-ordered map with oldest-entry eviction
struct BoundedCache {
    capacity: usize,
    entries: HashMap<String, String>,
    order: VecDeque<String>,
}

impl BoundedCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: String, value: String) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key, value);
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                debug!(%oldest, "BoundedCache::insert: evicting oldest entry");
                self.entries.remove(&oldest);
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }
}
