//! Key-value persistence used by providers for their settings and caches.
//!
//! Two separate abstractions exist because they have different lifetimes:
//!
//! * [`OptionStore`] – durable configuration (credentials, selections). The
//!   host usually backs it with a database table.
//! * [`Cache`] – short-lived values with a TTL (fetched catalogs, error
//!   messages). Entries disappear on expiry or explicit invalidation.
//!
//! Values are plain [`serde_json::Value`]s so hosts can store them without
//! knowing the provider's types. In-memory implementations are provided for
//! tests and for embedding without a host store.
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use serde_json::Value;

/// Durable key-value configuration store.
pub trait OptionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value);
}

/// A cached value together with its expiry deadline.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: Value,
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Short-lived key-value store with per-entry TTL.
///
/// `get` never returns an expired entry.
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Option<CacheEntry>;

    fn set(&self, key: &str, value: Value, ttl: Duration);

    fn invalidate(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OptionStore for MemoryOptionStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.values.lock().insert(key.to_owned(), value);
    }
}

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<CacheEntry> {
        let mut entries = self.entries.lock();
        let expired = entries.get(key)?.is_expired(Instant::now());
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.lock().insert(key.to_owned(), entry);
    }

    fn invalidate(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}
