//! Session-lifetime result cache.

use chrono::{DateTime, Utc};
use lookout_core::QueryKind;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// A cached record and when it was stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<R> {
    /// The accepted record
    pub record: R,
    /// When the record was cached
    pub cached_at: DateTime<Utc>,
}

/// Read-through cache of accepted records for one query kind.
///
/// Only records that passed the quality gate are ever inserted, so a
/// "not found" outcome is retried on the next lookup. Nothing is written to
/// durable storage.
#[derive(Debug)]
pub struct ResultCache<R> {
    kind: QueryKind,
    entries: RwLock<HashMap<String, CacheEntry<R>>>,
}

impl<R: Clone> ResultCache<R> {
    /// Empty cache for a query kind
    #[must_use]
    pub fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The query kind this cache is scoped to
    #[must_use]
    pub const fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Cached record for a subject
    pub async fn get(&self, subject: &str) -> Option<R> {
        self.entry(subject).await.map(|entry| entry.record)
    }

    /// Cached record for a subject, with its timestamp
    pub async fn entry(&self, subject: &str) -> Option<CacheEntry<R>> {
        let entry = self.entries.read().await.get(subject).cloned();
        if entry.is_some() {
            debug!(kind = %self.kind, subject, "cache hit");
        }
        entry
    }

    /// Store an accepted record
    pub async fn insert(&self, subject: impl Into<String>, record: R) {
        let entry = CacheEntry {
            record,
            cached_at: Utc::now(),
        };
        self.entries.write().await.insert(subject.into(), entry);
    }

    /// Number of cached subjects
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether nothing is cached
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
