use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::warn;

use super::{Storage, UrlRecord};
use crate::analytics::ClickSink;

/// In-memory storage backed by a sharded concurrent map.
///
/// DashMap shard locks make `try_insert` and `increment_click` atomic
/// without serializing unrelated keys, and readers never wait behind a
/// global writer.
#[derive(Default)]
pub struct MemoryStorage {
    inner: DashMap<String, UrlRecord>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, code: &str) -> Option<UrlRecord> {
        self.inner.get(code).map(|entry| entry.clone())
    }

    async fn insert(&self, record: UrlRecord) {
        self.inner.insert(record.short_code.clone(), record);
    }

    async fn try_insert(&self, record: UrlRecord) -> bool {
        match self.inner.entry(record.short_code.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(record);
                true
            }
        }
    }

    async fn increment_click(&self, code: &str) -> bool {
        match self.inner.get_mut(code) {
            Some(mut record) => {
                record.access_count += 1;
                true
            }
            None => false,
        }
    }

    async fn load_all(&self) -> Vec<UrlRecord> {
        self.inner.iter().map(|entry| entry.value().clone()).collect()
    }

    async fn count(&self) -> usize {
        self.inner.len()
    }

    async fn total_clicks(&self) -> u64 {
        self.inner.iter().map(|entry| entry.value().access_count).sum()
    }

    async fn get_backend_name(&self) -> String {
        "memory".to_string()
    }
}

#[async_trait]
impl ClickSink for MemoryStorage {
    async fn flush_clicks(&self, updates: Vec<(String, usize)>) -> anyhow::Result<()> {
        for (code, count) in updates {
            match self.inner.get_mut(&code) {
                Some(mut record) => record.access_count += count as u64,
                // Records are never deleted, so this only fires if clicks
                // were recorded for a code that never existed.
                None => warn!("Dropping {} clicks for unknown code: {}", count, code),
            }
        }
        Ok(())
    }
}
