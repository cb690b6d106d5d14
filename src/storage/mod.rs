use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::generate_random_code;

pub mod memory;

pub use memory::MemoryStorage;

/// 记录 ID 的长度（短码长度由配置决定）
const RECORD_ID_LENGTH: usize = 10;

/// A stored short link. All fields except `access_count` are immutable
/// after creation; records are never deleted.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UrlRecord {
    pub id: String,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub access_count: u64,
}

impl UrlRecord {
    pub fn new(original_url: impl Into<String>, short_code: impl Into<String>) -> Self {
        Self {
            id: generate_random_code(RECORD_ID_LENGTH),
            original_url: original_url.into(),
            short_code: short_code.into(),
            created_at: Utc::now(),
            access_count: 0,
        }
    }
}

/// The concurrent code → record mapping owning all records for the
/// process lifetime.
///
/// Absence is a normal return value, never an error: `get` yields `None`
/// and `increment_click`/`try_insert` report success as `bool`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Point lookup. Never observes a partially written record.
    async fn get(&self, code: &str) -> Option<UrlRecord>;

    /// Adds or overwrites the mapping for `record.short_code`. The record
    /// is visible to subsequent `get` calls once this returns.
    async fn insert(&self, record: UrlRecord);

    /// Inserts only if the code is not already taken; returns whether the
    /// record was stored. Atomic against concurrent inserts of the same code.
    async fn try_insert(&self, record: UrlRecord) -> bool;

    /// Adds exactly 1 to the record's access count. Returns `false` when
    /// the code is unknown. Concurrent increments are never lost.
    async fn increment_click(&self, code: &str) -> bool;

    /// Snapshot of all records. Each returned record is internally
    /// consistent; the set reflects inserts completed before the call.
    async fn load_all(&self) -> Vec<UrlRecord>;

    /// Number of records currently stored.
    async fn count(&self) -> usize;

    /// Sum of all access counts at the time of the call.
    async fn total_clicks(&self) -> u64;

    async fn get_backend_name(&self) -> String;
}
