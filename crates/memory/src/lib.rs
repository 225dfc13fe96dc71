//! In-process context store for BriefClaw.
//!
//! A keyed mapping from context identifier to [`MemoryContext`], single
//! process, no persistence across restarts. The map sits behind an async
//! `RwLock` so it can be shared across request handlers; there is no per-key
//! coordination beyond that, so concurrent writes to the same key are
//! last-write-wins with no merge.

use briefclaw_core::context::{ContextStatus, MemoryContext};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// The in-memory store for agent contexts.
///
/// Listing order is most-recently-stored first; overwriting an existing id
/// moves it to the front of that order.
#[derive(Clone, Default)]
pub struct AgentMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    contexts: HashMap<String, MemoryContext>,
    /// Insertion order, oldest first.
    order: Vec<String>,
}

impl AgentMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a context. Always succeeds for a non-empty id.
    pub async fn store(&self, context_id: &str, context: MemoryContext) -> bool {
        if context_id.is_empty() {
            return false;
        }
        let mut inner = self.inner.write().await;
        inner.order.retain(|id| id != context_id);
        inner.order.push(context_id.to_string());
        inner.contexts.insert(context_id.to_string(), context);
        debug!(context_id, total = inner.contexts.len(), "Context stored");
        true
    }

    /// Retrieve a context by id.
    pub async fn get(&self, context_id: &str) -> Option<MemoryContext> {
        self.inner.read().await.contexts.get(context_id).cloned()
    }

    /// List contexts, most-recently-stored first, truncated to `limit`.
    pub async fn list(&self, limit: usize) -> Vec<MemoryContext> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .rev()
            .take(limit)
            .filter_map(|id| inner.contexts.get(id).cloned())
            .collect()
    }

    /// All contexts, most-recently-stored first. Used for aggregate stats.
    pub async fn all(&self) -> Vec<MemoryContext> {
        self.list(usize::MAX).await
    }

    /// Overwrite the status field of a stored context. Returns false if the
    /// id is absent. Only status changes; `updated_at` is left untouched.
    pub async fn update_status(&self, context_id: &str, status: ContextStatus) -> bool {
        let mut inner = self.inner.write().await;
        match inner.contexts.get_mut(context_id) {
            Some(context) => {
                context.status = status;
                true
            }
            None => false,
        }
    }

    /// Remove a context. Returns false if the id is absent.
    pub async fn delete(&self, context_id: &str) -> bool {
        let mut inner = self.inner.write().await;
        if inner.contexts.remove(context_id).is_some() {
            inner.order.retain(|id| id != context_id);
            true
        } else {
            false
        }
    }

    /// Number of stored contexts.
    pub async fn count(&self) -> usize {
        self.inner.read().await.contexts.len()
    }
}
