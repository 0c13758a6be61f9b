//! SharedStorage — a key/value area plus its single-slot change channel.
//!
//! Overwrite semantics are the point. Writes replace whatever change was
//! pending, so observers are guaranteed the newest change and nothing else.
//! Consumers that need every write should not be on this channel.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::debug;

use crate::types::{ContextId, StorageEvent};

// ---------------------------------------------------------------------------
// SharedStorage
// ---------------------------------------------------------------------------

struct Inner {
    map: Mutex<HashMap<String, String>>,
    slot: watch::Sender<Option<StorageEvent>>,
    next_context: AtomicU64,
}

/// One storage area shared by all contexts attached to it. Cheap to clone;
/// every clone sees the same map and the same change slot.
#[derive(Clone)]
pub struct SharedStorage {
    inner: Arc<Inner>,
}

impl SharedStorage {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                map: Mutex::new(HashMap::new()),
                slot,
                next_context: AtomicU64::new(1),
            }),
        }
    }

    /// Attach a new context to this area. Each context gets its own identity;
    /// changes it makes are invisible to its own watches.
    pub fn context(&self) -> StorageContext {
        let id = self.inner.next_context.fetch_add(1, Ordering::Relaxed);
        StorageContext {
            id,
            inner: self.inner.clone(),
        }
    }
}

impl Default for SharedStorage {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// StorageContext
// ---------------------------------------------------------------------------

/// Per-context handle on the shared area. Reads and writes go to the shared
/// map; writes also overwrite the change slot other contexts observe.
pub struct StorageContext {
    id: ContextId,
    inner: Arc<Inner>,
}

impl StorageContext {
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Store `value` under `key`, replacing any previous value, and publish
    /// the change. Publishing also replaces any still-unobserved change.
    pub fn set_item(&self, key: &str, value: &str) {
        self.inner
            .map
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());

        debug!(key, writer = self.id, "Storage slot updated");
        self.inner.slot.send_replace(Some(StorageEvent {
            key: key.to_string(),
            new_value: Some(value.to_string()),
            writer: self.id,
        }));
    }

    /// Current value under `key`, if any.
    pub fn get_item(&self, key: &str) -> Option<String> {
        self.inner
            .map
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    /// Remove `key`. Observers see a change with no new value. Removing a key
    /// that was never set changes nothing and publishes nothing.
    pub fn remove_item(&self, key: &str) {
        let existed = self
            .inner
            .map
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key)
            .is_some();

        if existed {
            self.inner.slot.send_replace(Some(StorageEvent {
                key: key.to_string(),
                new_value: None,
                writer: self.id,
            }));
        }
    }

    /// Watch for changes made by OTHER contexts. Changes made before the
    /// subscription are never replayed.
    pub fn subscribe(&self) -> StorageWatch {
        StorageWatch {
            id: self.id,
            rx: self.inner.slot.subscribe(),
        }
    }
}

// ---------------------------------------------------------------------------
// StorageWatch
// ---------------------------------------------------------------------------

/// Receiver side of the change slot, filtered to other contexts' writes.
pub struct StorageWatch {
    id: ContextId,
    rx: watch::Receiver<Option<StorageEvent>>,
}

impl StorageWatch {
    /// Wait for the next change made by another context. Returns `None` once
    /// the storage area itself is gone.
    pub async fn changed(&mut self) -> Option<StorageEvent> {
        loop {
            self.rx.changed().await.ok()?;
            match self.rx.borrow_and_update().clone() {
                Some(event) if event.writer != self.id => return Some(event),
                // Own write, or the initial empty slot. Keep waiting.
                _ => continue,
            }
        }
    }

    /// Non-blocking variant: the latest unobserved change made by another
    /// context, if one is pending.
    pub fn poll(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.has_changed() {
                Ok(true) => match self.rx.borrow_and_update().clone() {
                    Some(event) if event.writer != self.id => return Some(event),
                    _ => continue,
                },
                // Nothing pending, or the area is gone.
                _ => return None,
            }
        }
    }
}
