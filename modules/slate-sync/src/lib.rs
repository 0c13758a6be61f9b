//! Same-origin shared storage with cross-context change notification.
//!
//! Models the browser storage area a set of open tabs shares: a string
//! key/value map plus a single-slot change channel. The slot holds only the
//! most recent change, so a context that polls late sees the last write and
//! never the intermediates. A context is never notified of its own writes.
//!
//! Zero knowledge of masters, dropdowns, or any domain concept. Consumers
//! decide which keys mean what.

pub mod store;
pub mod types;

pub use store::{SharedStorage, StorageContext, StorageWatch};
pub use types::{ContextId, StorageEvent};
