//! Headless admin UI runtime for the ERP backend.
//!
//! Each [`tab::Tab`] models one open browser tab: a page with selects, forms
//! and an edit dialog, a handle on the backend, and a context on the shared
//! storage area tabs notify each other through. Flows mutate the server
//! first, then re-derive page state from it; nothing is patched locally.

pub mod chrome;
pub mod page;
pub mod tab;
pub mod templates;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use page::{Form, Page, SelectControl};
pub use tab::Tab;
pub use traits::{EntityStore, LogPrompter, Prompter};
