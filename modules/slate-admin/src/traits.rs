// Trait abstractions for the tab runtime's dependencies.
//
// EntityStore puts the backend behind one seam — the REST client in
// production, a stateful in-memory mock in tests.
// Prompter is the alert/confirm surface every flow reports through.
//
// These enable deterministic testing with MockEntityStore and
// RecordingPrompter: no network, no browser. `cargo test` in seconds.

use anyhow::Result;
use async_trait::async_trait;

use slate_client::{EntityClient, Outcome};
use slate_common::{FormValues, MasterItem};

// ---------------------------------------------------------------------------
// EntityStore — replaces a bare EntityClient
// ---------------------------------------------------------------------------

#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Create an entry from form fields (legacy family; the flag in the
    /// returned outcome is the verdict).
    async fn add_entry(&self, category: &str, fields: &FormValues) -> Result<Outcome>;

    /// Update an entry by id (legacy family).
    async fn update_entry(&self, category: &str, id: &str, fields: &FormValues)
        -> Result<Outcome>;

    /// Delete an entry by id (legacy family).
    async fn delete_entry(&self, category: &str, id: &str) -> Result<Outcome>;

    /// Current items of a master category, in server order.
    async fn items(&self, category: &str) -> Result<Vec<MasterItem>>;

    /// Create a master item. Returns the server-assigned id.
    async fn create_item(&self, category: &str, name: &str) -> Result<String>;

    /// Rename a master item.
    async fn rename_item(&self, category: &str, id: &str, name: &str) -> Result<()>;

    /// Delete a master item.
    async fn delete_item(&self, category: &str, id: &str) -> Result<()>;
}

#[async_trait]
impl EntityStore for EntityClient {
    async fn add_entry(&self, category: &str, fields: &FormValues) -> Result<Outcome> {
        Ok(self.add_entry(category, fields).await?)
    }

    async fn update_entry(
        &self,
        category: &str,
        id: &str,
        fields: &FormValues,
    ) -> Result<Outcome> {
        Ok(self.update_entry(category, id, fields).await?)
    }

    async fn delete_entry(&self, category: &str, id: &str) -> Result<Outcome> {
        Ok(self.delete_entry(category, id).await?)
    }

    async fn items(&self, category: &str) -> Result<Vec<MasterItem>> {
        Ok(self.master_items(category).await?)
    }

    async fn create_item(&self, category: &str, name: &str) -> Result<String> {
        Ok(self.create_master_item(category, name).await?)
    }

    async fn rename_item(&self, category: &str, id: &str, name: &str) -> Result<()> {
        Ok(self.update_master_item(category, id, name).await?)
    }

    async fn delete_item(&self, category: &str, id: &str) -> Result<()> {
        Ok(self.delete_master_item(category, id).await?)
    }
}

// ---------------------------------------------------------------------------
// Prompter — alert/confirm surface
// ---------------------------------------------------------------------------

pub trait Prompter: Send + Sync {
    /// Show a blocking notice.
    fn alert(&self, message: &str);

    /// Ask a yes/no question. `false` means the user backed out.
    fn confirm(&self, message: &str) -> bool;
}

/// Prompter for non-interactive runs: alerts go to the log, confirmations
/// are declined so nothing destructive happens unattended.
pub struct LogPrompter;

impl Prompter for LogPrompter {
    fn alert(&self, message: &str) {
        tracing::info!(message, "Alert");
    }

    fn confirm(&self, message: &str) -> bool {
        tracing::info!(message, "Confirmation declined (non-interactive)");
        false
    }
}
