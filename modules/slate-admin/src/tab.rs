//! One open tab of the admin UI.
//!
//! A Tab owns its page state, a backend handle, and a context on the shared
//! storage area. Every mutation follows the same shape: call the backend,
//! surface the outcome through the prompter, then re-derive page state from
//! the server and notify the other tabs. Local state is never patched
//! optimistically; the server's answer is the only source of truth.

use std::sync::Arc;

use tracing::{info, warn};

use slate_client::ClientError;
use slate_common::{UpdateNotification, KNOWN_MASTERS, MASTER_UPDATE_KEY};
use slate_sync::{StorageContext, StorageWatch};

use crate::page::Page;
use crate::templates;
use crate::traits::{EntityStore, Prompter};

pub struct Tab {
    page: Page,
    store: Arc<dyn EntityStore>,
    prompter: Arc<dyn Prompter>,
    storage: StorageContext,
    watch: StorageWatch,
}

impl Tab {
    /// Open a tab on `page`: attach to the shared storage, highlight the
    /// active nav link, and run the initial dropdown refresh.
    pub async fn open(
        page: Page,
        store: Arc<dyn EntityStore>,
        prompter: Arc<dyn Prompter>,
        storage: StorageContext,
    ) -> Self {
        let watch = storage.subscribe();
        let mut tab = Self {
            page,
            store,
            prompter,
            storage,
            watch,
        };

        let path = tab.page.path().to_string();
        tab.page.chrome_mut().highlight_active(&path);
        info!(%path, "Tab opened");

        tab.refresh_all_dropdowns().await;
        tab
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    // --- Legacy entity flows -------------------------------------------

    /// Create an entry from the current fields of `form_id`. Returns whether
    /// the server accepted it.
    pub async fn add_entry(&mut self, category: &str, form_id: &str) -> bool {
        let Some(fields) = self.page.form_values(form_id) else {
            warn!(form_id, "No such form on this page");
            return false;
        };

        match self.store.add_entry(category, &fields).await {
            Ok(outcome) if outcome.success => {
                self.prompter
                    .alert(&format!("Added successfully to {category}"));
                self.after_entry_mutation(category).await;
                true
            }
            Ok(outcome) => {
                let message = outcome.message.unwrap_or_default();
                self.prompter.alert(&format!("Add failed: {message}"));
                false
            }
            Err(e) => {
                warn!(error = %e, category, "Add entry failed");
                self.prompter.alert("Something went wrong while adding.");
                false
            }
        }
    }

    /// Update an entry by id with the current fields of `form_id`.
    pub async fn update_entry(&mut self, category: &str, id: &str, form_id: &str) -> bool {
        let Some(fields) = self.page.form_values(form_id) else {
            warn!(form_id, "No such form on this page");
            return false;
        };

        match self.store.update_entry(category, id, &fields).await {
            Ok(outcome) if outcome.success => {
                self.prompter
                    .alert(&format!("{category} updated successfully!"));
                self.after_entry_mutation(category).await;
                true
            }
            Ok(outcome) => {
                let message = outcome.message.unwrap_or_default();
                self.prompter.alert(&format!("Update failed: {message}"));
                false
            }
            Err(e) => {
                warn!(error = %e, category, id, "Update entry failed");
                self.prompter.alert("Something went wrong while updating.");
                false
            }
        }
    }

    /// Delete an entry by id, after interactive confirmation. Declining the
    /// confirmation sends nothing at all.
    pub async fn delete_entry(&mut self, category: &str, id: &str) -> bool {
        if !self
            .prompter
            .confirm(&format!("Are you sure you want to delete this {category}?"))
        {
            return false;
        }

        match self.store.delete_entry(category, id).await {
            Ok(outcome) if outcome.success => {
                self.prompter
                    .alert(&format!("{category} deleted successfully!"));
                self.after_entry_mutation(category).await;
                true
            }
            Ok(outcome) => {
                let message = outcome.message.unwrap_or_default();
                self.prompter.alert(&format!("Failed to delete: {message}"));
                false
            }
            Err(e) => {
                warn!(error = %e, category, id, "Delete entry failed");
                self.prompter.alert("Something went wrong while deleting.");
                false
            }
        }
    }

    /// Pre-fill and show the edit dialog for a legacy entry. Extra fields
    /// only land on pages whose dialog declares them.
    pub fn open_edit_modal(&mut self, id: &str, name: &str, roll: Option<&str>, batch: Option<&str>) {
        self.page.open_edit_modal_full(id, name, roll, batch);
    }

    // --- Master item flows ---------------------------------------------

    /// Create a master item from the `name` field of `form_id`. An empty
    /// name is rejected locally; no request goes out.
    pub async fn add_master_item(&mut self, category: &str, form_id: &str) -> bool {
        let name = self
            .page
            .form_field(form_id, "name")
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        if name.is_empty() {
            self.prompter.alert("Please enter a name.");
            return false;
        }

        match self.store.create_item(category, &name).await {
            Ok(id) => {
                info!(category, %id, "Master item created");
                self.prompter.alert(&format!("{name} added successfully!"));
                self.page.reset_form(form_id);
                self.refresh_master_list(category).await;
                self.broadcast(category);
                true
            }
            Err(e) => {
                warn!(error = %e, category, "Master add failed");
                let message = failure_message(&e, "Add failed");
                self.prompter.alert(&format!("Error adding item: {message}"));
                false
            }
        }
    }

    /// Pre-fill and show the edit dialog for a master item.
    pub fn open_master_edit(&mut self, id: &str, name: &str) {
        self.page.open_edit_modal(id, name);
    }

    /// Rename a master item with the `name` field of `form_id` (normally the
    /// edit dialog's form). Closes the dialog on success.
    pub async fn update_master_item(&mut self, category: &str, item_id: &str, form_id: &str) -> bool {
        let name = self
            .page
            .form_field(form_id, "name")
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        if name.is_empty() {
            self.prompter.alert("Please enter a valid name.");
            return false;
        }

        match self.store.rename_item(category, item_id, &name).await {
            Ok(()) => {
                self.prompter.alert("Updated successfully!");
                self.page.close_edit_modal();
                self.refresh_master_list(category).await;
                self.broadcast(category);
                true
            }
            Err(e) => {
                warn!(error = %e, category, item_id, "Master rename failed");
                let message = failure_message(&e, "Update failed");
                self.prompter.alert(&format!("Failed to update: {message}"));
                false
            }
        }
    }

    /// Delete a master item, after interactive confirmation.
    pub async fn delete_master_item(&mut self, category: &str, item_id: &str) -> bool {
        if !self.prompter.confirm("Are you sure you want to delete this item?") {
            return false;
        }

        match self.store.delete_item(category, item_id).await {
            Ok(()) => {
                self.prompter.alert("Deleted successfully!");
                self.refresh_master_list(category).await;
                self.broadcast(category);
                true
            }
            Err(e) => {
                warn!(error = %e, category, item_id, "Master delete failed");
                let message = failure_message(&e, "Delete failed");
                self.prompter.alert(&format!("Failed to delete: {message}"));
                false
            }
        }
    }

    // --- Refresh ---------------------------------------------------------

    /// Re-render the master list region from the server's current items.
    /// A failed fetch leaves the region as it was.
    pub async fn refresh_master_list(&mut self, category: &str) {
        match self.store.items(category).await {
            Ok(items) => {
                self.page.set_list(templates::master_list(category, &items));
            }
            Err(e) => warn!(error = %e, category, "Master list refresh failed"),
        }
    }

    /// Re-derive every bound dropdown from the fixed known category set. One
    /// category failing is logged and skipped; the rest still refresh.
    pub async fn refresh_all_dropdowns(&mut self) {
        for category in KNOWN_MASTERS {
            match self.store.items(category).await {
                Ok(items) => self.page.repopulate_selects(category, &items),
                Err(e) => warn!(error = %e, category, "Dropdown refresh failed"),
            }
        }
    }

    // --- Cross-tab sync --------------------------------------------------

    /// Drain pending cross-tab notifications, refreshing all dropdowns if
    /// any arrived. Returns whether a refresh ran.
    pub async fn pump_storage_events(&mut self) -> bool {
        let mut should_refresh = false;

        while let Some(event) = self.watch.poll() {
            if event.key != MASTER_UPDATE_KEY {
                continue;
            }
            let Some(value) = event.new_value.as_deref() else {
                continue;
            };
            match serde_json::from_str::<UpdateNotification>(value) {
                Ok(note) => {
                    info!(master = %note.name, "Master updated in another tab, refreshing dropdowns");
                    should_refresh = true;
                }
                Err(e) => warn!(error = %e, "Ignoring malformed update notification"),
            }
        }

        if should_refresh {
            // The notification names one category, but every known category
            // refreshes. Over-refreshing is safe; skipping one is not.
            self.refresh_all_dropdowns().await;
        }
        should_refresh
    }

    /// Publish a master-update notification for the other tabs. The writer
    /// itself never hears it back; local refresh is always explicit.
    fn broadcast(&self, category: &str) {
        let note = UpdateNotification::now(category);
        match serde_json::to_string(&note) {
            Ok(json) => self.storage.set_item(MASTER_UPDATE_KEY, &json),
            Err(e) => warn!(error = %e, "Could not serialize update notification"),
        }
    }

    /// Legacy mutations have no list region to re-render; the dropdowns are
    /// the visible state they re-derive.
    async fn after_entry_mutation(&mut self, category: &str) {
        self.refresh_all_dropdowns().await;
        self.broadcast(category);
    }
}

/// Message the way the page surfaces it: the API answer's own message when
/// there is one, the error's display otherwise.
fn failure_message(err: &anyhow::Error, fallback: &str) -> String {
    match err.downcast_ref::<ClientError>() {
        Some(ClientError::Api { message, .. }) => {
            if message.is_empty() {
                fallback.to_string()
            } else {
                message.clone()
            }
        }
        _ => err.to_string(),
    }
}
