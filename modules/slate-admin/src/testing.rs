// Test doubles for the tab runtime.
//
// Two mocks matching the two trait boundaries:
// - MockEntityStore (EntityStore) — stateful in-memory backend, records
//   every call, with builder knobs for failure injection
// - RecordingPrompter (Prompter) — captures alerts, answers confirmations
//   with a fixed verdict
//
// Plus page-model helpers for the common page shapes tests need.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use slate_common::{FormValues, MasterItem};
use slate_client::Outcome;

use crate::chrome::Chrome;
use crate::page::{Form, Page, SelectControl};
use crate::traits::{EntityStore, Prompter};

// ---------------------------------------------------------------------------
// MockEntityStore
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockState {
    masters: HashMap<String, Vec<MasterItem>>,
    failing_lists: HashSet<String>,
    fail_creates: bool,
    reject_legacy: HashMap<String, String>,
    fail_legacy: HashSet<String>,

    adds: Vec<(String, FormValues)>,
    updates: Vec<(String, String, FormValues)>,
    entry_deletes: Vec<(String, String)>,
    creates: Vec<(String, String)>,
    renames: Vec<(String, String, String)>,
    item_deletes: Vec<(String, String)>,

    next_id: usize,
}

/// Stateful in-memory backend. Mutations persist across calls within a
/// test, so add-then-list sequences behave like the real server.
#[derive(Default)]
pub struct MockEntityStore {
    inner: Mutex<MockState>,
}

impl MockEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a master category with items (ids assigned sequentially).
    pub fn with_items(self, category: &str, names: &[&str]) -> Self {
        for name in names {
            self.seed_item(category, name);
        }
        self
    }

    /// Make `items()` fail for one category. Other categories still answer.
    pub fn fail_category(self, category: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .failing_lists
            .insert(category.to_string());
        self
    }

    /// Make every `create_item` fail, as an unreachable backend would.
    pub fn fail_creates(self) -> Self {
        self.inner.lock().unwrap().fail_creates = true;
        self
    }

    /// Legacy ops on `category` answer `success: false` with this message.
    pub fn reject_legacy(self, category: &str, message: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .reject_legacy
            .insert(category.to_string(), message.to_string());
        self
    }

    /// Legacy ops on `category` fail at the transport level.
    pub fn fail_legacy(self, category: &str) -> Self {
        self.inner
            .lock()
            .unwrap()
            .fail_legacy
            .insert(category.to_string());
        self
    }

    /// Insert an item out of band, bypassing the flows entirely. Lets tests
    /// change server state without any tab noticing.
    pub fn seed_item(&self, category: &str, name: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = format!("m{}", inner.next_id);
        inner
            .masters
            .entry(category.to_string())
            .or_default()
            .push(MasterItem {
                id,
                name: name.to_string(),
            });
    }

    // --- Assertion helpers ---

    pub fn items_of(&self, category: &str) -> Vec<MasterItem> {
        self.inner
            .lock()
            .unwrap()
            .masters
            .get(category)
            .cloned()
            .unwrap_or_default()
    }

    pub fn recorded_adds(&self) -> Vec<(String, FormValues)> {
        self.inner.lock().unwrap().adds.clone()
    }

    pub fn recorded_updates(&self) -> Vec<(String, String, FormValues)> {
        self.inner.lock().unwrap().updates.clone()
    }

    pub fn entry_delete_count(&self) -> usize {
        self.inner.lock().unwrap().entry_deletes.len()
    }

    pub fn create_count(&self) -> usize {
        self.inner.lock().unwrap().creates.len()
    }

    pub fn item_delete_count(&self) -> usize {
        self.inner.lock().unwrap().item_deletes.len()
    }
}

#[async_trait]
impl EntityStore for MockEntityStore {
    async fn add_entry(&self, category: &str, fields: &FormValues) -> Result<Outcome> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_legacy.contains(category) {
            bail!("backend unreachable (mock)");
        }
        if let Some(message) = inner.reject_legacy.get(category) {
            return Ok(Outcome {
                success: false,
                message: Some(message.clone()),
            });
        }
        inner.adds.push((category.to_string(), fields.clone()));
        Ok(Outcome {
            success: true,
            message: None,
        })
    }

    async fn update_entry(
        &self,
        category: &str,
        id: &str,
        fields: &FormValues,
    ) -> Result<Outcome> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_legacy.contains(category) {
            bail!("backend unreachable (mock)");
        }
        if let Some(message) = inner.reject_legacy.get(category) {
            return Ok(Outcome {
                success: false,
                message: Some(message.clone()),
            });
        }
        inner
            .updates
            .push((category.to_string(), id.to_string(), fields.clone()));
        Ok(Outcome {
            success: true,
            message: None,
        })
    }

    async fn delete_entry(&self, category: &str, id: &str) -> Result<Outcome> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_legacy.contains(category) {
            bail!("backend unreachable (mock)");
        }
        if let Some(message) = inner.reject_legacy.get(category) {
            return Ok(Outcome {
                success: false,
                message: Some(message.clone()),
            });
        }
        inner
            .entry_deletes
            .push((category.to_string(), id.to_string()));
        Ok(Outcome {
            success: true,
            message: None,
        })
    }

    async fn items(&self, category: &str) -> Result<Vec<MasterItem>> {
        let inner = self.inner.lock().unwrap();
        if inner.failing_lists.contains(category) {
            bail!("{category} fetch refused (mock)");
        }
        Ok(inner.masters.get(category).cloned().unwrap_or_default())
    }

    async fn create_item(&self, category: &str, name: &str) -> Result<String> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_creates {
            bail!("create refused (mock)");
        }
        inner.next_id += 1;
        let id = format!("m{}", inner.next_id);
        inner
            .masters
            .entry(category.to_string())
            .or_default()
            .push(MasterItem {
                id: id.clone(),
                name: name.to_string(),
            });
        inner.creates.push((category.to_string(), name.to_string()));
        Ok(id)
    }

    async fn rename_item(&self, category: &str, id: &str, name: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let found = match inner
            .masters
            .get_mut(category)
            .and_then(|items| items.iter_mut().find(|i| i.id == id))
        {
            Some(item) => {
                item.name = name.to_string();
                true
            }
            None => false,
        };
        if !found {
            bail!("no item {id} in {category}");
        }
        inner
            .renames
            .push((category.to_string(), id.to_string(), name.to_string()));
        Ok(())
    }

    async fn delete_item(&self, category: &str, id: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(items) = inner.masters.get_mut(category) {
            items.retain(|i| i.id != id);
        }
        inner
            .item_deletes
            .push((category.to_string(), id.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RecordingPrompter
// ---------------------------------------------------------------------------

/// Prompter that captures every alert and answers confirmations with a
/// fixed verdict.
pub struct RecordingPrompter {
    answer: bool,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
}

impl RecordingPrompter {
    /// Confirms everything.
    pub fn confirming() -> Self {
        Self {
            answer: true,
            alerts: Mutex::new(Vec::new()),
            confirms: Mutex::new(Vec::new()),
        }
    }

    /// Declines everything.
    pub fn declining() -> Self {
        Self {
            answer: false,
            ..Self::confirming()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn last_alert(&self) -> Option<String> {
        self.alerts.lock().unwrap().last().cloned()
    }

    pub fn confirm_prompts(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

impl Prompter for RecordingPrompter {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }
}

// ---------------------------------------------------------------------------
// Page model helpers
// ---------------------------------------------------------------------------

/// Master admin page for `category`: add form, edit dialog, one bound select.
pub fn master_page_model(category: &str) -> Page {
    Page::new(&format!("/master/{category}"))
        .with_chrome(Chrome::new().with_masters_menu())
        .with_form("masterForm", Form::new().with_field("name", ""))
        .with_edit_form(
            "editForm",
            Form::new().with_field("id", "").with_field("name", ""),
        )
        .with_select(SelectControl::new(category))
}

/// Data-entry page: one form plus a select per listed category.
pub fn entry_page_model(path: &str, form_id: &str, fields: &[&str], selects: &[&str]) -> Page {
    let mut form = Form::new();
    for field in fields {
        form = form.with_field(field, "");
    }
    let mut page = Page::new(path).with_form(form_id, form);
    for name in selects {
        page = page.with_select(SelectControl::new(name));
    }
    page
}
