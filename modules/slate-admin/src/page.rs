//! Page state the tab runtime reads and mutates: named selects, forms, the
//! edit dialog, and the rendered list region. No DOM, just the parts of one
//! that the admin flows touch.

use tracing::warn;

use slate_common::{FormValues, MasterItem};

use crate::chrome::Chrome;

// ---------------------------------------------------------------------------
// SelectControl
// ---------------------------------------------------------------------------

/// One `<option>` of a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A select control bound to a master category through its `name`.
#[derive(Debug, Clone)]
pub struct SelectControl {
    name: String,
    options: Vec<SelectOption>,
    selected: Option<String>,
}

impl SelectControl {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: Vec::new(),
            selected: None,
        }
    }

    /// Seed options (value = label), selecting the first like a freshly
    /// rendered select does.
    pub fn with_options(mut self, values: &[&str]) -> Self {
        self.options = values
            .iter()
            .map(|v| SelectOption {
                value: v.to_string(),
                label: v.to_string(),
            })
            .collect();
        self.selected = self.options.first().map(|o| o.value.clone());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn option_values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }

    /// Currently selected value, if the control has one.
    pub fn value(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Assign a value the way a browser does: selects the matching option,
    /// or deselects everything when no option matches.
    pub fn set_value(&mut self, value: &str) {
        self.selected = self
            .options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.value.clone());
    }

    /// Replace all options with one per item (value and label are the item
    /// name). The previous selection survives when the refreshed set still
    /// contains it; otherwise the control falls back to the first option,
    /// and to nothing at all if a previous selection simply vanished.
    pub fn repopulate(&mut self, items: &[MasterItem]) {
        let previous = self.selected.take();

        self.options = items
            .iter()
            .map(|item| SelectOption {
                value: item.name.clone(),
                label: item.name.clone(),
            })
            .collect();
        self.selected = self.options.first().map(|o| o.value.clone());

        if let Some(previous) = previous {
            self.set_value(&previous);
        }
    }
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Field {
    name: String,
    value: String,
    default: String,
}

/// A form's fields, in declaration order. Reset restores declared defaults,
/// like a real form does.
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: Vec<Field>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field with its default value.
    pub fn with_field(mut self, name: &str, default: &str) -> Self {
        self.fields.push(Field {
            name: name.to_string(),
            value: default.to_string(),
            default: default.to_string(),
        });
        self
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Set an existing field. Declaring new fields at runtime is not a thing
    /// forms do, so unknown names are refused.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.default.clone();
        }
    }

    /// Snapshot of the fields as a request payload. Duplicate names keep the
    /// last value.
    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// The mutable state of one admin page.
pub struct Page {
    path: String,
    chrome: Chrome,
    selects: Vec<SelectControl>,
    forms: Vec<(String, Form)>,
    edit_form: Option<String>,
    modal_open: bool,
    list_html: Option<String>,
}

impl Page {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            chrome: Chrome::new(),
            selects: Vec::new(),
            forms: Vec::new(),
            edit_form: None,
            modal_open: false,
            list_html: None,
        }
    }

    pub fn with_chrome(mut self, chrome: Chrome) -> Self {
        self.chrome = chrome;
        self
    }

    pub fn with_select(mut self, select: SelectControl) -> Self {
        self.selects.push(select);
        self
    }

    pub fn with_form(mut self, id: &str, form: Form) -> Self {
        self.forms.push((id.to_string(), form));
        self
    }

    /// Register `form` and mark it as the one backing the edit dialog.
    pub fn with_edit_form(mut self, id: &str, form: Form) -> Self {
        self.edit_form = Some(id.to_string());
        self.with_form(id, form)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut Chrome {
        &mut self.chrome
    }

    // --- Selects ---

    pub fn selects(&self) -> &[SelectControl] {
        &self.selects
    }

    /// First select bound to `name`.
    pub fn select(&self, name: &str) -> Option<&SelectControl> {
        self.selects.iter().find(|s| s.name() == name)
    }

    pub fn set_select_value(&mut self, name: &str, value: &str) {
        if let Some(select) = self.selects.iter_mut().find(|s| s.name() == name) {
            select.set_value(value);
        }
    }

    /// Repopulate every select bound to `category`.
    pub fn repopulate_selects(&mut self, category: &str, items: &[MasterItem]) {
        for select in self.selects.iter_mut().filter(|s| s.name() == category) {
            select.repopulate(items);
        }
    }

    // --- Forms ---

    pub fn form(&self, id: &str) -> Option<&Form> {
        self.forms.iter().find(|(fid, _)| fid == id).map(|(_, f)| f)
    }

    fn form_mut(&mut self, id: &str) -> Option<&mut Form> {
        self.forms
            .iter_mut()
            .find(|(fid, _)| fid == id)
            .map(|(_, f)| f)
    }

    pub fn form_values(&self, id: &str) -> Option<FormValues> {
        self.form(id).map(Form::values)
    }

    pub fn form_field(&self, id: &str, field: &str) -> Option<&str> {
        self.form(id).and_then(|f| f.field(field))
    }

    pub fn set_form_field(&mut self, id: &str, field: &str, value: &str) -> bool {
        self.form_mut(id).is_some_and(|f| f.set(field, value))
    }

    pub fn reset_form(&mut self, id: &str) {
        if let Some(form) = self.form_mut(id) {
            form.reset();
        }
    }

    // --- Edit dialog ---

    /// Pre-fill and show the edit dialog. Only fields the dialog form
    /// actually declares get touched; pages without a roll or batch input
    /// silently ignore those values.
    pub fn open_edit_modal_full(
        &mut self,
        id: &str,
        name: &str,
        roll: Option<&str>,
        batch: Option<&str>,
    ) {
        let Some(form_id) = self.edit_form.clone() else {
            warn!(path = %self.path, "No edit dialog on this page");
            return;
        };
        let Some(form) = self.form_mut(&form_id) else {
            warn!(form_id, "Edit dialog form is missing");
            return;
        };

        form.set("id", id);
        form.set("name", name);
        if let Some(roll) = roll {
            form.set("roll", roll);
        }
        if let Some(batch) = batch {
            form.set("batch", batch);
        }
        self.modal_open = true;
    }

    pub fn open_edit_modal(&mut self, id: &str, name: &str) {
        self.open_edit_modal_full(id, name, None, None);
    }

    pub fn close_edit_modal(&mut self) {
        self.modal_open = false;
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    /// Form id backing the edit dialog, when the page has one.
    pub fn edit_form_id(&self) -> Option<&str> {
        self.edit_form.as_deref()
    }

    // --- List region ---

    pub fn set_list(&mut self, html: String) {
        self.list_html = Some(html);
    }

    /// Rendered list region, `None` until the first refresh lands.
    pub fn list_html(&self) -> Option<&str> {
        self.list_html.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<MasterItem> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| MasterItem {
                id: format!("m{i}"),
                name: n.to_string(),
            })
            .collect()
    }

    #[test]
    fn repopulate_keeps_a_surviving_selection() {
        let mut select = SelectControl::new("branch").with_options(&["Arts", "Science"]);
        select.set_value("Science");

        select.repopulate(&items(&["Arts", "Science", "Commerce"]));

        assert_eq!(select.value(), Some("Science"));
        assert_eq!(select.option_values(), vec!["Arts", "Science", "Commerce"]);
    }

    #[test]
    fn repopulate_clears_a_vanished_selection() {
        let mut select = SelectControl::new("branch").with_options(&["Arts", "Science"]);
        select.set_value("Science");

        select.repopulate(&items(&["Arts", "Commerce"]));

        // The old value no longer matches any option, so nothing is selected.
        assert_eq!(select.value(), None);
    }

    #[test]
    fn repopulate_defaults_to_the_first_option() {
        let mut select = SelectControl::new("branch");
        select.repopulate(&items(&["Arts", "Science"]));
        assert_eq!(select.value(), Some("Arts"));
    }

    #[test]
    fn repopulate_with_nothing_empties_the_select() {
        let mut select = SelectControl::new("branch").with_options(&["Arts"]);
        select.repopulate(&[]);
        assert_eq!(select.value(), None);
        assert!(select.options().is_empty());
    }

    #[test]
    fn form_reset_restores_declared_defaults() {
        let mut form = Form::new().with_field("name", "").with_field("term", "2024");
        form.set("name", "Physics");
        form.set("term", "2025");

        form.reset();

        assert_eq!(form.field("name"), Some(""));
        assert_eq!(form.field("term"), Some("2024"));
    }

    #[test]
    fn modal_populates_only_declared_fields() {
        let mut page = Page::new("/master/branch")
            .with_edit_form("edit", Form::new().with_field("id", "").with_field("name", ""));

        page.open_edit_modal_full("m1", "Science", Some("17"), None);

        assert!(page.modal_open());
        assert_eq!(page.form_field("edit", "id"), Some("m1"));
        assert_eq!(page.form_field("edit", "name"), Some("Science"));
        // No roll input on this page; the value goes nowhere.
        assert_eq!(page.form_field("edit", "roll"), None);
    }

    #[test]
    fn modal_without_a_dialog_is_a_no_op() {
        let mut page = Page::new("/students");
        page.open_edit_modal("m1", "Science");
        assert!(!page.modal_open());
    }
}
