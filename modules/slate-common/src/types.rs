use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The master categories every admin page keeps its dropdowns in sync with.
/// The list is fixed; notifications do not carry it.
pub const KNOWN_MASTERS: [&str; 7] = [
    "session",
    "course",
    "branch",
    "department",
    "batch",
    "religion",
    "caste",
];

/// Shared-storage key holding the most recent master-update notification.
pub const MASTER_UPDATE_KEY: &str = "erp_master_update";

/// Form fields by name, the JSON body shape of the legacy entity endpoints.
pub type FormValues = BTreeMap<String, String>;

/// One entry of a master reference list. Servers may send more columns;
/// everything beyond id and name is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterItem {
    pub id: String,
    pub name: String,
}

/// Cross-tab notice that a master category changed. The timestamp is
/// informational only; nothing orders or deduplicates on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNotification {
    pub name: String,
    pub timestamp: i64,
}

impl UpdateNotification {
    /// Notification for `category` stamped with the current wall clock, in
    /// milliseconds since the epoch.
    pub fn now(category: &str) -> Self {
        Self {
            name: category.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Canonical form of a master name as the server stores it: trimmed, inner
/// spaces to underscores, lowercased.
pub fn normalize_master(name: &str) -> String {
    name.trim().replace(' ', "_").to_lowercase()
}

/// Heading form of a normalized master name: underscores back to spaces,
/// each word capitalized.
pub fn master_title(category: &str) -> String {
    category
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
