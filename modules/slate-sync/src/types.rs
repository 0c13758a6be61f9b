/// Identity of one context (tab) attached to a storage area. Assigned by the
/// area on attach, unique within it.
pub type ContextId = u64;

/// One observed change to the storage area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// The key that changed.
    pub key: String,
    /// Value after the change; `None` when the key was removed.
    pub new_value: Option<String>,
    /// Who wrote it. Watches use this to filter out their own context's
    /// writes; it is not part of the public contract.
    pub(crate) writer: ContextId,
}
