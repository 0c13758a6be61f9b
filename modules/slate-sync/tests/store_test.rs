//! Integration tests for SharedStorage.
//! Everything is in-process; no external services needed.

use slate_sync::SharedStorage;

// =========================================================================
// Map behavior
// =========================================================================

#[tokio::test]
async fn set_then_get_round_trips() {
    let storage = SharedStorage::new();
    let ctx = storage.context();

    ctx.set_item("greeting", "hello");
    assert_eq!(ctx.get_item("greeting").as_deref(), Some("hello"));
    assert_eq!(ctx.get_item("missing"), None);
}

#[tokio::test]
async fn contexts_share_one_map() {
    let storage = SharedStorage::new();
    let a = storage.context();
    let b = storage.context();

    a.set_item("k", "from-a");
    assert_eq!(b.get_item("k").as_deref(), Some("from-a"));

    b.set_item("k", "from-b");
    assert_eq!(a.get_item("k").as_deref(), Some("from-b"));
}

#[tokio::test]
async fn remove_clears_the_key() {
    let storage = SharedStorage::new();
    let ctx = storage.context();

    ctx.set_item("k", "v");
    ctx.remove_item("k");
    assert_eq!(ctx.get_item("k"), None);
}

// =========================================================================
// Change notification
// =========================================================================

#[tokio::test]
async fn other_context_observes_a_write() {
    let storage = SharedStorage::new();
    let a = storage.context();
    let b = storage.context();
    let mut watch = b.subscribe();

    a.set_item("k", "v");

    let event = watch.poll().expect("b should see a's write");
    assert_eq!(event.key, "k");
    assert_eq!(event.new_value.as_deref(), Some("v"));
}

#[tokio::test]
async fn writer_never_observes_its_own_write() {
    let storage = SharedStorage::new();
    let a = storage.context();
    let mut watch = a.subscribe();

    a.set_item("k", "v");

    assert_eq!(watch.poll(), None);
}

#[tokio::test]
async fn rapid_writes_keep_only_last_notification() {
    let storage = SharedStorage::new();
    let a = storage.context();
    let b = storage.context();
    let mut watch = b.subscribe();

    a.set_item("k", "first");
    a.set_item("k", "second");
    a.set_item("k", "third");

    // One pending change, the newest. The intermediates are gone.
    let event = watch.poll().expect("one change should be pending");
    assert_eq!(event.new_value.as_deref(), Some("third"));
    assert_eq!(watch.poll(), None);
    assert_eq!(b.get_item("k").as_deref(), Some("third"));
}

#[tokio::test]
async fn removal_surfaces_as_change_without_value() {
    let storage = SharedStorage::new();
    let a = storage.context();
    let b = storage.context();
    let mut watch = b.subscribe();

    a.set_item("k", "v");
    assert!(watch.poll().is_some());

    a.remove_item("k");
    let event = watch.poll().expect("removal should be observable");
    assert_eq!(event.key, "k");
    assert_eq!(event.new_value, None);

    // Removing a key that was never there is not a change.
    a.remove_item("never-set");
    assert_eq!(watch.poll(), None);
}

#[tokio::test]
async fn every_other_context_is_notified() {
    let storage = SharedStorage::new();
    let a = storage.context();
    let b = storage.context();
    let c = storage.context();
    let mut watch_b = b.subscribe();
    let mut watch_c = c.subscribe();

    a.set_item("k", "v");

    assert!(watch_b.poll().is_some());
    assert!(watch_c.poll().is_some());
}

#[tokio::test]
async fn late_subscriber_sees_no_history() {
    let storage = SharedStorage::new();
    let a = storage.context();
    let b = storage.context();

    a.set_item("k", "v");

    let mut watch = b.subscribe();
    assert_eq!(watch.poll(), None);

    // But the value itself is still readable.
    assert_eq!(b.get_item("k").as_deref(), Some("v"));
}

#[tokio::test]
async fn changed_wakes_for_foreign_writes_only() {
    let storage = SharedStorage::new();
    let a = storage.context();
    let b = storage.context();
    let mut watch = b.subscribe();

    // b's own write must not satisfy the wait.
    b.set_item("k", "own");
    a.set_item("k", "foreign");

    let event = watch.changed().await.expect("a's write should wake b");
    assert_eq!(event.new_value.as_deref(), Some("foreign"));
}

#[tokio::test]
async fn changed_resolves_none_when_area_is_gone() {
    let storage = SharedStorage::new();
    let a = storage.context();
    let mut watch = a.subscribe();

    drop(a);
    drop(storage);

    assert!(watch.changed().await.is_none());
}
