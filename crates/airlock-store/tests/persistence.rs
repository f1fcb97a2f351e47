//! Persistence tests for the credential store.
//!
//! These go through the real filesystem (under a temp dir): write via
//! the background worker, then reopen the file cold and check what
//! survived. `flush` is the synchronization point; without it a test
//! could read the file before the worker got scheduled.

use std::collections::HashMap;

use airlock_core::PlayerUuid;
use airlock_store::CredentialStore;

#[tokio::test]
async fn test_saved_credentials_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passwords.json");
    let alice = PlayerUuid::random();
    let bob = PlayerUuid::random();

    {
        let store = CredentialStore::open(&path);
        store.set_or_replace(alice, "correct horse").unwrap();
        store.set_or_replace(bob, "battery staple").unwrap();
        store.flush().await;
    }

    let reopened = CredentialStore::open(&path);
    assert_eq!(reopened.len(), 2);
    assert!(reopened.verify(alice, "correct horse"));
    assert!(reopened.verify(bob, "battery staple"));
    assert!(!reopened.verify(alice, "battery staple"));
}

#[tokio::test]
async fn test_file_layout_is_flat_string_to_string_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passwords.json");
    let player = PlayerUuid::random();

    let store = CredentialStore::open(&path);
    store.set_or_replace(player, "abcd").unwrap();
    store.flush().await;

    // The on-disk contract: one flat JSON object, UUID string keys,
    // hex digest values. Anything richer would break other readers.
    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: HashMap<String, String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(
        parsed.get(&player.to_string()).map(String::as_str),
        // sha256("abcd")
        Some("88d4266fd4e6338d13b845fcf289579d209c897823b9217da3e161936f031589")
    );
}

#[tokio::test]
async fn test_parent_directories_are_created_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/passwords.json");

    let store = CredentialStore::open(&path);
    store.set_or_replace(PlayerUuid::random(), "pw").unwrap();
    store.flush().await;

    assert!(path.is_file());
}

#[tokio::test]
async fn test_absent_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();

    let store = CredentialStore::open(dir.path().join("never-written.json"));

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_corrupt_file_starts_empty_and_next_save_repairs_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passwords.json");
    std::fs::write(&path, b"{ this is not json").unwrap();

    let store = CredentialStore::open(&path);
    assert!(store.is_empty(), "corrupt file must not poison the store");

    // The store keeps working and the next save replaces the garbage.
    let player = PlayerUuid::random();
    store.set_or_replace(player, "fresh start").unwrap();
    store.flush().await;

    let reopened = CredentialStore::open(&path);
    assert!(reopened.verify(player, "fresh start"));
}

#[tokio::test]
async fn test_remove_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passwords.json");
    let alice = PlayerUuid::random();
    let bob = PlayerUuid::random();

    let store = CredentialStore::open(&path);
    store.set_or_replace(alice, "one").unwrap();
    store.set_or_replace(bob, "two").unwrap();
    store.remove(alice);
    store.flush().await;

    let reopened = CredentialStore::open(&path);
    assert!(!reopened.has(alice));
    assert!(reopened.has(bob));
}

#[tokio::test]
async fn test_burst_of_saves_ends_with_final_state_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("passwords.json");
    let player = PlayerUuid::random();

    let store = CredentialStore::open(&path);
    // A rapid burst; the worker may coalesce these into fewer writes,
    // but the file must end up reflecting the last mutation.
    for n in 0..50 {
        store.set_or_replace(player, &format!("password-{n}")).unwrap();
    }
    store.flush().await;

    let reopened = CredentialStore::open(&path);
    assert!(reopened.verify(player, "password-49"));
    assert_eq!(reopened.len(), 1);
}
