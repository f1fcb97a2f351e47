//! The credential store: identity → password hash, mirrored to a file.
//!
//! The in-memory map is the live source of truth and answers every
//! `has`/`verify` immediately. The file is a mirror, rewritten in full
//! by a single background task so that a slow disk can never stall a
//! join, a command, or the enforcement tick.
//!
//! # Concurrency note
//!
//! The map sits behind one coarse `RwLock`; every critical section is a
//! plain map operation, so callers on any thread or task can share the
//! store behind an `Arc` without external locking. Saves are serialized
//! by construction: only the save worker writes the file, and it drains
//! its queue to the newest snapshot before each write.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use airlock_core::PlayerUuid;
use tokio::sync::{mpsc, oneshot};

use crate::{PasswordHasher, Sha256Hasher, StoreError};

/// One queued save: the full map as it looked when the mutation happened,
/// plus an optional completion signal for `flush`.
struct SaveJob {
    snapshot: HashMap<PlayerUuid, String>,
    ack: Option<oneshot::Sender<()>>,
}

/// Holds every registered credential and mirrors them to a JSON file.
///
/// Created with [`CredentialStore::open`], which loads the file
/// synchronously (tolerating a missing or unreadable one) and spawns the
/// save worker. Must therefore be constructed inside a Tokio runtime.
pub struct CredentialStore {
    credentials: RwLock<HashMap<PlayerUuid, String>>,
    hasher: Box<dyn PasswordHasher>,
    save_tx: mpsc::UnboundedSender<SaveJob>,
    path: PathBuf,
}

impl CredentialStore {
    /// Opens the store at `path` with the default SHA-256 hasher.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::open_with_hasher(path, Box::new(Sha256Hasher))
    }

    /// Opens the store with a caller-supplied hasher.
    ///
    /// Loading is synchronous and tolerant: an absent file starts an
    /// empty store, and an unreadable or unparsable file is logged and
    /// also starts empty. Neither case is an error to the caller; the
    /// next successful save rewrites the file from memory.
    pub fn open_with_hasher(
        path: impl Into<PathBuf>,
        hasher: Box<dyn PasswordHasher>,
    ) -> Self {
        let path = path.into();
        let credentials = load_credentials(&path);

        let (save_tx, save_rx) = mpsc::unbounded_channel();
        tokio::spawn(save_worker(save_rx, path.clone()));

        Self {
            credentials: RwLock::new(credentials),
            hasher,
            save_tx,
            path,
        }
    }

    /// Returns `true` if the identity has a password on record.
    pub fn has(&self, id: PlayerUuid) -> bool {
        self.read_map().contains_key(&id)
    }

    /// Stores (or overwrites) the identity's password.
    ///
    /// Returns as soon as the in-memory map is updated; the durable save
    /// is queued to the background worker and its failure is logged, not
    /// surfaced.
    ///
    /// # Errors
    /// [`StoreError::HashingUnavailable`] if the digest cannot be
    /// produced. Nothing is stored in that case.
    pub fn set_or_replace(
        &self,
        id: PlayerUuid,
        password: &str,
    ) -> Result<(), StoreError> {
        let digest = self.hasher.hash(password)?;

        let snapshot = {
            let mut map = self.write_map();
            map.insert(id, digest);
            map.clone()
        };
        self.queue_save(snapshot, None);
        Ok(())
    }

    /// Checks a password attempt against the stored hash.
    ///
    /// `false` for unregistered identities, wrong passwords, and hashing
    /// failures alike; a hashing failure additionally logs at error
    /// level, since it blocks an otherwise legitimate attempt.
    pub fn verify(&self, id: PlayerUuid, password: &str) -> bool {
        let Some(stored) = self.read_map().get(&id).cloned() else {
            return false;
        };
        match self.hasher.hash(password) {
            Ok(digest) => digest == stored,
            Err(error) => {
                tracing::error!(%id, %error, "cannot verify password");
                false
            }
        }
    }

    /// Removes the identity's credential, forcing re-registration.
    ///
    /// Returns `false` if there was nothing to remove (no save queued).
    pub fn remove(&self, id: PlayerUuid) -> bool {
        let snapshot = {
            let mut map = self.write_map();
            if map.remove(&id).is_none() {
                return false;
            }
            map.clone()
        };
        self.queue_save(snapshot, None);
        true
    }

    /// Number of registered identities.
    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    /// Returns `true` if no identity is registered.
    pub fn is_empty(&self) -> bool {
        self.read_map().is_empty()
    }

    /// Waits until every save queued so far has been attempted.
    ///
    /// Queues one final save of the current state and resolves once the
    /// worker has written it (or logged its failure). Used by graceful
    /// shutdown and by tests that assert on file contents.
    pub async fn flush(&self) {
        let snapshot = self.read_map().clone();
        let (ack_tx, ack_rx) = oneshot::channel();
        self.queue_save(snapshot, Some(ack_tx));
        // An error here means the worker is gone, which only happens at
        // runtime shutdown; there is nothing left to wait for.
        let _ = ack_rx.await;
    }

    /// The file this store mirrors to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn queue_save(
        &self,
        snapshot: HashMap<PlayerUuid, String>,
        ack: Option<oneshot::Sender<()>>,
    ) {
        if self.save_tx.send(SaveJob { snapshot, ack }).is_err() {
            tracing::error!(
                path = %self.path.display(),
                "credential save worker is gone; state kept in memory only"
            );
        }
    }

    // The critical sections below are plain map operations and cannot
    // panic, so a poisoned lock still holds a valid map: recover it
    // instead of propagating the poison.
    fn read_map(&self) -> RwLockReadGuard<'_, HashMap<PlayerUuid, String>> {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_map(&self) -> RwLockWriteGuard<'_, HashMap<PlayerUuid, String>> {
        self.credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Synchronous startup load. Missing file is the normal first-run case;
/// any other failure is logged and treated as an empty store.
fn load_credentials(path: &Path) -> HashMap<PlayerUuid, String> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(
                path = %path.display(),
                "no credential file yet, starting empty"
            );
            return HashMap::new();
        }
        Err(error) => {
            tracing::error!(
                path = %path.display(),
                %error,
                "cannot read credential file, starting empty"
            );
            return HashMap::new();
        }
    };

    match serde_json::from_slice::<HashMap<PlayerUuid, String>>(&bytes) {
        Ok(map) => {
            tracing::info!(
                path = %path.display(),
                entries = map.len(),
                "loaded credentials"
            );
            map
        }
        Err(error) => {
            tracing::error!(
                path = %path.display(),
                %error,
                "credential file is unparsable, starting empty"
            );
            HashMap::new()
        }
    }
}

/// The single writer. Receives snapshots, drains the queue to the newest
/// one (a burst of mutations becomes one write), then rewrites the whole
/// file. Acks for every drained job fire after the write that covers
/// them, since a later snapshot always contains the earlier mutations.
async fn save_worker(
    mut rx: mpsc::UnboundedReceiver<SaveJob>,
    path: PathBuf,
) {
    while let Some(job) = rx.recv().await {
        let mut snapshot = job.snapshot;
        let mut acks = Vec::new();
        if let Some(ack) = job.ack {
            acks.push(ack);
        }

        let mut coalesced = 0usize;
        while let Ok(newer) = rx.try_recv() {
            snapshot = newer.snapshot;
            if let Some(ack) = newer.ack {
                acks.push(ack);
            }
            coalesced += 1;
        }
        if coalesced > 0 {
            tracing::debug!(coalesced, "coalesced queued credential saves");
        }

        match write_credentials(&path, &snapshot).await {
            Ok(()) => tracing::debug!(
                path = %path.display(),
                entries = snapshot.len(),
                "credential file saved"
            ),
            Err(error) => tracing::error!(
                path = %path.display(),
                %error,
                "credential save failed; in-memory state unaffected, next save retries"
            ),
        }

        for ack in acks {
            let _ = ack.send(());
        }
    }
}

/// Recreates the parent directory if needed and overwrites the whole
/// file with the pretty-printed flat map. Never an incremental diff.
async fn write_credentials(
    path: &Path,
    snapshot: &HashMap<PlayerUuid, String>,
) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let json =
        serde_json::to_string_pretty(snapshot).map_err(std::io::Error::other)?;
    tokio::fs::write(path, json).await
}

// =========================================================================
// Tests
// =========================================================================
