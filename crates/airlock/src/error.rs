//! Unified error type for the Airlock gate.

use airlock_store::StoreError;

/// Top-level error for credential and authentication operations.
///
/// When embedding the `airlock` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate. The
/// `#[from]` attribute on the store variant auto-generates a `From` impl,
/// so the `?` operator converts store errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum AirlockError {
    /// A password already exists for this identity; change it instead of
    /// setting a fresh one.
    #[error("a password is already set for this player")]
    AlreadyRegistered,

    /// No password exists for this identity yet.
    #[error("no password is set for this player")]
    NotRegistered,

    /// The operation only makes sense for an identity awaiting login.
    #[error("player is not awaiting authentication")]
    NotHeld,

    /// The operation requires a completed login first.
    #[error("player has not logged in yet")]
    StillHeld,

    /// The supplied password did not match the stored credential.
    #[error("wrong password")]
    WrongPassword,

    /// A credential-store failure (hashing backend unavailable).
    #[error(transparent)]
    Store(#[from] StoreError),
}
