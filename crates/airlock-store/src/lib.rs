//! Credential storage for the Airlock login gate.
//!
//! One responsibility: remember which identity registered which password
//! hash, and answer pass/fail for login attempts. Three pieces:
//!
//! 1. **Hashing seam** — [`PasswordHasher`] trait, [`Sha256Hasher`] default
//! 2. **In-memory map** — the live source of truth ([`CredentialStore`])
//! 3. **Persistence** — a flat JSON file, rewritten asynchronously by a
//!    single background writer so disk latency never blocks gameplay
//!
//! The store never holds plaintext: passwords are digested at the call
//! boundary and only the hex digest is kept.

mod error;
mod hasher;
mod store;

pub use error::StoreError;
pub use hasher::{PasswordHasher, Sha256Hasher};
pub use store::CredentialStore;
