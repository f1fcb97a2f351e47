//! Password hashing seam.
//!
//! The store never sees plaintext beyond the call boundary: every
//! password is digested through a [`PasswordHasher`] before it touches
//! the map or the file. The default is SHA-256, hex-encoded.
//!
//! The seam is a trait so hashing failure is a real code path: the store
//! must refuse to set or verify a credential when the digest cannot be
//! produced, rather than storing some weaker fallback. Tests exercise
//! that path with a deliberately failing hasher.

use sha2::{Digest, Sha256};

use crate::StoreError;

/// Produces the one-way digest stored in place of a password.
///
/// Implementations must be deterministic: the same password must always
/// yield the same digest string, since verification is a straight
/// compare against the stored value.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Digests the given password.
    ///
    /// # Errors
    /// [`StoreError::HashingUnavailable`] when the primitive cannot
    /// produce a digest. The caller treats this as fatal for the one
    /// call, never for the process.
    fn hash(&self, password: &str) -> Result<String, StoreError>;
}

/// The default hasher: SHA-256, lowercase hex output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl PasswordHasher for Sha256Hasher {
    fn hash(&self, password: &str) -> Result<String, StoreError> {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

// =========================================================================
// Tests
// =========================================================================
