//! Error types for the credential store.

/// Errors surfaced by credential operations.
///
/// Persistence I/O failures are deliberately NOT represented here: the
/// store keeps serving from memory when a save fails, logs the failure
/// on the save worker, and retries the full state on the next save. The
/// caller of `set_or_replace`/`remove` never sees disk errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The configured hash primitive failed to produce a digest.
    /// Fatal for this one call only: the credential is neither stored
    /// nor compared, and no weaker fallback is ever substituted.
    #[error("password hashing unavailable: {0}")]
    HashingUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashing_unavailable_display_names_the_cause() {
        let err = StoreError::HashingUnavailable("backend gone".into());
        assert_eq!(
            err.to_string(),
            "password hashing unavailable: backend gone"
        );
    }
}
