//! Runtime configuration for the gate.

use std::path::PathBuf;

/// Tunables the embedding host hands to [`Airlock::new`](crate::Airlock::new).
#[derive(Debug, Clone)]
pub struct AirlockConfig {
    /// Where the credential file lives, relative to the host's working
    /// directory unless absolute. Parent directories are created on the
    /// first save.
    pub credentials_path: PathBuf,

    /// Minimum accepted password length, counted in characters rather than
    /// bytes so multi-byte alphabets are not penalized.
    pub min_password_len: usize,
}

impl Default for AirlockConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("airlock/passwords.json"),
            min_password_len: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AirlockConfig::default();
        assert_eq!(config.credentials_path, PathBuf::from("airlock/passwords.json"));
        assert_eq!(config.min_password_len, 4);
    }
}
