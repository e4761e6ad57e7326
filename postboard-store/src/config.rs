//! Configuration for the Postboard store

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Environment variable holding the token signing secret
pub const JWT_SECRET_ENV: &str = "POSTBOARD_JWT_SECRET";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "POSTBOARD_DATA_DIR";

/// Data directory used when `POSTBOARD_DATA_DIR` is unset
pub const DEFAULT_DATA_DIR: &str = "data";

/// Argon2 time cost (passes over memory) for new password hashes
pub const DEFAULT_HASH_COST: u32 = 2;

/// Session tokens are valid for this many hours after issuance
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Store configuration
#[derive(Clone)]
pub struct StoreConfig {
    /// Directory holding `users.json`, `posts.json` and `forms.json`
    pub data_dir: PathBuf,

    /// HMAC secret for token signing
    pub jwt_secret: String,

    /// Token lifetime in hours
    pub token_ttl_hours: i64,

    /// Argon2 time cost
    pub hash_cost: u32,

    /// Bounded mailbox size of each collection actor
    pub actor_queue_depth: usize,
}

impl StoreConfig {
    /// Create config with sensible defaults
    ///
    /// The secret is required: there is no built-in development default.
    pub fn new(data_dir: impl AsRef<Path>, jwt_secret: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            hash_cost: DEFAULT_HASH_COST,
            actor_queue_depth: 256,
        }
    }

    /// Build from `POSTBOARD_JWT_SECRET` and `POSTBOARD_DATA_DIR`
    ///
    /// Fails with `StoreError::Config` when the secret is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test map, ...)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(JWT_SECRET_ENV)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                StoreError::Config(format!("{JWT_SECRET_ENV} must be set to a non-empty secret"))
            })?;
        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        let config = Self::new(data_dir, secret);
        config.validate()?;
        Ok(config)
    }

    /// Override JWT secret
    pub fn with_jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }

    /// Override token lifetime
    pub fn with_token_ttl_hours(mut self, hours: i64) -> Self {
        self.token_ttl_hours = hours;
        self
    }

    /// Override Argon2 time cost
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Reject configurations the store cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(StoreError::Config("JWT secret must not be empty".into()));
        }
        if self.token_ttl_hours <= 0 {
            return Err(StoreError::Config(format!(
                "token lifetime must be positive, got {}h",
                self.token_ttl_hours
            )));
        }
        if self.hash_cost == 0 {
            return Err(StoreError::Config("hash cost must be at least 1".into()));
        }
        if self.actor_queue_depth == 0 {
            return Err(StoreError::Config("actor queue depth must be at least 1".into()));
        }
        Ok(())
    }

    /// Get the backing file for a collection
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("data_dir", &self.data_dir)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("hash_cost", &self.hash_cost)
            .field("actor_queue_depth", &self.actor_queue_depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = StoreConfig::new("/tmp/test_postboard", "secret");
        assert_eq!(cfg.token_ttl_hours, 24);
        assert_eq!(cfg.hash_cost, DEFAULT_HASH_COST);
        assert_eq!(
            cfg.collection_path("users"),
            PathBuf::from("/tmp/test_postboard/users.json")
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let cfg = StoreConfig::new("/data", "first")
            .with_jwt_secret("my-secret")
            .with_token_ttl_hours(48)
            .with_hash_cost(3);

        assert_eq!(cfg.jwt_secret, "my-secret");
        assert_eq!(cfg.token_ttl_hours, 48);
        assert_eq!(cfg.hash_cost, 3);
    }

    #[test]
    fn test_missing_secret_is_config_error() {
        let env: HashMap<&str, &str> = HashMap::from([(DATA_DIR_ENV, "/srv/postboard")]);
        let result = StoreConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert!(matches!(result, Err(StoreError::Config(_))));

        let blank = StoreConfig::from_lookup(|k| (k == JWT_SECRET_ENV).then(|| "   ".to_string()));
        assert!(matches!(blank, Err(StoreError::Config(_))));
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = HashMap::from([(JWT_SECRET_ENV, "s3cret")]);
        let cfg = StoreConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.jwt_secret, "s3cret");
        assert_eq!(cfg.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let cfg = StoreConfig::new("/data", "do-not-print");
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("do-not-print"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(StoreConfig::new("/d", "s").with_token_ttl_hours(0).validate().is_err());
        assert!(StoreConfig::new("/d", "s").with_hash_cost(0).validate().is_err());
    }
}
