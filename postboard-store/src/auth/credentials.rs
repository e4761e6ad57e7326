//! Password hashing with Argon2id
//!
//! Hashes are PHC strings, so verification reads the salt and cost back out
//! of the stored value and old hashes keep working after a cost change.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::DEFAULT_HASH_COST;
use crate::error::{Result, StoreError};

/// Hashes and verifies passwords; never keeps or logs the plaintext
#[derive(Debug, Clone, Copy)]
pub struct CredentialManager {
    cost: u32,
}

impl Default for CredentialManager {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_COST)
    }
}

impl CredentialManager {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Salted one-way hash of `plaintext`
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            self.cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| StoreError::Config(format!("invalid hash cost {}: {e}", self.cost)))?;

        let salt = SaltString::generate(&mut OsRng);
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| StoreError::Internal(e.to_string()))
    }

    /// `false` for a wrong password and for a hash that does not parse
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// `hash` on the blocking pool
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String> {
        let manager = *self;
        tokio::task::spawn_blocking(move || manager.hash(&plaintext)).await?
    }

    /// `verify` on the blocking pool
    pub async fn verify_blocking(&self, plaintext: String, hash: String) -> Result<bool> {
        let manager = *self;
        Ok(tokio::task::spawn_blocking(move || manager.verify(&plaintext, &hash)).await?)
    }
}
