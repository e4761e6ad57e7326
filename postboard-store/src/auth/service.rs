//! UserService — registration, login, and token checks over `users.json`
//!
//! The uniqueness check for an email and the append of the new user run in
//! one serialized `modify`, so two simultaneous signups for the same address
//! cannot both succeed.
//!
//! # Usage
//!
//! ```rust,no_run
//! use postboard_store::auth::Signup;
//! use postboard_store::{Postboard, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let board = Postboard::open(StoreConfig::new("/data/postboard", "my-production-secret")).await?;
//!
//!     // Register
//!     let user = board.users.register(Signup {
//!         name: "Alice".into(),
//!         email: "alice@example.com".into(),
//!         phone: "555-0100".into(),
//!         gender: "female".into(),
//!         password: "SecureP@ss1".into(),
//!     }).await?;
//!
//!     // Login → JWT token
//!     let session = board.users.authenticate("alice@example.com", "SecureP@ss1").await?;
//!
//!     // Verify on each request
//!     assert_eq!(board.users.verify_token(&session.token)?, user.id);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::schema::{MAX_GENDER_LEN, MAX_NAME_LEN, MAX_PHONE_LEN};
use crate::store::CollectionHandle;
use crate::validation;

use super::credentials::CredentialManager;
use super::token::TokenIssuer;
use super::types::*;

/// User accounts and sessions
#[derive(Clone)]
pub struct UserService {
    users: CollectionHandle<User>,
    credentials: CredentialManager,
    tokens: Arc<TokenIssuer>,
    // Verified against when the email is unknown, so both login failures cost the same
    dummy_hash: Arc<str>,
}

impl UserService {
    pub async fn new(
        users: CollectionHandle<User>,
        credentials: CredentialManager,
        tokens: Arc<TokenIssuer>,
    ) -> Result<Self> {
        let dummy_hash = credentials
            .hash_blocking(Uuid::new_v4().to_string())
            .await?;
        Ok(Self {
            users,
            credentials,
            tokens,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Create an account; `Conflict` if the email is already registered
    pub async fn register(&self, signup: Signup) -> Result<User> {
        let name = validation::required_text("name", &signup.name, MAX_NAME_LEN)?;
        let email = validation::email(&signup.email)?;
        let phone = validation::optional_text("phone", &signup.phone, MAX_PHONE_LEN)?;
        let gender = validation::optional_text("gender", &signup.gender, MAX_GENDER_LEN)?;
        validation::password(&signup.password)?;

        // Cheap early exit before paying for a hash; the check inside modify is authoritative
        if self.find_by_email(&email).await?.is_some() {
            return Err(email_taken());
        }

        let password_hash = self.credentials.hash_blocking(signup.password).await?;
        let user = User {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            phone,
            gender,
            password_hash,
        };

        let record = user.clone();
        self.users
            .modify(move |users| {
                if users.iter().any(|u| u.email.eq_ignore_ascii_case(&record.email)) {
                    return Err(email_taken());
                }
                users.push(record);
                Ok(())
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check credentials and issue a session token
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Session> {
        let found = match validation::email(email) {
            Ok(email) => self.find_by_email(&email).await?,
            Err(_) => None,
        };

        let hash = found
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| self.dummy_hash.to_string());
        let matches = self
            .credentials
            .verify_blocking(password.to_string(), hash)
            .await?;

        let user = match found {
            Some(user) if matches => user,
            _ => {
                debug!("Login rejected");
                return Err(StoreError::InvalidCredentials);
            }
        };

        let token = self.tokens.issue(&user.id)?;
        info!(user_id = %user.id, "Login successful");
        Ok(Session {
            token,
            user: user.profile(),
        })
    }

    /// Subject id of a valid token; `StoreError::Auth` otherwise
    pub fn verify_token(&self, token: &str) -> Result<String> {
        Ok(self.tokens.verify(token)?)
    }

    /// Public profile of a user
    pub async fn get(&self, user_id: &str) -> Result<UserProfile> {
        self.users
            .get(user_id)
            .await?
            .map(|u| u.profile())
            .ok_or_else(|| StoreError::NotFound(format!("user {user_id}")))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .await
    }
}

fn email_taken() -> StoreError {
    StoreError::Conflict("email already registered".into())
}
