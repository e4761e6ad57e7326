//! # Postboard Store
//!
//! File-backed core of the Postboard content service — user accounts,
//! posts, and forms kept as JSON arrays on local disk, with password
//! hashing and signed session tokens.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │              postboard-store              │
//! ├──────────────┬──────────────┬─────────────┤
//! │ UserService  │ PostService  │ FormService │
//! │ (signup,     │ (CRUD,       │ (submit,    │
//! │  login)      │  ownership)  │  list)      │
//! ├──────────────┴──────────────┴─────────────┤
//! │ CredentialManager (argon2) │ TokenIssuer  │
//! │                            │ (JWT HS256)  │
//! ├───────────────────────────────────────────┤
//! │     CollectionActor<T> (one per file)     │
//! │  serialized load → modify → atomic save   │
//! ├───────────────────────────────────────────┤
//! │   users.json  │  posts.json  │ forms.json │
//! └───────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use postboard_store::content::PostDraft;
//! use postboard_store::{Postboard, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let board = Postboard::open(StoreConfig::from_env()?).await?;
//!
//!     let session = board.users.authenticate("alice@example.com", "SecureP@ss1").await?;
//!     let author = board.users.verify_token(&session.token)?;
//!     let post = board.posts.create(&author, PostDraft::new("Hello", "First post")).await?;
//!
//!     let forms = board.forms.list_by_post(&post.id).await?;
//!     assert!(forms.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Serialized writes**: each collection has one actor; concurrent
//!   read-modify-write cycles on a file never lose updates
//! - **Atomic saves**: write to a temp file, sync, rename
//! - **Corruption surfaces**: an unparsable file is an error, never `[]`
//! - **Railway Programming**: All operations return `Result<T, StoreError>`

pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod schema;
pub mod service;
pub mod store;
pub mod validation;

// Re-exports for convenience
pub use config::StoreConfig;
pub use error::{AuthFailure, Result, StoreError};
pub use service::Postboard;
pub use store::{CollectionActor, CollectionHandle, Record};

pub use auth::{Session, Signup, User, UserProfile, UserService};
pub use content::{Form, FormService, Post, PostDraft, PostService};
