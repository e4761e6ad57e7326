//! Authentication module — users, password hashing, and session tokens

pub mod credentials;
pub mod service;
pub mod token;
pub mod types;

pub use credentials::CredentialManager;
pub use service::UserService;
pub use token::TokenIssuer;
pub use types::{Credentials, Session, Signup, User, UserProfile};
