//! Collection names and field limits
//!
//! Each collection is one JSON array on disk:
//! ```text
//! data_dir/
//! ├── users.json
//! ├── posts.json
//! └── forms.json
//! ```

// ─── Collection Names (constants) ───

pub const COLLECTION_USERS: &str = "users";
pub const COLLECTION_POSTS: &str = "posts";
pub const COLLECTION_FORMS: &str = "forms";

/// Every collection the store opens at startup
pub fn all_collections() -> [&'static str; 3] {
    [COLLECTION_USERS, COLLECTION_POSTS, COLLECTION_FORMS]
}

// ─── Field Limits (characters) ───

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_PHONE_LEN: usize = 32;
pub const MAX_GENDER_LEN: usize = 32;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_CONTENT_LEN: usize = 20_000;
pub const MAX_ID_LEN: usize = 64;
