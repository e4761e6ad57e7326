//! Content domain types — Post, Form, and their inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::Record;

/// Post record — as stored in `posts.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Owning user; never changes after creation
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }
}

impl Record for Post {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Form record — as stored in `forms.json`
///
/// `post_id` named an existing post when the form was created; it is not
/// re-checked afterwards, and deleting the post leaves the form in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub form_data: Value,
    pub created_at: DateTime<Utc>,
}

impl Record for Form {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Title and body for creating or replacing a post
#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Body of a form submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub form_data: Value,
}
