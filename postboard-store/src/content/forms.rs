//! FormService — submissions attached to posts
//!
//! The post is looked up when the form is created and never again. That
//! check and the append are two separate steps on two collections, so a post
//! deleted in between can still receive the form.

use chrono::Utc;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::store::CollectionHandle;
use crate::validation;

use super::posts::{post_not_found, PostService};
use super::types::Form;

#[derive(Clone)]
pub struct FormService {
    forms: CollectionHandle<Form>,
    posts: PostService,
}

impl FormService {
    pub fn new(forms: CollectionHandle<Form>, posts: PostService) -> Self {
        Self { forms, posts }
    }

    /// Attach a submission to an existing post; `NotFound` if there is none
    pub async fn create(&self, post_id: &str, author_id: &str, form_data: Value) -> Result<Form> {
        let post_id = validation::record_id("postId", post_id)?;
        let author_id = validation::record_id("authorId", author_id)?;
        if !form_data.is_object() {
            return Err(StoreError::Validation("formData must be a JSON object".into()));
        }

        if !self.posts.exists(&post_id).await? {
            return Err(post_not_found(&post_id));
        }

        let form = Form {
            id: Uuid::new_v4().to_string(),
            post_id,
            author_id,
            form_data,
            created_at: Utc::now(),
        };

        let record = form.clone();
        self.forms
            .modify(move |forms| {
                forms.push(record);
                Ok(())
            })
            .await?;

        info!(form_id = %form.id, post_id = %form.post_id, "Form submitted");
        Ok(form)
    }

    /// Forms for a post in submission order; empty for unknown posts
    pub async fn list_by_post(&self, post_id: &str) -> Result<Vec<Form>> {
        self.forms.filter(|f| f.post_id == post_id).await
    }
}
