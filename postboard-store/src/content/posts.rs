//! PostService — create, edit, delete and read posts
//!
//! Only a post's author may update or delete it. The ownership check runs
//! inside the serialized `modify`, against the freshly loaded collection.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::schema::{MAX_CONTENT_LEN, MAX_TITLE_LEN};
use crate::store::CollectionHandle;
use crate::validation;

use super::types::{Post, PostDraft};

#[derive(Clone)]
pub struct PostService {
    posts: CollectionHandle<Post>,
}

impl PostService {
    pub fn new(posts: CollectionHandle<Post>) -> Self {
        Self { posts }
    }

    pub async fn create(&self, author_id: &str, draft: PostDraft) -> Result<Post> {
        let author_id = validation::record_id("authorId", author_id)?;
        let (title, content) = validate_draft(&draft)?;

        let post = Post {
            id: Uuid::new_v4().to_string(),
            title,
            content,
            author_id,
            created_at: Utc::now(),
        };

        let record = post.clone();
        self.posts
            .modify(move |posts| {
                posts.push(record);
                Ok(())
            })
            .await?;

        info!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(post)
    }

    /// Replace title and content; `author_id` and `created_at` are kept
    pub async fn update(&self, post_id: &str, author_id: &str, draft: PostDraft) -> Result<Post> {
        let (title, content) = validate_draft(&draft)?;
        let post_id = post_id.to_string();
        let author_id = author_id.to_string();

        let post = self
            .posts
            .modify(move |posts| {
                let post = posts
                    .iter_mut()
                    .find(|p| p.id == post_id)
                    .ok_or_else(|| post_not_found(&post_id))?;
                if !post.is_owned_by(&author_id) {
                    return Err(not_author(&post_id));
                }
                post.title = title;
                post.content = content;
                Ok(post.clone())
            })
            .await?;

        info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    pub async fn delete(&self, post_id: &str, author_id: &str) -> Result<()> {
        let post_id = post_id.to_string();
        let author_id = author_id.to_string();

        let removed = self
            .posts
            .modify(move |posts| {
                let index = posts
                    .iter()
                    .position(|p| p.id == post_id)
                    .ok_or_else(|| post_not_found(&post_id))?;
                if !posts[index].is_owned_by(&author_id) {
                    return Err(not_author(&post_id));
                }
                Ok(posts.remove(index))
            })
            .await?;

        info!(post_id = %removed.id, "Post deleted");
        Ok(())
    }

    pub async fn get(&self, post_id: &str) -> Result<Post> {
        self.posts
            .get(post_id)
            .await?
            .ok_or_else(|| post_not_found(post_id))
    }

    /// All posts in creation order
    pub async fn list(&self) -> Result<Vec<Post>> {
        self.posts.load().await
    }

    /// Whether a post with this id currently exists
    pub async fn exists(&self, post_id: &str) -> Result<bool> {
        Ok(self.posts.get(post_id).await?.is_some())
    }
}

fn validate_draft(draft: &PostDraft) -> Result<(String, String)> {
    let title = validation::required_text("title", &draft.title, MAX_TITLE_LEN)?;
    let content = validation::optional_text("content", &draft.content, MAX_CONTENT_LEN)?;
    Ok((title, content))
}

pub(crate) fn post_not_found(post_id: &str) -> StoreError {
    StoreError::NotFound(format!("post {post_id}"))
}

fn not_author(post_id: &str) -> StoreError {
    StoreError::Forbidden(format!("not the author of post {post_id}"))
}
