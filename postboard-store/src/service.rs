//! Postboard — opens the three collections and wires the services over them

use std::sync::Arc;

use chrono::Duration;
use tracing::info;

use crate::auth::{CredentialManager, TokenIssuer, User, UserService};
use crate::config::StoreConfig;
use crate::content::{Form, FormService, Post, PostService};
use crate::error::Result;
use crate::schema::{COLLECTION_FORMS, COLLECTION_POSTS, COLLECTION_USERS};
use crate::store::{CollectionActor, CollectionHandle};

/// Every domain service, sharing one data directory and one signing secret
///
/// Cheap to clone; all clones talk to the same collection actors.
#[derive(Clone)]
pub struct Postboard {
    pub users: UserService,
    pub posts: PostService,
    pub forms: FormService,
}

impl Postboard {
    /// Validate `config`, create missing collection files, spawn the actors
    pub async fn open(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let users: CollectionHandle<User> = spawn_collection(&config, COLLECTION_USERS).await?;
        let posts: CollectionHandle<Post> = spawn_collection(&config, COLLECTION_POSTS).await?;
        let forms: CollectionHandle<Form> = spawn_collection(&config, COLLECTION_FORMS).await?;

        let tokens = Arc::new(TokenIssuer::with_ttl(
            &config.jwt_secret,
            Duration::hours(config.token_ttl_hours),
        ));
        let credentials = CredentialManager::new(config.hash_cost);

        let posts = PostService::new(posts);
        let board = Self {
            users: UserService::new(users, credentials, tokens).await?,
            forms: FormService::new(forms, posts.clone()),
            posts,
        };

        info!(
            path = %config.data_dir.display(),
            "Postboard store initialized"
        );
        Ok(board)
    }
}

async fn spawn_collection<T: crate::store::Record>(
    config: &StoreConfig,
    name: &str,
) -> Result<CollectionHandle<T>> {
    CollectionActor::spawn(name, config.collection_path(name), config.actor_queue_depth).await
}
