//! HTTP front for the Postboard store
//!
//! ```text
//! POST   /api/signup
//! POST   /api/login
//! GET    /api/posts
//! GET    /api/posts/:id
//! POST   /api/posts                  (auth)
//! PUT    /api/posts/:id              (auth)
//! DELETE /api/posts/:id              (auth)
//! POST   /api/posts/:postId/forms    (auth)
//! GET    /api/posts/:postId/forms
//! GET    /health
//! ```

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use postboard_store::Postboard;

pub mod config;
pub mod error;
pub mod gate;
pub mod routes;

pub use config::ServerConfig;
pub use error::ApiError;
pub use gate::AuthUser;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<Postboard>,
}

/// Build the full application router
pub fn router(board: Postboard) -> Router {
    let state = AppState {
        board: Arc::new(board),
    };

    let api = Router::new()
        .route("/signup", post(routes::signup))
        .route("/login", post(routes::login))
        .route("/posts", get(routes::list_posts).post(routes::create_post))
        .route(
            "/posts/:id",
            get(routes::get_post)
                .put(routes::update_post)
                .delete(routes::delete_post),
        )
        .route(
            "/posts/:id/forms",
            get(routes::list_forms).post(routes::create_form),
        );

    Router::new()
        .route("/health", get(routes::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
