//! Route handlers — thin adapters from JSON bodies to store services

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use postboard_store::auth::{Credentials, Session, Signup};
use postboard_store::content::{Form, FormSubmission, Post, PostDraft};

use crate::error::ApiError;
use crate::gate::AuthUser;
use crate::AppState;

type ApiResult<T> = Result<T, ApiError>;

// ─── Auth ───

pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<Signup>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(signup) = body?;
    state.board.users.register(signup).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully" })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<Session>> {
    let Json(creds) = body?;
    let session = state
        .board
        .users
        .authenticate(&creds.email, &creds.password)
        .await?;
    Ok(Json(session))
}

// ─── Posts ───

pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<Post>>> {
    Ok(Json(state.board.posts.list().await?))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<Post>> {
    Ok(Json(state.board.posts.get(&post_id).await?))
}

pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Result<Json<PostDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let Json(draft) = body?;
    let post = state.board.posts.create(&user_id, draft).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<String>,
    body: Result<Json<PostDraft>, JsonRejection>,
) -> ApiResult<Json<Post>> {
    let Json(draft) = body?;
    Ok(Json(state.board.posts.update(&post_id, &user_id, draft).await?))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.board.posts.delete(&post_id, &user_id).await?;
    Ok(Json(json!({ "message": "Post deleted" })))
}

// ─── Forms ───

pub async fn create_form(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<String>,
    body: Result<Json<FormSubmission>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Form>)> {
    let Json(submission) = body?;
    let form = state
        .board
        .forms
        .create(&post_id, &user_id, submission.form_data)
        .await?;
    Ok((StatusCode::CREATED, Json(form)))
}

pub async fn list_forms(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<Vec<Form>>> {
    Ok(Json(state.board.forms.list_by_post(&post_id).await?))
}

// ─── Health ───

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
