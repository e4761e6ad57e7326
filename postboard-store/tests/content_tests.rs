//! PostService / FormService integration tests — ownership, forms, concurrency

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use postboard_store::content::PostDraft;
use postboard_store::{Postboard, StoreConfig, StoreError};

async fn open_board(dir: &TempDir) -> Postboard {
    let config =
        StoreConfig::new(dir.path(), "test-secret-jwt-key-min-32-chars!!").with_hash_cost(1);
    Postboard::open(config).await.unwrap()
}

#[tokio::test]
async fn test_create_and_get_post() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;

    let post = board
        .posts
        .create("alice", PostDraft::new("  Hello  ", "First post"))
        .await
        .unwrap();

    assert_eq!(post.title, "Hello");
    assert_eq!(post.author_id, "alice");

    let fetched = board.posts.get(&post.id).await.unwrap();
    assert_eq!(fetched, post);
    assert_eq!(board.posts.list().await.unwrap(), vec![post]);
}

#[tokio::test]
async fn test_get_missing_post() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;

    assert!(matches!(
        board.posts.get("nope").await,
        Err(StoreError::NotFound(_))
    ));
    assert!(board.posts.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_by_owner() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;

    let post = board
        .posts
        .create("alice", PostDraft::new("Draft", "v1"))
        .await
        .unwrap();

    let updated = board
        .posts
        .update(&post.id, "alice", PostDraft::new("Final", "v2"))
        .await
        .unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.content, "v2");
    assert_eq!(updated.author_id, "alice");
    assert_eq!(updated.created_at, post.created_at);
    assert_eq!(board.posts.get(&post.id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_update_and_delete_by_stranger_forbidden() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;

    let post = board
        .posts
        .create("alice", PostDraft::new("Mine", "hands off"))
        .await
        .unwrap();

    let update = board
        .posts
        .update(&post.id, "mallory", PostDraft::new("Hijacked", ""))
        .await;
    assert!(matches!(update, Err(StoreError::Forbidden(_))));

    let delete = board.posts.delete(&post.id, "mallory").await;
    assert!(matches!(delete, Err(StoreError::Forbidden(_))));

    // Untouched
    assert_eq!(board.posts.get(&post.id).await.unwrap(), post);
}

#[tokio::test]
async fn test_update_and_delete_missing_post() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;

    assert!(matches!(
        board.posts.update("ghost", "alice", PostDraft::new("t", "c")).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        board.posts.delete("ghost", "alice").await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_by_owner() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;

    let keep = board.posts.create("bob", PostDraft::new("Keep", "")).await.unwrap();
    let gone = board.posts.create("alice", PostDraft::new("Gone", "")).await.unwrap();

    board.posts.delete(&gone.id, "alice").await.unwrap();

    assert_eq!(board.posts.list().await.unwrap(), vec![keep]);
    assert!(matches!(
        board.posts.get(&gone.id).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_post_validation() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;

    let empty_title = board.posts.create("alice", PostDraft::new("   ", "body")).await;
    assert!(matches!(empty_title, Err(StoreError::Validation(_))));

    let huge = board
        .posts
        .create("alice", PostDraft::new("t", "x".repeat(20_001)))
        .await;
    assert!(matches!(huge, Err(StoreError::Validation(_))));

    let post = board.posts.create("alice", PostDraft::new("ok", "")).await.unwrap();
    let blank_update = board.posts.update(&post.id, "alice", PostDraft::new("", "")).await;
    assert!(matches!(blank_update, Err(StoreError::Validation(_))));
}

#[tokio::test]
async fn test_two_concurrent_creates_both_persist() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;

    let (a, b) = tokio::join!(
        board.posts.create("alice", PostDraft::new("A", "")),
        board.posts.create("bob", PostDraft::new("B", "")),
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_ne!(a.id, b.id);

    // Reopen from disk to make sure both were written, not just cached
    drop(board);
    let board = open_board(&dir).await;
    let posts = board.posts.list().await.unwrap();
    assert_eq!(posts.len(), 2);
}

#[tokio::test]
async fn test_many_concurrent_creates_across_tasks() {
    let dir = TempDir::new().unwrap();
    let board = Arc::new(open_board(&dir).await);

    let mut tasks = Vec::new();
    for i in 0..50 {
        let board = Arc::clone(&board);
        tasks.push(tokio::spawn(async move {
            board
                .posts
                .create(&format!("user-{}", i % 5), PostDraft::new(format!("Post {i}"), ""))
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let posts = board.posts.list().await.unwrap();
    assert_eq!(posts.len(), 50);

    let mut ids: Vec<_> = posts.iter().map(|p| p.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[tokio::test]
async fn test_form_requires_existing_post() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;

    let result = board
        .forms
        .create("no-such-post", "alice", json!({ "answer": 1 }))
        .await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));

    let raw = std::fs::read_to_string(dir.path().join("forms.json")).unwrap();
    assert_eq!(raw.trim(), "[]");
}

#[tokio::test]
async fn test_create_and_list_forms() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;

    let post = board.posts.create("alice", PostDraft::new("Survey", "")).await.unwrap();
    let other = board.posts.create("alice", PostDraft::new("Other", "")).await.unwrap();

    assert!(board.forms.list_by_post(&post.id).await.unwrap().is_empty());

    let first = board
        .forms
        .create(&post.id, "bob", json!({ "rating": 4 }))
        .await
        .unwrap();
    let second = board
        .forms
        .create(&post.id, "carol", json!({ "rating": 5, "comment": "great" }))
        .await
        .unwrap();
    board
        .forms
        .create(&other.id, "bob", json!({ "rating": 1 }))
        .await
        .unwrap();

    assert_eq!(first.post_id, post.id);
    assert_eq!(first.author_id, "bob");
    assert_eq!(
        board.forms.list_by_post(&post.id).await.unwrap(),
        vec![first, second]
    );
}

#[tokio::test]
async fn test_list_forms_for_unknown_post_is_empty() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;

    assert!(board.forms.list_by_post("never-existed").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_form_data_must_be_object() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;
    let post = board.posts.create("alice", PostDraft::new("Survey", "")).await.unwrap();

    for bad in [json!(null), json!("text"), json!([1, 2])] {
        let result = board.forms.create(&post.id, "bob", bad).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }
}

#[tokio::test]
async fn test_post_delete_does_not_cascade_to_forms() {
    let dir = TempDir::new().unwrap();
    let board = open_board(&dir).await;

    let post = board.posts.create("alice", PostDraft::new("Survey", "")).await.unwrap();
    let form = board
        .forms
        .create(&post.id, "bob", json!({ "rating": 3 }))
        .await
        .unwrap();

    board.posts.delete(&post.id, "alice").await.unwrap();

    assert_eq!(board.forms.list_by_post(&post.id).await.unwrap(), vec![form]);
    // But no new forms can be attached
    assert!(matches!(
        board.forms.create(&post.id, "bob", json!({})).await,
        Err(StoreError::NotFound(_))
    ));
}
