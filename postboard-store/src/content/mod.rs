//! Content module — posts and the forms submitted against them

pub mod forms;
pub mod posts;
pub mod types;

pub use forms::FormService;
pub use posts::PostService;
pub use types::{Form, FormSubmission, Post, PostDraft};
