//! Blog post persistence. Handlers only ever see [`BlogPostStore`];
//! [`InMemoryStore`] and [`PgBlogPostStore`] provide the storage.

mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgBlogPostStore;

use async_trait::async_trait;
use std::time::Duration;

use crate::db::models::BlogPost;

/// Errors from the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("post has no id, it was never persisted")]
    MissingId,
}

/// Repository over blog posts. Each call is atomic on its own; nothing
/// spans calls.
#[async_trait]
pub trait BlogPostStore: Send + Sync {
    /// All posts, ascending by id.
    async fn find_all(&self) -> Result<Vec<BlogPost>, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<BlogPost>, StoreError>;

    /// Reserve a fresh id. Ids are never handed out twice.
    async fn assign_id(&self) -> Result<i64, StoreError>;

    /// Write the post, replacing any record with the same id. A post
    /// without an id gets one from [`BlogPostStore::assign_id`] first.
    async fn persist(&self, post: &mut BlogPost) -> Result<(), StoreError>;

    /// Returns `true` if a record was removed.
    async fn remove(&self, post: &BlogPost) -> Result<bool, StoreError>;

    /// Round-trip to the backend, used by health checks.
    async fn ping(&self) -> Result<Duration, StoreError>;

    fn backend(&self) -> &'static str;
}
