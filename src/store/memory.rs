use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicI64, Ordering},
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

use super::{BlogPostStore, StoreError};
use crate::db::models::BlogPost;

/// Process-local store, used when no database is configured and in tests.
///
/// Records live in a `BTreeMap` keyed by id, so iteration is ascending by id.
#[derive(Debug)]
pub struct InMemoryStore {
    posts: RwLock<BTreeMap<i64, BlogPost>>,
    next_id: AtomicI64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogPostStore for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<BlogPost>, StoreError> {
        Ok(self.posts.read().await.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<BlogPost>, StoreError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn assign_id(&self) -> Result<i64, StoreError> {
        Ok(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    async fn persist(&self, post: &mut BlogPost) -> Result<(), StoreError> {
        let id = match post.id {
            Some(id) => id,
            None => {
                let id = self.assign_id().await?;
                post.id = Some(id);
                id
            }
        };

        self.posts.write().await.insert(id, post.clone());
        Ok(())
    }

    async fn remove(&self, post: &BlogPost) -> Result<bool, StoreError> {
        let id = post.id.ok_or(StoreError::MissingId)?;
        Ok(self.posts.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<Duration, StoreError> {
        let start = Instant::now();
        let _ = self.posts.read().await;
        Ok(start.elapsed())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> BlogPost {
        BlogPost::new(title.to_string(), "content".to_string(), None)
    }

    #[tokio::test]
    async fn test_persist_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let mut first = draft("first");
        let mut second = draft("second");

        store.persist(&mut first).await.unwrap();
        store.persist(&mut second).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_persist_existing_id_replaces_record() {
        let store = InMemoryStore::new();
        let mut post = draft("before");
        store.persist(&mut post).await.unwrap();

        post.title = "after".to_string();
        store.persist(&mut post).await.unwrap();

        assert_eq!(store.len().await, 1);
        let found = store.find(post.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.title, "after");
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_id() {
        let store = InMemoryStore::new();
        for title in ["a", "b", "c"] {
            store.persist(&mut draft(title)).await.unwrap();
        }

        let ids: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_remove_reports_whether_record_existed() {
        let store = InMemoryStore::new();
        let mut post = draft("doomed");
        store.persist(&mut post).await.unwrap();

        assert!(store.remove(&post).await.unwrap());
        assert!(!store.remove(&post).await.unwrap());
        assert!(store.find(post.id.unwrap()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_remove() {
        let store = InMemoryStore::new();
        let mut post = draft("one");
        store.persist(&mut post).await.unwrap();
        store.remove(&post).await.unwrap();

        let mut next = draft("two");
        store.persist(&mut next).await.unwrap();
        assert_eq!(next.id, Some(2));
    }

    #[tokio::test]
    async fn test_remove_unsaved_post_fails() {
        let store = InMemoryStore::new();
        let result = store.remove(&draft("never saved")).await;
        assert!(matches!(result, Err(StoreError::MissingId)));
    }
}
