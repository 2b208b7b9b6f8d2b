use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use std::time::{Duration, Instant};

use super::{BlogPostStore, StoreError};
use crate::db::models::{BlogPost, BlogPostRow};

/// PostgreSQL-backed store over the `blog_posts` table.
#[derive(Debug, Clone)]
pub struct PgBlogPostStore {
    pool: PgPool,
}

impl PgBlogPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogPostStore for PgBlogPostStore {
    async fn find_all(&self) -> Result<Vec<BlogPost>, StoreError> {
        let rows = sqlx::query_as::<_, BlogPostRow>(
            "SELECT id, title, content, tags FROM blog_posts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn find(&self, id: i64) -> Result<Option<BlogPost>, StoreError> {
        let row = sqlx::query_as::<_, BlogPostRow>(
            "SELECT id, title, content, tags FROM blog_posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BlogPost::from))
    }

    async fn assign_id(&self) -> Result<i64, StoreError> {
        let (id,): (i64,) =
            sqlx::query_as("SELECT nextval(pg_get_serial_sequence('blog_posts', 'id'))")
                .fetch_one(&self.pool)
                .await?;
        Ok(id)
    }

    async fn persist(&self, post: &mut BlogPost) -> Result<(), StoreError> {
        let id = match post.id {
            Some(id) => id,
            None => self.assign_id().await?,
        };

        sqlx::query(
            r#"
            INSERT INTO blog_posts (id, title, content, tags)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET title = EXCLUDED.title, content = EXCLUDED.content, tags = EXCLUDED.tags
            "#,
        )
        .bind(id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.tags.clone().map(Json))
        .execute(&self.pool)
        .await?;

        // Only stamp the id once the row exists.
        post.id = Some(id);
        Ok(())
    }

    async fn remove(&self, post: &BlogPost) -> Result<bool, StoreError> {
        let id = post.id.ok_or(StoreError::MissingId)?;
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<Duration, StoreError> {
        let start = Instant::now();
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(start.elapsed())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
