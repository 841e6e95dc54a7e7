//! Post repository

use crate::models::Post;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// Post repository trait
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Create a new post
    async fn create(&self, post: &Post) -> Result<Post>;

    /// List all posts in insertion order
    async fn list(&self) -> Result<Vec<Post>>;
}

/// SQLx-based post repository implementation
pub struct SqlxPostRepository {
    pool: SqlitePool,
}

impl SqlxPostRepository {
    /// Create a new SQLx post repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn PostRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create(&self, post: &Post) -> Result<Post> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO posts (title, content, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create post")?;

        Ok(Post {
            id: result.last_insert_rowid(),
            title: post.title.clone(),
            content: post.content.clone(),
            created_at: now,
        })
    }

    async fn list(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, created_at
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list posts")?;

        rows.iter().map(row_to_post).collect()
    }
}

fn row_to_post(row: &sqlx::sqlite::SqliteRow) -> Result<Post> {
    Ok(Post {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> SqlxPostRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxPostRepository::new(pool)
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo = setup_test_repo().await;

        let created = repo
            .create(&Post::new("T".to_string(), "C".to_string()))
            .await
            .expect("Failed to create post");

        assert!(created.id > 0);
        assert_eq!(created.title, "T");
        assert_eq!(created.content, "C");
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = setup_test_repo().await;
        let posts = repo.list().await.expect("Failed to list posts");
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let repo = setup_test_repo().await;
        repo.create(&Post::new("first".to_string(), "a".to_string()))
            .await
            .unwrap();
        repo.create(&Post::new("second".to_string(), "b".to_string()))
            .await
            .unwrap();

        let posts = repo.list().await.expect("Failed to list posts");
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "first");
        assert_eq!(posts[1].title, "second");
        assert!(posts[0].id < posts[1].id);
    }
}
