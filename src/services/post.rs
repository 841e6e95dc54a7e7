//! Post service
//!
//! Listing returns insertion order; clients that want newest-first
//! reorder locally. Creation performs no field validation - the posts
//! form is a demo surface and empty titles are accepted.

use crate::db::repositories::PostRepository;
use crate::models::{CreatePostInput, Post};
use anyhow::Result;
use std::sync::Arc;

/// Post service
pub struct PostService {
    post_repo: Arc<dyn PostRepository>,
}

impl PostService {
    /// Create a new post service with the given repository
    pub fn new(post_repo: Arc<dyn PostRepository>) -> Self {
        Self { post_repo }
    }

    /// List all posts in insertion order
    pub async fn list(&self) -> Result<Vec<Post>> {
        self.post_repo.list().await
    }

    /// Create a post and return it with its server-assigned id
    pub async fn create(&self, input: CreatePostInput) -> Result<Post> {
        let post = Post::new(input.title, input.content);
        self.post_repo.create(&post).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxPostRepository;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_service() -> PostService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        PostService::new(SqlxPostRepository::boxed(pool))
    }

    #[tokio::test]
    async fn test_create_then_list_roundtrip() {
        let service = setup_test_service().await;

        let created = service
            .create(CreatePostInput::new("T", "C"))
            .await
            .expect("Failed to create post");
        assert!(created.id > 0);

        let posts = service.list().await.expect("Failed to list posts");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, created.id);
        assert_eq!(posts[0].title, "T");
        assert_eq!(posts[0].content, "C");
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let service = setup_test_service().await;

        for i in 1..=3 {
            service
                .create(CreatePostInput::new(format!("post {}", i), "body"))
                .await
                .expect("Failed to create post");
        }

        let posts = service.list().await.expect("Failed to list posts");
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["post 1", "post 2", "post 3"]);
    }

    #[tokio::test]
    async fn test_empty_title_accepted() {
        let service = setup_test_service().await;

        let created = service
            .create(CreatePostInput::new("", "content without a title"))
            .await
            .expect("Empty titles pass through");
        assert_eq!(created.title, "");
    }
}
