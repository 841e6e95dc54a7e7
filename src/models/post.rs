//! Post model
//!
//! Posts are a flat list; the backend stores and returns them in insertion
//! order. Newest-first display is a client-side presentation choice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier
    pub id: i64,
    /// Post title
    pub title: String,
    /// Post body
    pub content: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with the given title and content
    pub fn new(title: String, content: String) -> Self {
        Self {
            id: 0, // Will be set by the database
            title,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Input for creating a new post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostInput {
    /// Post title
    pub title: String,
    /// Post body
    pub content: String,
}

impl CreatePostInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_new() {
        let post = Post::new("T".to_string(), "C".to_string());
        assert_eq!(post.id, 0);
        assert_eq!(post.title, "T");
        assert_eq!(post.content, "C");
    }
}
