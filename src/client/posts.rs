//! Post list view-state
//!
//! Mirrors the original list component: fetch once on mount behind a
//! loading flag, then prepend newly created posts locally. The list is
//! not re-fetched after a create, so it can drift from the server when
//! other clients write concurrently.

use super::{ApiClient, Post};

/// The post list as the UI sees it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostListView {
    /// Posts in display order (newest first once `add_post` is used)
    pub posts: Vec<Post>,
    /// Whether the initial fetch is in flight
    pub is_loading: bool,
}

impl PostListView {
    /// Create an empty, idle view
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the post list (the on-mount effect)
    ///
    /// Sets the loading flag for the duration of the request. A failed
    /// fetch is logged and leaves the list empty with the flag cleared;
    /// no error state is rendered.
    pub async fn load(&mut self, client: &ApiClient) {
        self.is_loading = true;

        match client.list_posts().await {
            Ok(posts) => self.posts = posts,
            Err(e) => tracing::warn!("failed to load posts: {}", e),
        }

        self.is_loading = false;
    }

    /// Prepend a freshly created post
    ///
    /// Called by the creation form with the backend's response (which
    /// carries the server-assigned id). The list is not re-fetched.
    pub fn add_post(&mut self, post: Post) {
        self.posts.insert(0, post);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{spawn_backend, unreachable_backend};

    fn test_post(id: i64, title: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            content: "body".to_string(),
        }
    }

    #[test]
    fn test_starts_empty_and_idle() {
        let view = PostListView::new();
        assert!(view.posts.is_empty());
        assert!(!view.is_loading);
    }

    #[test]
    fn test_add_post_prepends() {
        let mut view = PostListView::new();
        view.posts = vec![test_post(1, "old")];

        view.add_post(test_post(2, "new"));

        assert_eq!(view.posts.len(), 2);
        assert_eq!(view.posts[0].title, "new");
        assert_eq!(view.posts[1].title, "old");
    }

    #[tokio::test]
    async fn test_load_fetches_posts_and_clears_loading() {
        let base_url = spawn_backend().await;
        let client = ApiClient::new(&base_url).unwrap();

        client.create_post("T", "C").await.expect("Create failed");

        let mut view = PostListView::new();
        view.load(&client).await;

        assert!(!view.is_loading);
        assert_eq!(view.posts.len(), 1);
        assert_eq!(view.posts[0].title, "T");
        assert_eq!(view.posts[0].content, "C");
    }

    #[tokio::test]
    async fn test_load_failure_leaves_empty_list_and_clears_loading() {
        let client = ApiClient::new(unreachable_backend()).unwrap();

        let mut view = PostListView::new();
        view.load(&client).await;

        assert!(!view.is_loading);
        assert!(view.posts.is_empty());
    }

    #[tokio::test]
    async fn test_create_then_add_post_grows_list_by_one_without_refetch() {
        let base_url = spawn_backend().await;
        let client = ApiClient::new(&base_url).unwrap();

        // Mount with an existing post
        client.create_post("old", "x").await.expect("Create failed");
        let mut view = PostListView::new();
        view.load(&client).await;
        let len_before = view.posts.len();

        // The form submits, then hands the response to the view
        let created = client.create_post("T", "C").await.expect("Create failed");
        view.add_post(created.clone());

        assert_eq!(view.posts.len(), len_before + 1);
        assert_eq!(view.posts[0], created);
        assert!(view.posts[0].id > 0);
    }
}
