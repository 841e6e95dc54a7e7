//! API client and frontend view-state
//!
//! This module is what the single-page frontend boils down to once the
//! markup is stripped away: a credentialed HTTP client ([`ApiClient`])
//! and two view-state containers ([`AuthView`], [`PostListView`]) that
//! cache the backend's answers between renders.

pub mod auth;
pub mod posts;
pub mod types;

pub use auth::AuthView;
pub use posts::PostListView;
pub use types::{LoggedInStatus, Post, User};

use serde::de::DeserializeOwned;

/// Error type for client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, bad body)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with an error status
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Typed client for the minipost API
///
/// Keeps a cookie jar so the session cookie set by `/login` and
/// `/signup` rides along on every later request, the way a browser
/// sends credentialed requests.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// GET /logged_in - ask the backend whether the session is live
    pub async fn logged_in(&self) -> Result<LoggedInStatus, ClientError> {
        let response = self.http.get(self.url("/logged_in")).send().await?;
        Self::decode(response).await
    }

    /// POST /login - authenticate and store the session cookie
    pub async fn login(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&serde_json::json!({
                "username_or_email": username_or_email,
                "password": password,
            }))
            .send()
            .await?;

        let auth: types::AuthPayload = Self::decode(response).await?;
        Ok(auth.user)
    }

    /// POST /signup - create an account; the backend logs it in
    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.url("/signup"))
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let auth: types::AuthPayload = Self::decode(response).await?;
        Ok(auth.user)
    }

    /// POST /logout - invalidate the session
    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.http.post(self.url("/logout")).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// GET /api/v1/posts - fetch all posts
    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        let response = self.http.get(self.url("/api/v1/posts")).send().await?;
        Self::decode(response).await
    }

    /// POST /api/v1/posts - create a post
    pub async fn create_post(&self, title: &str, content: &str) -> Result<Post, ClientError> {
        let response = self
            .http
            .post(self.url("/api/v1/posts"))
            .json(&serde_json::json!({"title": title, "content": content}))
            .send()
            .await?;

        Self::decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    /// Turn an error response into `ClientError::Api`, preferring the
    /// message from the backend's error envelope
    async fn error_from(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<types::ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(body);

        ClientError::Api { status, message }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_support::{spawn_backend, unreachable_backend};

    #[tokio::test]
    async fn test_signup_login_logout_roundtrip() {
        let base_url = spawn_backend().await;
        let client = ApiClient::new(&base_url).unwrap();

        let user = client
            .signup("alice", "alice@example.com", "password123")
            .await
            .expect("Signup failed");
        assert!(user.id > 0);
        assert_eq!(user.username, "alice");

        // The cookie jar carries the session
        let status = client.logged_in().await.expect("Status check failed");
        assert!(status.logged_in);
        assert_eq!(status.user.unwrap().id, user.id);

        client.logout().await.expect("Logout failed");
        let status = client.logged_in().await.expect("Status check failed");
        assert!(!status.logged_in);
        assert!(status.user.is_none());

        // Logging back in works with either username or email
        let user = client
            .login("alice@example.com", "password123")
            .await
            .expect("Login failed");
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_bad_credentials_surface_as_api_error() {
        let base_url = spawn_backend().await;
        let client = ApiClient::new(&base_url).unwrap();

        let err = client
            .login("nobody", "wrong")
            .await
            .expect_err("Login should fail");

        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 401);
                assert!(!message.is_empty());
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_conflict() {
        let base_url = spawn_backend().await;
        let client = ApiClient::new(&base_url).unwrap();

        client
            .signup("alice", "same@example.com", "password123")
            .await
            .expect("First signup failed");

        let err = client
            .signup("bob", "same@example.com", "password456")
            .await
            .expect_err("Duplicate signup should fail");

        assert!(matches!(err, ClientError::Api { status: 409, .. }));
    }

    #[tokio::test]
    async fn test_create_and_list_posts() {
        let base_url = spawn_backend().await;
        let client = ApiClient::new(&base_url).unwrap();

        let created = client
            .create_post("T", "C")
            .await
            .expect("Create post failed");
        assert!(created.id > 0);

        let posts = client.list_posts().await.expect("List posts failed");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "T");
        assert_eq!(posts[0].content, "C");
    }

    #[tokio::test]
    async fn test_network_failure_is_network_error() {
        let client = ApiClient::new(unreachable_backend()).unwrap();

        let err = client.logged_in().await.expect_err("Should fail");
        assert!(matches!(err, ClientError::Network(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.url("/logged_in"), "http://localhost:8080/logged_in");
    }
}
