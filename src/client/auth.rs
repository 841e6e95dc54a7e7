//! Authentication view-state
//!
//! The frontend's login status is a cache of the backend's last answer.
//! It is written from exactly three places: the on-mount status check
//! ([`AuthView::refresh`]) and the two callbacks the login/signup and
//! logout forms invoke after their own successful backend call.

use super::{ApiClient, User};

/// Login status as the UI sees it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthView {
    /// Whether the last check or callback said we are logged in
    pub is_logged_in: bool,
    /// The authenticated user; `None` whenever logged out
    pub user: Option<User>,
}

impl AuthView {
    /// Create a view in the logged-out state
    pub fn new() -> Self {
        Self::default()
    }

    /// Query the backend for the current login status and mirror it
    ///
    /// This is the on-mount effect: one request, state set from its
    /// result. A transport failure is logged and treated as logged out -
    /// the view fails open to logged-out, never to logged-in. Nothing
    /// re-runs this on a timer, so the state can go stale until the next
    /// call; an in-flight refresh that resolves after a local
    /// `handle_logout` will overwrite it.
    pub async fn refresh(&mut self, client: &ApiClient) {
        match client.logged_in().await {
            Ok(status) => match (status.logged_in, status.user) {
                (true, Some(user)) => self.handle_login(user),
                _ => self.handle_logout(),
            },
            Err(e) => {
                tracing::warn!("login status check failed: {}", e);
                self.handle_logout();
            }
        }
    }

    /// Mark the view logged in with `user`
    ///
    /// Called by login/signup forms after their backend call succeeded;
    /// no re-query is performed.
    pub fn handle_login(&mut self, user: User) {
        self.is_logged_in = true;
        self.user = Some(user);
    }

    /// Mark the view logged out
    pub fn handle_logout(&mut self) {
        self.is_logged_in = false;
        self.user = None;
    }
}
