//! User service
//!
//! Business logic for accounts and authentication: signup, login/logout,
//! and session validation. Sessions are opaque uuid tokens held in the
//! session store; the store's TTL and the session's own `expires_at`
//! both bound the lifetime.

use crate::db::repositories::UserRepository;
use crate::models::{Session, SignupInput, User};
use crate::services::password::{hash_password, verify_password};
use crate::store::DynSessionStore;
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Default session lifetime in minutes
const DEFAULT_SESSION_TTL_MINUTES: i64 = 90;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Authentication failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// User already exists
    #[error("User already exists: {0}")]
    UserExists(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// User service for managing accounts and sessions
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    sessions: DynSessionStore,
    session_ttl_minutes: i64,
}

impl UserService {
    /// Create a new user service with the given repository and store
    pub fn new(user_repo: Arc<dyn UserRepository>, sessions: DynSessionStore) -> Self {
        Self {
            user_repo,
            sessions,
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
        }
    }

    /// Create a new user service with a custom session lifetime
    pub fn with_session_ttl(
        user_repo: Arc<dyn UserRepository>,
        sessions: DynSessionStore,
        session_ttl_minutes: i64,
    ) -> Self {
        Self {
            user_repo,
            sessions,
            session_ttl_minutes,
        }
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// - `ValidationError` if username, email, or password is empty, or
    ///   the email has no `@`
    /// - `UserExists` if username or email is already taken (no record
    ///   is created)
    /// - `InternalError` for database errors
    pub async fn signup(&self, input: SignupInput) -> Result<User, UserServiceError> {
        self.validate_signup_input(&input)?;

        if self
            .user_repo
            .get_by_username(&input.username)
            .await
            .context("Failed to check username")?
            .is_some()
        {
            return Err(UserServiceError::UserExists(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }

        if self
            .user_repo
            .get_by_email(&input.email)
            .await
            .context("Failed to check email")?
            .is_some()
        {
            return Err(UserServiceError::UserExists(format!(
                "Email '{}' is already registered",
                input.email
            )));
        }

        let password_hash = hash_password(&input.password).context("Failed to hash password")?;

        let user = User::new(input.username, input.email, password_hash);

        let created = self
            .user_repo
            .create(&user)
            .await
            .context("Failed to create user")?;

        Ok(created)
    }

    /// Login with credentials
    ///
    /// Validates the provided credentials and writes a fresh session into
    /// the store if they check out. Failed logins leave the store
    /// untouched.
    ///
    /// # Errors
    ///
    /// - `AuthenticationError` if the user is unknown or the password is
    ///   wrong (deliberately the same message for both)
    /// - `InternalError` for database or store errors
    pub async fn login(&self, input: LoginInput) -> Result<Session, UserServiceError> {
        let user = self
            .find_user_by_username_or_email(&input.username_or_email)
            .await?
            .ok_or_else(|| {
                UserServiceError::AuthenticationError("Invalid username or password".to_string())
            })?;

        let password_valid = verify_password(&input.password, &user.password_hash)
            .context("Failed to verify password")?;

        if !password_valid {
            return Err(UserServiceError::AuthenticationError(
                "Invalid username or password".to_string(),
            ));
        }

        let session = self.create_session(user.id).await?;

        Ok(session)
    }

    /// Logout (invalidate session)
    ///
    /// Idempotent: removing an unknown or already-removed token succeeds.
    pub async fn logout(&self, session_id: &str) -> Result<(), UserServiceError> {
        self.sessions
            .remove(session_id)
            .await
            .context("Failed to remove session")?;

        Ok(())
    }

    /// Validate a session token and return the associated user
    ///
    /// Returns `None` for unknown or expired tokens; expired entries the
    /// store hasn't evicted yet are removed on sight.
    pub async fn validate_session(&self, token: &str) -> Result<Option<User>, UserServiceError> {
        let session = match self
            .sessions
            .get(token)
            .await
            .context("Failed to get session")?
        {
            Some(s) => s,
            None => return Ok(None),
        };

        if session.is_expired() {
            let _ = self.sessions.remove(token).await;
            return Ok(None);
        }

        let user = self
            .user_repo
            .get_by_id(session.user_id)
            .await
            .context("Failed to get user")?;

        Ok(user)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>, UserServiceError> {
        let user = self
            .user_repo
            .get_by_id(id)
            .await
            .context("Failed to get user by ID")?;

        Ok(user)
    }

    /// List all users
    pub async fn list_users(&self) -> Result<Vec<User>, UserServiceError> {
        let users = self
            .user_repo
            .list()
            .await
            .context("Failed to list users")?;

        Ok(users)
    }

    // ========================================================================
    // Private helper methods
    // ========================================================================

    fn validate_signup_input(&self, input: &SignupInput) -> Result<(), UserServiceError> {
        if input.username.trim().is_empty() {
            return Err(UserServiceError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }

        if input.email.trim().is_empty() {
            return Err(UserServiceError::ValidationError(
                "Email cannot be empty".to_string(),
            ));
        }

        if input.password.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Password cannot be empty".to_string(),
            ));
        }

        // Basic email format validation
        if !input.email.contains('@') {
            return Err(UserServiceError::ValidationError(
                "Invalid email format".to_string(),
            ));
        }

        Ok(())
    }

    async fn find_user_by_username_or_email(
        &self,
        username_or_email: &str,
    ) -> Result<Option<User>, UserServiceError> {
        if let Some(user) = self
            .user_repo
            .get_by_username(username_or_email)
            .await
            .context("Failed to get user by username")?
        {
            return Ok(Some(user));
        }

        let user = self
            .user_repo
            .get_by_email(username_or_email)
            .await
            .context("Failed to get user by email")?;

        Ok(user)
    }

    async fn create_session(&self, user_id: i64) -> Result<Session, UserServiceError> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id,
            expires_at: now + Duration::minutes(self.session_ttl_minutes),
            created_at: now,
        };

        self.sessions
            .insert(&session)
            .await
            .context("Failed to store session")?;

        Ok(session)
    }
}

/// Input for user login
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username_or_email: String,
    pub password: String,
}

impl LoginInput {
    /// Create a new login input
    pub fn new(username_or_email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username_or_email: username_or_email.into(),
            password: password.into(),
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
