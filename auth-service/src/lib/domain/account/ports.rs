use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::errors::MailerError;
use crate::account::models::Credentials;
use crate::account::models::LoginOutcome;
use crate::account::models::OneTimeTokenRecord;
use crate::account::models::RegisterCommand;
use crate::account::models::TokenKind;
use crate::account::models::User;
use crate::account::models::UserId;

/// Port for the account domain service.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account in the unverified state.
    ///
    /// Generates a verification token and dispatches it through the mailer
    /// port; dispatch failures are logged, not surfaced.
    ///
    /// # Errors
    /// * `PasswordMismatch` - password and confirmation differ
    /// * `DuplicateEmail` - email is already registered
    /// * `DatabaseError` - persistence failed
    async fn register(&self, command: RegisterCommand) -> Result<User, AccountError>;

    /// Authenticate credentials and open a session.
    ///
    /// Unknown email and wrong password both fail with `InvalidCredentials`
    /// so callers cannot enumerate accounts.
    ///
    /// # Errors
    /// * `InvalidCredentials` - no such user or wrong password
    /// * `AccountUnverified` - credentials valid but email never verified
    /// * `DatabaseError` - persistence failed
    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, AccountError>;

    /// Consume a verification token and mark its user verified.
    ///
    /// # Errors
    /// * `InvalidOrExpiredToken` - token unknown, expired, or already used
    /// * `DatabaseError` - persistence failed
    async fn verify_email(&self, token: &str) -> Result<(), AccountError>;

    /// Issue a password reset token if the email belongs to an account.
    ///
    /// Always succeeds outwardly; the outcome is identical whether or not
    /// the email exists.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn request_password_reset(&self, email: &str) -> Result<(), AccountError>;

    /// Consume a reset token and store a new password hash.
    ///
    /// # Errors
    /// * `InvalidOrExpiredToken` - token unknown, expired, or already used
    /// * `DatabaseError` - persistence failed
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AccountError>;

    /// Revoke a session so the guard rejects it until its natural expiry.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn logout(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountError>;

    /// Check whether a session has been revoked by logout.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn is_session_revoked(&self, session_id: &str) -> Result<bool, AccountError>;
}

/// Persistence operations for accounts, single-use tokens, and revoked
/// sessions.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Email uniqueness is enforced atomically by the store.
    ///
    /// # Errors
    /// * `DuplicateEmail` - email is already registered
    /// * `DatabaseError` - persistence failed
    async fn create_user(&self, user: User) -> Result<User, AccountError>;

    /// Retrieve a user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError>;

    /// Mark a user's email as verified.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn mark_verified(&self, id: &UserId) -> Result<(), AccountError>;

    /// Replace a user's stored password hash.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), AccountError>;

    /// Store a fresh single-use token.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn insert_token(&self, record: OneTimeTokenRecord) -> Result<(), AccountError>;

    /// Atomically consume a single-use token.
    ///
    /// Returns the bound user only if the token exists, matches `kind`, is
    /// unexpired, and was never consumed before. Exactly one concurrent
    /// caller can win.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn consume_token(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> Result<Option<UserId>, AccountError>;

    /// Record a revoked session until `expires_at`.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn revoke_session(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountError>;

    /// Check whether a session id has been revoked.
    ///
    /// # Errors
    /// * `DatabaseError` - persistence failed
    async fn is_session_revoked(&self, session_id: &str) -> Result<bool, AccountError>;
}

/// Outbound notification dispatch.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send the email verification link for a fresh registration.
    async fn send_verification(&self, email: &str, token: &str) -> Result<(), MailerError>;

    /// Send the password reset link.
    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), MailerError>;
}
