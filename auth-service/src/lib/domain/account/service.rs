use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::OneTimeToken;
use auth::SessionClaims;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Credentials;
use crate::account::models::LoginOutcome;
use crate::account::models::OneTimeTokenRecord;
use crate::account::models::RegisterCommand;
use crate::account::models::TokenKind;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::ports::AccountServicePort;
use crate::account::ports::AccountStore;
use crate::account::ports::Mailer;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<S, M>
where
    S: AccountStore,
    M: Mailer,
{
    store: Arc<S>,
    mailer: Arc<M>,
    authenticator: Arc<Authenticator>,
    session_ttl_hours: i64,
    verification_ttl: Duration,
    reset_ttl: Duration,
}

impl<S, M> AccountService<S, M>
where
    S: AccountStore,
    M: Mailer,
{
    /// Create the account service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Account persistence implementation
    /// * `mailer` - Notification dispatch implementation
    /// * `authenticator` - Password hashing and session token issuance
    /// * `session_ttl_hours` - Session token lifetime
    /// * `verification_ttl` - Email verification token lifetime
    /// * `reset_ttl` - Password reset token lifetime
    pub fn new(
        store: Arc<S>,
        mailer: Arc<M>,
        authenticator: Arc<Authenticator>,
        session_ttl_hours: i64,
        verification_ttl: Duration,
        reset_ttl: Duration,
    ) -> Self {
        Self {
            store,
            mailer,
            authenticator,
            session_ttl_hours,
            verification_ttl,
            reset_ttl,
        }
    }

    /// Store a fresh single-use token for `user_id` and hand it to the
    /// dispatch closure. Dispatch failure is logged and swallowed; the token
    /// stays valid and the caller's operation has already committed.
    async fn issue_token(
        &self,
        user_id: UserId,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, AccountError> {
        let token = OneTimeToken::generate().into_string();

        self.store
            .insert_token(OneTimeTokenRecord {
                token: token.clone(),
                user_id,
                kind,
                expires_at: Utc::now() + ttl,
            })
            .await?;

        Ok(token)
    }
}

#[async_trait]
impl<S, M> AccountServicePort for AccountService<S, M>
where
    S: AccountStore,
    M: Mailer,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, AccountError> {
        // The schema only checks the confirmation for presence; equality is
        // this flow's job, before anything touches the store.
        if command.password != command.confirm_password {
            return Err(AccountError::PasswordMismatch);
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| AccountError::Password(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            lastname: command.lastname,
            email: command.email,
            password_hash,
            role: command.role,
            avatar: command.avatar,
            verified: false,
            created_at: Utc::now(),
        };

        let created = self.store.create_user(user).await?;

        let token = self
            .issue_token(created.id, TokenKind::Verification, self.verification_ttl)
            .await?;

        if let Err(e) = self
            .mailer
            .send_verification(created.email.as_str(), &token)
            .await
        {
            tracing::error!(
                user_id = %created.id,
                "Failed to dispatch verification email: {}",
                e
            );
        }

        Ok(created)
    }

    async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, AccountError> {
        // Unknown email and wrong password take the same exit so the two
        // cases are indistinguishable to the caller.
        let user = self
            .store
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let claims = SessionClaims::new(
            user.id,
            user.name.clone(),
            user.role.as_str(),
            self.session_ttl_hours,
        );

        let session = self
            .authenticator
            .authenticate(&credentials.password, &user.password_hash, claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                AuthenticationError::Password(err) => AccountError::Password(err.to_string()),
                AuthenticationError::Jwt(err) => AccountError::SessionToken(err.to_string()),
            })?;

        if !user.verified {
            return Err(AccountError::AccountUnverified);
        }

        Ok(LoginOutcome {
            access_token: session.access_token,
            user,
        })
    }

    async fn verify_email(&self, token: &str) -> Result<(), AccountError> {
        let user_id = self
            .store
            .consume_token(token, TokenKind::Verification)
            .await?
            .ok_or(AccountError::InvalidOrExpiredToken)?;

        self.store.mark_verified(&user_id).await?;

        tracing::info!(user_id = %user_id, "Email verified");
        Ok(())
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AccountError> {
        // Outwardly identical whether or not the email exists.
        let Some(user) = self.store.find_by_email(email).await? else {
            return Ok(());
        };

        let token = self
            .issue_token(user.id, TokenKind::Reset, self.reset_ttl)
            .await?;

        if let Err(e) = self
            .mailer
            .send_password_reset(user.email.as_str(), &token)
            .await
        {
            tracing::error!(
                user_id = %user.id,
                "Failed to dispatch password reset email: {}",
                e
            );
        }

        Ok(())
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AccountError> {
        let user_id = self
            .store
            .consume_token(token, TokenKind::Reset)
            .await?
            .ok_or(AccountError::InvalidOrExpiredToken)?;

        let password_hash = self
            .authenticator
            .hash_password(new_password)
            .map_err(|e| AccountError::Password(e.to_string()))?;

        self.store
            .update_password_hash(&user_id, &password_hash)
            .await?;

        tracing::info!(user_id = %user_id, "Password reset completed");
        Ok(())
    }

    async fn logout(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountError> {
        self.store.revoke_session(session_id, expires_at).await
    }

    async fn is_session_revoked(&self, session_id: &str) -> Result<bool, AccountError> {
        self.store.is_session_revoked(session_id).await
    }
}
