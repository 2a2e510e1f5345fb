//! Login and logout.

use std::sync::Arc;

use tracing::info;

use spendtrack_auth::jwt::encoder::{IssuedToken, JwtEncoder};
use spendtrack_auth::password::PasswordHasher;
use spendtrack_core::error::AppError;
use spendtrack_database::repositories::user::UserRepository;
use spendtrack_entity::audit::AuditAction;
use spendtrack_entity::user::User;

use crate::audit::AuditService;
use crate::context::RequestContext;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// The issued bearer token.
    pub issued: IssuedToken,
}

/// Handles credential verification and token issuance.
#[derive(Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Audit recorder.
    audit: Arc<AuditService>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        audit: Arc<AuditService>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            audit,
        }
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// Unknown email and wrong password return the same error so the
    /// response cannot be used to enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(AppError::invalid_credentials)?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::invalid_credentials());
        }

        let issued = self
            .encoder
            .generate_token(user.id, &user.email, user.role)?;

        self.audit
            .record(
                user.id,
                AuditAction::Login,
                format!("User {} logged in", user.email),
            )
            .await;

        info!(user_id = %user.id, email = %user.email, "Login successful");

        Ok(LoginOutcome { user, issued })
    }

    /// Record a logout.
    ///
    /// Tokens are stateless and self-expiring; there is nothing to
    /// revoke server-side. The client is expected to discard the token.
    pub async fn logout(&self, ctx: &RequestContext) {
        self.audit
            .record(
                ctx.user_id,
                AuditAction::Logout,
                format!("User {} logged out", ctx.email),
            )
            .await;

        info!(user_id = %ctx.user_id, "Logout recorded");
    }

    /// Return the full profile of the authenticated user.
    pub async fn current_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
