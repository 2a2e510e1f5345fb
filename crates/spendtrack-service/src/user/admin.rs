//! Admin user management — CRUD, role changes, password resets.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use spendtrack_auth::password::PasswordHasher;
use spendtrack_auth::rbac::RbacEnforcer;
use spendtrack_auth::rbac::policies::SystemPermission;
use spendtrack_core::error::AppError;
use spendtrack_core::types::pagination::{PageRequest, PageResponse};
use spendtrack_database::repositories::user::UserRepository;
use spendtrack_entity::audit::AuditAction;
use spendtrack_entity::user::model::{CreateUser, UpdateUser};
use spendtrack_entity::user::{User, UserRole};

use crate::audit::AuditService;
use crate::context::RequestContext;

/// Request to create a new user.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateUserData {
    /// Login email (unique).
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Display name.
    pub display_name: String,
    /// Role assignment.
    pub role: UserRole,
}

/// Request to update a user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateUserData {
    /// New login email.
    pub email: Option<String>,
    /// New display name.
    pub display_name: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New password (plaintext, hashed here).
    pub password: Option<String>,
}

/// Handles administrative user management operations.
#[derive(Clone)]
pub struct AdminUserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
    /// Audit recorder.
    audit: Arc<AuditService>,
    /// Minimum password length from configuration.
    password_min_length: usize,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        rbac: Arc<RbacEnforcer>,
        audit: Arc<AuditService>,
        password_min_length: usize,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            rbac,
            audit,
            password_min_length,
        }
    }

    /// Lists all users with pagination.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserRead)?;

        self.user_repo.find_all(&page).await
    }

    /// Gets a single user by ID.
    pub async fn get_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserRead)?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates a new user.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        data: CreateUserData,
    ) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserCreate)?;

        validate_email(&data.email)?;
        self.validate_password(&data.password)?;

        if self.user_repo.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::conflict("Email is already in use"));
        }

        let password_hash = self.hasher.hash_password(&data.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                email: data.email,
                password_hash,
                display_name: data.display_name,
                role: data.role,
            })
            .await?;

        self.audit
            .record(
                ctx.user_id,
                AuditAction::UserCreated,
                format!("Created user {} ({})", user.email, user.role),
            )
            .await;

        info!(
            admin_id = %ctx.user_id,
            new_user_id = %user.id,
            email = %user.email,
            role = %user.role,
            "User created by admin"
        );

        Ok(user)
    }

    /// Updates a user's profile fields, role, or password.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        data: UpdateUserData,
    ) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserUpdate)?;

        // Existence check gives a clean 404 before any validation noise.
        self.get_user(ctx, user_id).await?;

        if let Some(ref email) = data.email {
            validate_email(email)?;
            if let Some(existing) = self.user_repo.find_by_email(email).await? {
                if existing.id != user_id {
                    return Err(AppError::conflict("Email is already in use"));
                }
            }
        }

        let password_hash = match data.password {
            Some(ref password) => {
                self.validate_password(password)?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        let user = self
            .user_repo
            .update(
                user_id,
                &UpdateUser {
                    email: data.email,
                    display_name: data.display_name,
                    role: data.role,
                    password_hash,
                },
            )
            .await?;

        self.audit
            .record(
                ctx.user_id,
                AuditAction::UserUpdated,
                format!("Updated user {}", user.email),
            )
            .await;

        info!(admin_id = %ctx.user_id, target_id = %user_id, "User updated by admin");

        Ok(user)
    }

    /// Deletes a user. Expenses and audit entries cascade with the row.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserDelete)?;

        if user_id == ctx.user_id {
            return Err(AppError::forbidden("Cannot delete your own account"));
        }

        let user = self.get_user(ctx, user_id).await?;

        self.user_repo.delete(user_id).await?;

        self.audit
            .record(
                ctx.user_id,
                AuditAction::UserDeleted,
                format!("Deleted user {}", user.email),
            )
            .await;

        info!(
            admin_id = %ctx.user_id,
            target_id = %user_id,
            "User deleted"
        );

        Ok(())
    }

    fn validate_password(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }
        Ok(())
    }
}

/// Minimal shape check for login emails.
fn validate_email(email: &str) -> Result<(), AppError> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') || trimmed.len() > 254 {
        return Err(AppError::validation("Invalid email address"));
    }
    Ok(())
}
