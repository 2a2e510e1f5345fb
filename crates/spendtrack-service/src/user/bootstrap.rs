//! Bootstrap administrator seeding.

use tracing::{info, warn};

use spendtrack_auth::password::PasswordHasher;
use spendtrack_core::config::auth::BootstrapAdminConfig;
use spendtrack_core::error::AppError;
use spendtrack_database::repositories::user::UserRepository;
use spendtrack_entity::user::model::CreateUser;
use spendtrack_entity::user::UserRole;

/// Create the configured bootstrap admin if it does not exist yet.
///
/// Runs once at startup, after migrations. The seed cannot live in a SQL
/// migration because the Argon2id hash is salted per installation.
pub async fn ensure_bootstrap_admin(
    user_repo: &UserRepository,
    hasher: &PasswordHasher,
    config: Option<&BootstrapAdminConfig>,
) -> Result<(), AppError> {
    let Some(config) = config else {
        if user_repo.count().await? == 0 {
            warn!("No users exist and no bootstrap admin is configured");
        }
        return Ok(());
    };

    if user_repo.find_by_email(&config.email).await?.is_some() {
        return Ok(());
    }

    let password_hash = hasher.hash_password(&config.password)?;
    let user = user_repo
        .create(&CreateUser {
            email: config.email.clone(),
            password_hash,
            display_name: config.display_name.clone(),
            role: UserRole::Admin,
        })
        .await?;

    info!(user_id = %user.id, email = %user.email, "Bootstrap admin created");
    Ok(())
}
