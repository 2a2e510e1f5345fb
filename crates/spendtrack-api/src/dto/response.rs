//! Response DTOs shared across handlers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use spendtrack_entity::user::{User, UserRole};

/// Standard success envelope wrapping a payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true` for success responses.
    pub success: bool,
    /// The response payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Public view of a user account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Assigned role.
    pub role: UserRole,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Payload returned on successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The authenticated user.
    pub user: UserResponse,
    /// Signed bearer token.
    pub token: String,
    /// Token expiration time.
    pub expires_at: DateTime<Utc>,
}

/// Simple message payload for operations with no other result.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status, `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Whether the database responded to a ping.
    pub database: bool,
}
