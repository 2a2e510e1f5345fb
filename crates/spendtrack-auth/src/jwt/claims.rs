//! JWT claims structure embedded in bearer tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use spendtrack_entity::user::UserRole;

/// JWT claims payload embedded in every bearer token.
///
/// The `role` claim is informational: authorization re-resolves the
/// current role from the database on every request, so a role change
/// takes effect before the token expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: Uuid,
    /// Login email for convenience.
    pub email: String,
    /// User role at the time of token issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}
