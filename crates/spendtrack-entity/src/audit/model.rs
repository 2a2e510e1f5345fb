//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::action::AuditAction;

/// An immutable audit log entry recording a user action.
///
/// Entries are append-only. No update or delete path exists; rows
/// disappear only when the owning user is deleted (FK cascade).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: Uuid,
    /// The user who performed the action.
    pub actor_id: Uuid,
    /// The kind of action that was performed.
    pub action: AuditAction,
    /// Human-readable description of the action.
    pub description: String,
    /// When the action occurred (server-assigned).
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    /// The user who performed the action.
    pub actor_id: Uuid,
    /// The action performed.
    pub action: AuditAction,
    /// Human-readable description.
    pub description: String,
}
