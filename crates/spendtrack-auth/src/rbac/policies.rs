//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use spendtrack_entity::user::UserRole;

/// A system-level permission.
///
/// These cover route-level authorization; row-level ownership of
/// expenses is handled separately by the ownership predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemPermission {
    // Expenses
    /// Submit new expenses.
    ExpenseCreate,
    /// Read own expenses.
    ExpenseReadOwn,
    /// Read any user's expenses.
    ExpenseReadAll,
    /// Edit own expenses.
    ExpenseUpdateOwn,
    /// Edit any user's expenses.
    ExpenseUpdateAll,
    /// Approve or reject pending expenses.
    ExpenseDecide,
    /// Export expense data.
    ExpenseExport,

    // User management
    /// Create new users.
    UserCreate,
    /// Read user profiles.
    UserRead,
    /// Update user details (including role and password).
    UserUpdate,
    /// Delete users.
    UserDelete,

    // Analytics
    /// View spend summary over own data.
    AnalyticsViewOwn,
    /// View organisation-wide analytics.
    AnalyticsViewAll,

    // Audit
    /// Search the audit log.
    AuditView,
    /// Export audit logs.
    AuditExport,

    // System
    /// Access health/status endpoints.
    SystemHealth,
}

/// Defines the mapping from each role to its set of allowed system permissions.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    /// Role → set of permissions.
    policies: HashMap<UserRole, HashSet<SystemPermission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Employee: own expenses and own analytics only
        let employee: HashSet<SystemPermission> = [
            SystemPermission::ExpenseCreate,
            SystemPermission::ExpenseReadOwn,
            SystemPermission::ExpenseUpdateOwn,
            SystemPermission::AnalyticsViewOwn,
            SystemPermission::SystemHealth,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::Employee, employee);

        // Admin: everything
        let admin: HashSet<SystemPermission> = [
            SystemPermission::ExpenseCreate,
            SystemPermission::ExpenseReadOwn,
            SystemPermission::ExpenseReadAll,
            SystemPermission::ExpenseUpdateOwn,
            SystemPermission::ExpenseUpdateAll,
            SystemPermission::ExpenseDecide,
            SystemPermission::ExpenseExport,
            SystemPermission::UserCreate,
            SystemPermission::UserRead,
            SystemPermission::UserUpdate,
            SystemPermission::UserDelete,
            SystemPermission::AnalyticsViewOwn,
            SystemPermission::AnalyticsViewAll,
            SystemPermission::AuditView,
            SystemPermission::AuditExport,
            SystemPermission::SystemHealth,
        ]
        .into_iter()
        .collect();
        policies.insert(UserRole::Admin, admin);

        Self { policies }
    }

    /// Checks whether the given role has the specified permission.
    pub fn has_permission(&self, role: &UserRole, permission: &SystemPermission) -> bool {
        self.policies
            .get(role)
            .map(|perms| perms.contains(permission))
            .unwrap_or(false)
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
