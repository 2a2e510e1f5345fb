//! Row-level ownership predicates.
//!
//! Route-level RBAC decides whether a role may hit an endpoint at all;
//! these predicates decide whether a specific row may be touched.
//! Services evaluate them after loading the row, before acting on it.

use uuid::Uuid;

use spendtrack_entity::user::UserRole;

/// Checks whether `actor` may operate on a resource owned by `owner_id`.
///
/// Admins bypass ownership; everyone else must own the row.
pub fn can_access_owned(actor_id: Uuid, actor_role: UserRole, owner_id: Uuid) -> bool {
    actor_role.is_admin() || actor_id == owner_id
}
