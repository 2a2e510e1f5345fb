//! Role-based access control.

pub mod enforcer;
pub mod ownership;
pub mod policies;

pub use enforcer::RbacEnforcer;
pub use ownership::can_access_owned;
pub use policies::{RbacPolicies, SystemPermission};
