//! User management use cases.

pub mod admin;
pub mod bootstrap;

pub use admin::AdminUserService;
pub use bootstrap::ensure_bootstrap_admin;
