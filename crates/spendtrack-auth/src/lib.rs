//! # spendtrack-auth
//!
//! Authentication and authorization building blocks for SpendTrack.
//!
//! ## Modules
//!
//! - `jwt` — JWT token creation and validation
//! - `password` — Argon2id password hashing
//! - `rbac` — Role-based access control policies and row-level ownership

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use rbac::{RbacEnforcer, RbacPolicies, SystemPermission};
