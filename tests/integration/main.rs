//! Integration test suite.
//!
//! These tests exercise the full HTTP stack against a real PostgreSQL
//! database (configured in `config/test.toml`) and are ignored by
//! default. Run them with:
//!
//! ```sh
//! cargo test --test integration -- --ignored --test-threads=1
//! ```

mod helpers;

mod analytics_test;
mod audit_test;
mod auth_test;
mod expense_test;
