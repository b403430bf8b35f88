// ABOUTME: Root module for warden - composable authorization rules.
// ABOUTME: Privileges judge roles, permits produce roles, permissions decide.

pub mod approval;
pub mod error;
pub mod permission;
pub mod permit;
pub mod prelude;
pub mod privilege;
pub mod rule;

pub use error::{AccessError, RuleError};
