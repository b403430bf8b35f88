// ABOUTME: Permit module - rules producing the roles a target requires.
// ABOUTME: Checks each role against the ambient privilege, first denial wins.

mod permit;

pub use permit::*;
