// ABOUTME: Rule module - the polymorphic rule value and its recursive resolver.
// ABOUTME: One engine, instantiated by the privilege, permit and permission layers.

mod resolve;
mod rule;

pub use resolve::*;
pub use rule::*;
