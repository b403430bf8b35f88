// ABOUTME: Privilege module - rules judging a Role into Approvals.
// ABOUTME: Entry points plus the every, some and cached combinators.

mod cache;
mod combinators;
mod privilege;

pub use privilege::*;
