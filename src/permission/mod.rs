// ABOUTME: Permission module - top-level rules deciding access to a target
// ABOUTME: under an ambient privilege. Bridges to permits through `create`.

mod combinators;
mod permission;

pub use permission::*;
