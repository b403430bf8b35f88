// ABOUTME: Approval module - terminal decisions and the roles they judge.
// ABOUTME: Pure data; resolution lives in the layer modules.

mod approval;
mod role;

pub use approval::*;
pub use role::*;
