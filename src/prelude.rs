// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use warden::prelude::*;` to get started quickly.

pub use crate::approval::{Approval, Role};
pub use crate::error::{AccessError, RuleError};
pub use crate::permission::{
    Permission, PermissionContext, check_permission, is_permissioned, require_permission,
    resolve_permission,
};
pub use crate::permit::{Permit, check_permit, is_permitted, require_permit, resolve_permit};
pub use crate::privilege::{
    Privilege, check_privilege, is_privileged, require_privilege, resolve_privilege,
};
pub use crate::rule::{Layer, Rule};
