// ABOUTME: Defines the Permission alias, the context it is resolved with, and
// ABOUTME: its resolve, check, require and is entry points.

use std::sync::Arc;

use crate::approval::{Approval, Role};
use crate::error::{AccessError, RuleError};
use crate::privilege::Privilege;
use crate::rule::{Layer, Rule};

/// What a permission is resolved against: the ambient privilege and the
/// target being accessed.
pub struct PermissionContext<R: Role, T> {
    pub privilege: Arc<Privilege<R>>,
    pub target: T,
}

impl<R: Role, T: Clone> Clone for PermissionContext<R, T> {
    fn clone(&self) -> Self {
        Self {
            privilege: Arc::clone(&self.privilege),
            target: self.target.clone(),
        }
    }
}

/// A rule resolving a target, under a privilege, into approvals.
pub type Permission<T, R> = Rule<Approval<<R as Role>::Error>, PermissionContext<R, T>>;

/// Resolve `permission` for `target` under `privilege`.
pub async fn resolve_permission<T, R>(
    permission: &Permission<T, R>,
    privilege: &Privilege<R>,
    target: T,
) -> Result<Vec<Approval<R::Error>>, RuleError>
where
    T: Clone + Send + Sync + 'static,
    R: Role,
{
    let ctx = PermissionContext {
        privilege: Arc::new(privilege.clone()),
        target,
    };
    permission.resolve(Layer::Permission, ctx).await
}

/// Check `permission` for `target` under `privilege`.
///
/// Returns the first denial if any, otherwise the first approval. If nothing
/// responded, the result is a denial without cause.
pub async fn check_permission<T, R>(
    permission: &Permission<T, R>,
    privilege: &Privilege<R>,
    target: T,
) -> Result<Approval<R::Error>, RuleError>
where
    T: Clone + Send + Sync + 'static,
    R: Role,
{
    let approvals = resolve_permission(permission, privilege, target).await?;
    let approval = Approval::settle(approvals, Approval::deny);

    tracing::debug!(layer = %Layer::Permission, granted = approval.value, "permission checked");
    Ok(approval)
}

/// Check `permission`, returning the target on grant.
pub async fn require_permission<T, R>(
    permission: &Permission<T, R>,
    privilege: &Privilege<R>,
    target: T,
) -> Result<T, AccessError<R::Error>>
where
    T: Clone + Send + Sync + 'static,
    R: Role,
{
    let approval = check_permission(permission, privilege, target.clone()).await?;
    if approval.is_denied() {
        return Err(AccessError::Denied(approval.error));
    }
    Ok(target)
}

/// Returns true if `privilege` holds `permission` for `target`.
pub async fn is_permissioned<T, R>(
    permission: &Permission<T, R>,
    privilege: &Privilege<R>,
    target: T,
) -> Result<bool, RuleError>
where
    T: Clone + Send + Sync + 'static,
    R: Role,
{
    Ok(check_permission(permission, privilege, target).await?.value)
}
