// ABOUTME: Defines the Privilege alias and its resolve, check, require and is
// ABOUTME: entry points. An empty resolution denies with the role's cause.

use std::sync::Arc;

use crate::approval::{Approval, Role};
use crate::error::{AccessError, RuleError};
use crate::rule::{Layer, Rule};

/// A rule resolving a role into approvals: does the ambient policy accept it?
pub type Privilege<R> = Rule<Approval<<R as Role>::Error>, Arc<R>>;

/// Resolve `privilege` for `role` into its flat list of approvals.
pub async fn resolve_privilege<R: Role>(
    privilege: &Privilege<R>,
    role: Arc<R>,
) -> Result<Vec<Approval<R::Error>>, RuleError> {
    privilege.resolve(Layer::Privilege, role).await
}

/// Check `privilege` for `role`.
///
/// Returns the first denial if any, otherwise the first approval. If nothing
/// responded, the result is a denial carrying `role.error()`.
pub async fn check_privilege<R: Role>(
    privilege: &Privilege<R>,
    role: Arc<R>,
) -> Result<Approval<R::Error>, RuleError> {
    let approvals = resolve_privilege(privilege, role.clone()).await?;
    let approval = Approval::settle(approvals, || Approval::deny_because(role.error()));

    tracing::debug!(layer = %Layer::Privilege, granted = approval.value, "privilege checked");
    Ok(approval)
}

/// Check `privilege` for `role`, returning the role unchanged on grant.
pub async fn require_privilege<R: Role>(
    privilege: &Privilege<R>,
    role: Arc<R>,
) -> Result<Arc<R>, AccessError<R::Error>> {
    let approval = check_privilege(privilege, role.clone()).await?;
    if approval.is_denied() {
        return Err(AccessError::Denied(approval.error));
    }
    Ok(role)
}

/// Returns true if `privilege` grants `role`.
pub async fn is_privileged<R: Role>(
    privilege: &Privilege<R>,
    role: Arc<R>,
) -> Result<bool, RuleError> {
    Ok(check_privilege(privilege, role).await?.value)
}
