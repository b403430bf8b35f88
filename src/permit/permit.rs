// ABOUTME: Defines the Permit alias, its entry points, and the map combinator.
// ABOUTME: A permit resolves a target into roles; the privilege judges each.

use std::future::Future;
use std::sync::Arc;

use crate::approval::{Approval, Role};
use crate::error::{AccessError, RuleError};
use crate::privilege::{Privilege, resolve_privilege};
use crate::rule::{Layer, Rule};

/// A rule resolving a target into the roles it requires.
pub type Permit<T, R> = Rule<Arc<R>, T>;

/// Resolve `permit` for `target` into its flat list of roles.
pub async fn resolve_permit<T, R>(permit: &Permit<T, R>, target: T) -> Result<Vec<Arc<R>>, RuleError>
where
    T: Clone + Send + Sync + 'static,
    R: Role,
{
    permit.resolve(Layer::Permit, target).await
}

/// Check `permit` for `target` under `privilege`.
///
/// Roles are judged in order and the first denial is returned. A target with
/// no roles is denied without cause. A role the privilege does not answer
/// for is denied with the role's own cause.
pub async fn check_permit<T, R>(
    permit: &Permit<T, R>,
    privilege: &Privilege<R>,
    target: T,
) -> Result<Approval<R::Error>, RuleError>
where
    T: Clone + Send + Sync + 'static,
    R: Role,
{
    let roles = resolve_permit(permit, target).await?;
    let approval = judge_roles(roles, privilege).await?;

    tracing::debug!(layer = %Layer::Permit, granted = approval.value, "permit checked");
    Ok(approval)
}

async fn judge_roles<R: Role>(
    roles: Vec<Arc<R>>,
    privilege: &Privilege<R>,
) -> Result<Approval<R::Error>, RuleError> {
    if roles.is_empty() {
        return Ok(Approval::deny());
    }

    for role in roles {
        let approvals = resolve_privilege(privilege, role.clone()).await?;

        if approvals.is_empty() {
            return Ok(Approval::deny_because(role.error()));
        }
        if let Some(denial) = approvals.into_iter().find(Approval::is_denied) {
            return Ok(denial);
        }
    }
    Ok(Approval::grant())
}

/// Check `permit` for `target`, returning the target on grant.
pub async fn require_permit<T, R>(
    permit: &Permit<T, R>,
    privilege: &Privilege<R>,
    target: T,
) -> Result<T, AccessError<R::Error>>
where
    T: Clone + Send + Sync + 'static,
    R: Role,
{
    let approval = check_permit(permit, privilege, target.clone()).await?;
    if approval.is_denied() {
        return Err(AccessError::Denied(approval.error));
    }
    Ok(target)
}

/// Returns true if `privilege` is permitted `permit` for `target`.
pub async fn is_permitted<T, R>(
    permit: &Permit<T, R>,
    privilege: &Privilege<R>,
    target: T,
) -> Result<bool, RuleError>
where
    T: Clone + Send + Sync + 'static,
    R: Role,
{
    Ok(check_permit(permit, privilege, target).await?.value)
}

impl<T, R> Rule<Arc<R>, T>
where
    T: Clone + Send + Sync + 'static,
    R: Role,
{
    /// A permit for targets of type `T`, built from a permit for `U` and a
    /// `mapper` converting one target into the other. A failing mapper is a
    /// fault, not a denial.
    pub fn map<U, F, Fut>(permit: Permit<U, R>, mapper: F) -> Self
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<U, RuleError>> + Send + 'static,
    {
        let permit = Arc::new(permit);

        Rule::from_async_fn(move |target: T| {
            let permit = Arc::clone(&permit);
            let mapped = mapper(target);
            async move {
                let roles = resolve_permit(&*permit, mapped.await?).await?;
                Ok(Rule::sequence(roles.into_iter().map(Rule::terminal)))
            }
        })
    }
}
