// ABOUTME: Permission combinators - every, some, map and create.
// ABOUTME: create lifts a permit into a permission under the ambient privilege.

use std::future::Future;
use std::sync::Arc;

use super::{Permission, PermissionContext};
use crate::approval::{Approval, Role};
use crate::error::RuleError;
use crate::permit::{Permit, check_permit};
use crate::rule::{Layer, Rule};

impl<T, R> Rule<Approval<R::Error>, PermissionContext<R, T>>
where
    T: Clone + Send + Sync + 'static,
    R: Role,
{
    /// A permission granting only if every one of `permissions` grants.
    ///
    /// Evaluated one at a time, stopping at the first denial. No permissions
    /// means grant; a permission resolving to nothing denies without cause.
    pub fn every(permissions: impl IntoIterator<Item = Permission<T, R>>) -> Self {
        let permissions: Arc<[Permission<T, R>]> = permissions.into_iter().collect();

        Rule::from_async_fn(move |ctx: PermissionContext<R, T>| {
            let permissions = Arc::clone(&permissions);
            async move {
                for permission in permissions.iter() {
                    let approvals = permission.resolve(Layer::Permission, ctx.clone()).await?;

                    if approvals.is_empty() {
                        return Ok(Rule::terminal(Approval::deny()));
                    }
                    if let Some(denial) = approvals.into_iter().find(Approval::is_denied) {
                        return Ok(Rule::terminal(denial));
                    }
                }
                Ok(Rule::terminal(Approval::grant()))
            }
        })
    }

    /// A permission granting on the first grant produced by any of
    /// `permissions`, evaluated one at a time.
    pub fn some(permissions: impl IntoIterator<Item = Permission<T, R>>) -> Self {
        let permissions: Arc<[Permission<T, R>]> = permissions.into_iter().collect();

        Rule::from_async_fn(move |ctx: PermissionContext<R, T>| {
            let permissions = Arc::clone(&permissions);
            async move {
                for permission in permissions.iter() {
                    let approvals = permission.resolve(Layer::Permission, ctx.clone()).await?;

                    if let Some(grant) = approvals.into_iter().find(Approval::is_granted) {
                        return Ok(Rule::terminal(grant));
                    }
                }
                Ok(Rule::terminal(Approval::deny()))
            }
        })
    }

    /// A permission for targets of type `T`, built from a permission for `U`
    /// and a `mapper` converting one target into the other.
    pub fn map<U, F, Fut>(permission: Permission<U, R>, mapper: F) -> Self
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<U, RuleError>> + Send + 'static,
    {
        let permission = Arc::new(permission);

        Rule::from_async_fn(move |ctx: PermissionContext<R, T>| {
            let permission = Arc::clone(&permission);
            let privilege = ctx.privilege;
            let mapped = mapper(ctx.target);
            async move {
                let inner = PermissionContext {
                    privilege,
                    target: mapped.await?,
                };
                let approvals = permission.resolve(Layer::Permission, inner).await?;
                Ok(Rule::sequence(approvals.into_iter().map(Rule::terminal)))
            }
        })
    }

    /// A permission that checks `permit` against the ambient privilege.
    pub fn create(permit: Permit<T, R>) -> Self {
        let permit = Arc::new(permit);

        Rule::from_async_fn(move |ctx: PermissionContext<R, T>| {
            let permit = Arc::clone(&permit);
            async move {
                let approval = check_permit(&*permit, &*ctx.privilege, ctx.target).await?;
                Ok(Rule::terminal(approval))
            }
        })
    }
}
