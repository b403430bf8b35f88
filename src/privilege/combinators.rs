// ABOUTME: Privilege combinators - every, some and cached.
// ABOUTME: every/some run sequentially and stop at the first deciding result.

use std::sync::Arc;

use super::cache::IdentityMemo;
use super::{Privilege, check_privilege};
use crate::approval::{Approval, Role};
use crate::rule::{Layer, Rule};

impl<R: Role> Rule<Approval<R::Error>, Arc<R>> {
    /// A privilege granting only if every one of `privileges` grants.
    ///
    /// Sub-privileges are evaluated one at a time; later ones are skipped
    /// once a denial is found. No privileges means grant. A sub-privilege
    /// that resolves to nothing denies with the role's cause.
    pub fn every(privileges: impl IntoIterator<Item = Privilege<R>>) -> Self {
        let privileges: Arc<[Privilege<R>]> = privileges.into_iter().collect();

        Rule::from_async_fn(move |role: Arc<R>| {
            let privileges = Arc::clone(&privileges);
            async move {
                for privilege in privileges.iter() {
                    let approvals = privilege.resolve(Layer::Privilege, role.clone()).await?;

                    if approvals.is_empty() {
                        return Ok(Rule::terminal(Approval::deny_because(role.error())));
                    }
                    if let Some(denial) = approvals.into_iter().find(Approval::is_denied) {
                        return Ok(Rule::terminal(denial));
                    }
                }
                Ok(Rule::terminal(Approval::grant()))
            }
        })
    }

    /// A privilege granting on the first grant produced by any of
    /// `privileges`, evaluated one at a time. No grant means a denial
    /// carrying the role's cause.
    pub fn some(privileges: impl IntoIterator<Item = Privilege<R>>) -> Self {
        let privileges: Arc<[Privilege<R>]> = privileges.into_iter().collect();

        Rule::from_async_fn(move |role: Arc<R>| {
            let privileges = Arc::clone(&privileges);
            async move {
                for privilege in privileges.iter() {
                    let approvals = privilege.resolve(Layer::Privilege, role.clone()).await?;

                    if let Some(grant) = approvals.into_iter().find(Approval::is_granted) {
                        return Ok(Rule::terminal(grant));
                    }
                }
                Ok(Rule::terminal(Approval::deny_because(role.error())))
            }
        })
    }

    /// A privilege remembering the checked approval per role instance.
    ///
    /// Two roles are the same entry only if they are the same `Arc`
    /// allocation; equal values in different allocations are checked anew.
    pub fn cached(privilege: Privilege<R>) -> Self {
        let privilege = Arc::new(privilege);
        let memo = Arc::new(IdentityMemo::<R>::new());

        Rule::from_async_fn(move |role: Arc<R>| {
            let privilege = Arc::clone(&privilege);
            let memo = Arc::clone(&memo);
            async move {
                if let Some(approval) = memo.get(&role).await {
                    tracing::trace!("cached privilege hit");
                    return Ok(Rule::terminal(approval));
                }

                let approval = check_privilege(&*privilege, role.clone()).await?;
                memo.insert(role, approval.clone()).await;
                Ok(Rule::terminal(approval))
            }
        })
    }
}
