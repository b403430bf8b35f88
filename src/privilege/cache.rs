// ABOUTME: Identity-keyed memo backing the cached privilege combinator.
// ABOUTME: Keys are Arc addresses; entries pin their Arc so addresses stay unique.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::approval::{Approval, Role};

/// Memoized approvals keyed by role identity, not role value.
///
/// No eviction and no expiry. Concurrent misses for the same role both
/// compute; the later insert wins.
pub(crate) struct IdentityMemo<R: Role> {
    entries: Mutex<HashMap<usize, (Arc<R>, Approval<R::Error>)>>,
}

impl<R: Role> IdentityMemo<R> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn key(role: &Arc<R>) -> usize {
        Arc::as_ptr(role) as *const () as usize
    }

    pub(crate) async fn get(&self, role: &Arc<R>) -> Option<Approval<R::Error>> {
        let entries = self.entries.lock().await;
        entries
            .get(&Self::key(role))
            .map(|(_, approval)| approval.clone())
    }

    pub(crate) async fn insert(&self, role: Arc<R>, approval: Approval<R::Error>) {
        let mut entries = self.entries.lock().await;
        entries.insert(Self::key(&role), (role, approval));
    }
}
