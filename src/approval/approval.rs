// ABOUTME: Defines the Approval type - a terminal grant or denial with an
// ABOUTME: optional opaque cause, plus the shared first-denial aggregation.

use serde::{Deserialize, Serialize};

/// The outcome of evaluating a rule.
///
/// `value` is true for a grant and false for a denial. `error` carries the
/// caller-defined cause and is only meaningful on denial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval<E = serde_json::Value> {
    /// True if access is granted.
    pub value: bool,

    /// The cause of a denial.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<E>,
}

impl<E> Approval<E> {
    /// Create a grant.
    pub fn grant() -> Self {
        Self {
            value: true,
            error: None,
        }
    }

    /// Create a denial without a cause.
    pub fn deny() -> Self {
        Self {
            value: false,
            error: None,
        }
    }

    /// Create a denial carrying `error` as its cause.
    pub fn deny_with(error: E) -> Self {
        Self {
            value: false,
            error: Some(error),
        }
    }

    /// Create a denial with an optional cause.
    pub fn deny_because(error: Option<E>) -> Self {
        Self {
            value: false,
            error,
        }
    }

    /// Returns true if this approval grants access.
    pub fn is_granted(&self) -> bool {
        self.value
    }

    /// Returns true if this approval denies access.
    pub fn is_denied(&self) -> bool {
        !self.value
    }

    /// Reduce resolved approvals to one: the first denial if any, otherwise
    /// the first approval. An empty list yields `on_empty()`.
    pub(crate) fn settle(approvals: Vec<Self>, on_empty: impl FnOnce() -> Self) -> Self {
        let mut approvals = approvals.into_iter();
        let Some(first) = approvals.next() else {
            return on_empty();
        };
        if first.is_denied() {
            return first;
        }
        approvals.find(Self::is_denied).unwrap_or(first)
    }
}
