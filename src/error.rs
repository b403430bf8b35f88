// ABOUTME: Defines the error types for rule resolution using thiserror.
// ABOUTME: Faults (RuleError) are kept apart from policy denials (AccessError).

use std::sync::Arc;

use crate::rule::Layer;

/// A fault raised while resolving a rule.
///
/// Faults are never policy outcomes. They propagate unmodified through every
/// resolution frame and every combinator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuleError {
    #[error("Invalid {layer} rule type: {found}")]
    InvalidRuleType { layer: Layer, found: String },

    #[error("Rule computation failed: {0}")]
    Failed(Arc<anyhow::Error>),
}

impl RuleError {
    /// Wrap the failure of a caller-supplied computation.
    pub fn failed(error: impl Into<anyhow::Error>) -> Self {
        Self::Failed(Arc::new(error.into()))
    }
}

impl From<anyhow::Error> for RuleError {
    fn from(error: anyhow::Error) -> Self {
        Self::Failed(Arc::new(error))
    }
}

/// Error returned by the `require_*` entry points.
#[derive(Debug, thiserror::Error)]
pub enum AccessError<E: std::fmt::Debug> {
    /// The rule denied access. Carries the denying approval's cause verbatim.
    #[error("Access denied: {0:?}")]
    Denied(Option<E>),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

impl<E: std::fmt::Debug> AccessError<E> {
    /// The denial cause, if this is a denial that carried one.
    pub fn cause(&self) -> Option<&E> {
        match self {
            Self::Denied(cause) => cause.as_ref(),
            Self::Rule(_) => None,
        }
    }

    /// Returns true if this error is a policy denial rather than a fault.
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }
}
