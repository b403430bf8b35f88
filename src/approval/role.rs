// ABOUTME: Defines the Role trait - the subject a privilege is checked against.
// ABOUTME: Roles carry an optional cause used when nothing answers for them.

use std::fmt::Debug;

/// A subject of evaluation at the privilege layer.
///
/// Implementors extend this with whatever capability fields their domain
/// needs. Roles are handled as `Arc<R>`; the engine never mutates them.
/// Roles only need to be deserializable when rules producing them are
/// loaded through [`Rule::json`](crate::rule::Rule::json).
pub trait Role: Send + Sync + 'static {
    /// Opaque denial cause. Never interpreted by the engine.
    type Error: Clone + Debug + Send + Sync + 'static;

    /// The cause to report when no privilege responds for this role.
    fn error(&self) -> Option<Self::Error> {
        None
    }
}

/// Schema-less roles. The `"error"` member, if present, is the cause.
impl Role for serde_json::Value {
    type Error = serde_json::Value;

    fn error(&self) -> Option<Self::Error> {
        self.get("error").cloned()
    }
}
