// ABOUTME: Defines Rule - a tagged union of terminal, deferred, sequence,
// ABOUTME: callable and raw JSON rule shapes, with construction helpers.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde::de::DeserializeOwned;

use super::Layer;
use super::resolve::decode;
use crate::approval::Approval;
use crate::error::RuleError;

/// A pending computation producing a rule. Shared so a rule can be resolved
/// any number of times.
pub type DeferredRule<T, C> = Shared<BoxFuture<'static, Result<Rule<T, C>, RuleError>>>;

/// A callable producing a rule from the layer's context.
pub type RuleFn<T, C> =
    Arc<dyn Fn(C) -> BoxFuture<'static, Result<Rule<T, C>, RuleError>> + Send + Sync>;

/// Decodes untyped rule data into a typed rule, chosen when the rule is built.
pub type JsonDecoder<T, C> = fn(Layer, &serde_json::Value) -> Result<Rule<T, C>, RuleError>;

/// A rule that resolves, given a context `C`, to a flat list of `T`.
pub enum Rule<T, C> {
    /// An already-known result.
    Terminal(T),

    /// A computation that has not completed yet.
    Deferred(DeferredRule<T, C>),

    /// Sub-rules resolved concurrently, flattened in order.
    Sequence(Vec<Rule<T, C>>),

    /// A function of the context producing another rule.
    Callable(RuleFn<T, C>),

    /// Untyped rule data from outside the program, decoded on resolution.
    Json(serde_json::Value, JsonDecoder<T, C>),
}

impl<T, C> Rule<T, C>
where
    T: Clone + Send + Sync + 'static,
    C: Send + 'static,
{
    /// A rule resolving to exactly `value`.
    pub fn terminal(value: T) -> Self {
        Self::Terminal(value)
    }

    /// A rule resolving to whatever `future` produces.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<Rule<T, C>, RuleError>> + Send + 'static,
    {
        Self::Deferred(future.boxed().shared())
    }

    /// A rule resolving each of `rules` and concatenating the results.
    pub fn sequence(rules: impl IntoIterator<Item = Rule<T, C>>) -> Self {
        Self::Sequence(rules.into_iter().collect())
    }

    /// A rule computed synchronously from the context.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(C) -> Rule<T, C> + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(move |ctx: C| {
            let rule = f(ctx);
            async move { Ok::<_, RuleError>(rule) }.boxed()
        }))
    }

    /// A rule computed asynchronously, and possibly failing, from the context.
    pub fn from_async_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Rule<T, C>, RuleError>> + Send + 'static,
    {
        Self::Callable(Arc::new(move |ctx: C| f(ctx).boxed()))
    }
}

impl<T: DeserializeOwned, C> Rule<T, C> {
    /// A rule described by untyped data: arrays are sequences, objects are
    /// terminal results. Anything else fails to resolve.
    pub fn json(value: serde_json::Value) -> Self {
        Self::Json(value, decode::<T, C>)
    }
}

impl<T, C> Rule<T, C> {
    pub(crate) fn shape(&self) -> &'static str {
        match self {
            Self::Terminal(_) => "Terminal",
            Self::Deferred(_) => "Deferred",
            Self::Sequence(_) => "Sequence",
            Self::Callable(_) => "Callable",
            Self::Json(..) => "Json",
        }
    }
}

impl<T: Clone, C> Clone for Rule<T, C> {
    fn clone(&self) -> Self {
        match self {
            Self::Terminal(value) => Self::Terminal(value.clone()),
            Self::Deferred(future) => Self::Deferred(future.clone()),
            Self::Sequence(rules) => Self::Sequence(rules.clone()),
            Self::Callable(f) => Self::Callable(Arc::clone(f)),
            Self::Json(value, decoder) => Self::Json(value.clone(), *decoder),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Rule<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(value) => f.debug_tuple("Terminal").field(value).finish(),
            Self::Sequence(rules) => f.debug_tuple("Sequence").field(rules).finish(),
            Self::Json(value, _) => f.debug_tuple("Json").field(value).finish(),
            other => f.write_str(other.shape()),
        }
    }
}

impl<E, C> From<Approval<E>> for Rule<Approval<E>, C> {
    fn from(approval: Approval<E>) -> Self {
        Self::Terminal(approval)
    }
}

impl<T, C> From<Vec<Rule<T, C>>> for Rule<T, C> {
    fn from(rules: Vec<Rule<T, C>>) -> Self {
        Self::Sequence(rules)
    }
}
