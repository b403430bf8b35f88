// ABOUTME: Implements the recursive resolver that flattens any rule shape into
// ABOUTME: an ordered list of terminal results, and the Layer it reports under.

use std::fmt;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Rule;
use crate::error::RuleError;

/// The abstraction layer a rule is resolved at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Privilege,
    Permit,
    Permission,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Privilege => "privilege",
            Self::Permit => "permit",
            Self::Permission => "permission",
        })
    }
}

impl<T, C> Rule<T, C>
where
    T: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    /// Resolve this rule against `ctx` into a flat list of terminal results.
    ///
    /// Sequence elements are resolved concurrently and every one of them runs
    /// to completion. Results keep the sequence's order, not completion order.
    /// If several elements fault, the first in sequence order is returned.
    pub fn resolve(&self, layer: Layer, ctx: C) -> BoxFuture<'_, Result<Vec<T>, RuleError>> {
        async move {
            match self {
                Self::Terminal(value) => Ok(vec![value.clone()]),
                Self::Deferred(future) => {
                    tracing::trace!(%layer, "awaiting deferred rule");
                    let rule = future.clone().await?;
                    rule.resolve(layer, ctx).await
                }
                Self::Sequence(rules) => {
                    tracing::trace!(%layer, width = rules.len(), "resolving sequence");
                    let resolved =
                        join_all(rules.iter().map(|rule| rule.resolve(layer, ctx.clone()))).await;

                    let mut results = Vec::with_capacity(resolved.len());
                    for outcome in resolved {
                        results.extend(outcome?);
                    }
                    Ok(results)
                }
                Self::Callable(f) => {
                    tracing::trace!(%layer, "invoking rule function");
                    let rule = f(ctx.clone()).await?;
                    rule.resolve(layer, ctx).await
                }
                Self::Json(value, decoder) => {
                    let rule = decoder(layer, value)?;
                    rule.resolve(layer, ctx).await
                }
            }
        }
        .boxed()
    }
}

/// Decode untyped rule data into a typed rule.
pub(crate) fn decode<T, C>(layer: Layer, value: &Value) -> Result<Rule<T, C>, RuleError>
where
    T: DeserializeOwned,
{
    let found = match value {
        Value::Array(items) => {
            return Ok(Rule::Sequence(
                items
                    .iter()
                    .map(|item| Rule::Json(item.clone(), decode::<T, C>))
                    .collect(),
            ));
        }
        Value::Object(_) => match serde_json::from_value::<T>(value.clone()) {
            Ok(terminal) => return Ok(Rule::Terminal(terminal)),
            Err(e) => format!("object ({e})"),
        },
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
    };

    tracing::debug!(%layer, %found, "unresolvable rule");
    Err(RuleError::InvalidRuleType { layer, found })
}
