//! Tool definitions module.
//!
//! One file per area of the Marvin API. Each file contributes its
//! [`ToolDefinition`]s through a `definitions()` function; [`all`] fixes the
//! registration order.

pub mod account;
pub mod documents;
pub mod habits;
pub mod reminders;
pub mod rewards;
pub mod schedule;
pub mod tasks;
pub mod taxonomy;
pub mod tracking;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ToolError;
use super::catalog::ToolDefinition;
use super::validation::Validate;

/// Arguments of tools that take none.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct NoParams {}

impl Validate for NoParams {}

/// Every tool definition, in registration order.
pub fn all() -> Vec<ToolDefinition> {
    [
        tasks::definitions(),
        schedule::definitions(),
        taxonomy::definitions(),
        tracking::definitions(),
        reminders::definitions(),
        habits::definitions(),
        account::definitions(),
        rewards::definitions(),
        documents::definitions(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Serialize `params` to a JSON object and add fixed fields the API expects.
pub(crate) fn body_with<T: Serialize>(
    params: &T,
    extra: &[(&str, Value)],
) -> Result<Value, ToolError> {
    let Value::Object(mut body) = serde_json::to_value(params)? else {
        return Err(ToolError::internal("tool params must serialize to an object"));
    };
    for (key, value) in extra {
        body.insert((*key).to_string(), value.clone());
    }
    Ok(Value::Object(body))
}
