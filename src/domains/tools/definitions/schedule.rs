//! Scheduling queries: today's items, due items, time blocks.
//!
//! Dates are optional; when omitted no query parameter is sent and the API
//! defaults to today.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::super::{
    ToolError,
    catalog::ToolDefinition,
    validation::{FieldChecks, Validate, ValidationError},
};
use crate::core::auth::CredentialTier;
use crate::domains::marvin::OutboundCall;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct DayParams {
    /// The date to query (YYYY-MM-DD). Defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Validate for DayParams {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new().date("date", self.date.as_deref()).finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct DueItemsParams {
    /// The date to get due items by (YYYY-MM-DD). Defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<String>,
}

impl Validate for DueItemsParams {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new().date("by", self.by.as_deref()).finish()
    }
}

fn today_items(params: DayParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("todayItems").with_query(&params)?)
}

fn due_items(params: DueItemsParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("dueItems").with_query(&params)?)
}

fn today_time_blocks(params: DayParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("todayTimeBlocks").with_query(&params)?)
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "getTodayItems",
            "Gets tasks and projects scheduled for today (or the given date).",
            CredentialTier::Api,
            today_items,
        )
        .read_only(),
        ToolDefinition::new(
            "getDueItems",
            "Gets open tasks and projects that are due.",
            CredentialTier::Api,
            due_items,
        )
        .read_only(),
        ToolDefinition::new(
            "getTodayTimeBlocks",
            "Gets a list of today's time blocks.",
            CredentialTier::Api,
            today_time_blocks,
        )
        .read_only(),
    ]
}
