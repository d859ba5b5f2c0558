//! Account-level queries.

use super::super::{ToolError, catalog::ToolDefinition};
use super::NoParams;
use crate::core::auth::CredentialTier;
use crate::domains::marvin::OutboundCall;

fn me(_: NoParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("me"))
}

fn goals(_: NoParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("goals"))
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "getMe",
            "Gets information about your account.",
            CredentialTier::Api,
            me,
        )
        .read_only(),
        ToolDefinition::new(
            "getGoals",
            "Gets a list of all goals.",
            CredentialTier::Api,
            goals,
        )
        .read_only(),
    ]
}
