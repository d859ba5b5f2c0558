//! Kudos and reward point tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::super::{
    ToolError,
    catalog::ToolDefinition,
    validation::{FieldChecks, Validate, ValidationError},
};
use super::{NoParams, body_with};
use crate::core::auth::CredentialTier;
use crate::domains::marvin::OutboundCall;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRewardPointsParams {
    /// The number of points to claim.
    pub points: f64,

    /// The ID of the item to claim points for, or "MANUAL".
    pub item_id: String,

    /// The date to claim points for (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Validate for ClaimRewardPointsParams {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new().date("date", self.date.as_deref()).finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnclaimRewardPointsParams {
    /// The ID of the item to unclaim points for.
    pub item_id: String,

    /// The date to unclaim points for (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Validate for UnclaimRewardPointsParams {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new().date("date", self.date.as_deref()).finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SpendRewardPointsParams {
    /// The number of points to spend.
    pub points: f64,

    /// The date to spend points for (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Validate for SpendRewardPointsParams {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new().date("date", self.date.as_deref()).finish()
    }
}

fn kudos(_: NoParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("kudos"))
}

fn claim(params: ClaimRewardPointsParams) -> Result<OutboundCall, ToolError> {
    let body = body_with(&params, &[("op", json!("CLAIM"))])?;
    Ok(OutboundCall::post("claimRewardPoints").with_body(body))
}

fn unclaim(params: UnclaimRewardPointsParams) -> Result<OutboundCall, ToolError> {
    let body = body_with(&params, &[("op", json!("UNCLAIM"))])?;
    Ok(OutboundCall::post("unclaimRewardPoints").with_body(body))
}

fn spend(params: SpendRewardPointsParams) -> Result<OutboundCall, ToolError> {
    let body = body_with(&params, &[("op", json!("SPEND"))])?;
    Ok(OutboundCall::post("spendRewardPoints").with_body(body))
}

fn reset(_: NoParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::post("resetRewardPoints").with_body(json!({})))
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new("getKudos", "Gets Marvin Kudos info.", CredentialTier::Api, kudos)
            .read_only(),
        ToolDefinition::new(
            "claimRewardPoints",
            "Claims reward points.",
            CredentialTier::Api,
            claim,
        ),
        ToolDefinition::new(
            "unclaimRewardPoints",
            "Unclaims reward points.",
            CredentialTier::Api,
            unclaim,
        ),
        ToolDefinition::new(
            "spendRewardPoints",
            "Spends reward points.",
            CredentialTier::Api,
            spend,
        ),
        ToolDefinition::new(
            "resetRewardPoints",
            "Resets reward points. Requires the full access token.",
            CredentialTier::FullAccess,
            reset,
        ),
    ]
}
