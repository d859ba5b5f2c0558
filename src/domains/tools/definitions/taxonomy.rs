//! Category, label and hierarchy queries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::super::{
    ToolError,
    catalog::ToolDefinition,
    validation::{FieldChecks, Validate, ValidationError},
};
use super::NoParams;
use crate::core::auth::CredentialTier;
use crate::domains::marvin::OutboundCall;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetChildrenParams {
    /// The ID of the parent category or project to get children for.
    pub parent_id: String,
}

impl Validate for GetChildrenParams {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new().not_blank("parentId", &self.parent_id).finish()
    }
}

fn categories(_: NoParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("categories"))
}

fn labels(_: NoParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("labels"))
}

fn children(params: GetChildrenParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("children").with_query(&params)?)
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "getCategories",
            "Gets a list of all categories.",
            CredentialTier::Api,
            categories,
        )
        .read_only(),
        ToolDefinition::new(
            "getLabels",
            "Gets a list of all labels.",
            CredentialTier::Api,
            labels,
        )
        .read_only(),
        ToolDefinition::new(
            "getChildren",
            "Gets child tasks and projects of a category or project.",
            CredentialTier::Api,
            children,
        )
        .read_only(),
    ]
}
