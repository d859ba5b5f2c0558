//! Reminder tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

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
pub struct SetReminderParams {
    /// The ID of the task to set a reminder for.
    pub item_id: String,

    /// The unix timestamp (in milliseconds) to set the reminder for.
    pub remind_at: f64,
}

impl Validate for SetReminderParams {}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReminderParams {
    /// The ID of the reminder to delete.
    pub reminder_id: String,
}

impl Validate for DeleteReminderParams {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new()
            .not_blank("reminderId", &self.reminder_id)
            .finish()
    }
}

fn list(_: NoParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("reminders"))
}

fn set(params: SetReminderParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::post("reminders").with_json(&params)?)
}

fn delete(params: DeleteReminderParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::delete("reminders").segment(params.reminder_id))
}

fn delete_all(_: NoParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::post("reminder/deleteAll").with_body(json!({})))
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "getReminders",
            "Gets a list of all reminders.",
            CredentialTier::Api,
            list,
        )
        .read_only(),
        ToolDefinition::new(
            "setReminder",
            "Sets a reminder for a task.",
            CredentialTier::Api,
            set,
        ),
        ToolDefinition::new(
            "deleteReminder",
            "Deletes a reminder.",
            CredentialTier::Api,
            delete,
        ),
        ToolDefinition::new(
            "deleteAllReminders",
            "Deletes all reminders. Requires the full access token.",
            CredentialTier::FullAccess,
            delete_all,
        ),
    ]
}
