//! Habit tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::super::{ToolError, catalog::ToolDefinition, validation::Validate};
use super::{NoParams, body_with};
use crate::core::auth::CredentialTier;
use crate::domains::marvin::OutboundCall;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordHabitParams {
    /// The ID of the habit to record.
    pub habit_id: String,

    /// The value to record for the habit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl Validate for RecordHabitParams {}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UndoHabitParams {
    /// The ID of the habit to undo.
    pub habit_id: String,
}

impl Validate for UndoHabitParams {}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct GetHabitParams {
    /// The ID of the habit to retrieve.
    pub id: String,
}

impl Validate for GetHabitParams {}

fn record(params: RecordHabitParams) -> Result<OutboundCall, ToolError> {
    let body = body_with(&params, &[("updateDB", json!(true))])?;
    Ok(OutboundCall::post("updateHabit").with_body(body))
}

fn undo(params: UndoHabitParams) -> Result<OutboundCall, ToolError> {
    let body = body_with(&params, &[("undo", json!(true)), ("updateDB", json!(true))])?;
    Ok(OutboundCall::post("updateHabit").with_body(body))
}

fn get(params: GetHabitParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("habit").with_query(&params)?)
}

fn list(_: NoParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("habits"))
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new("recordHabit", "Records a habit.", CredentialTier::Api, record),
        ToolDefinition::new(
            "undoHabit",
            "Undoes the last recording of a habit.",
            CredentialTier::Api,
            undo,
        ),
        ToolDefinition::new("getHabit", "Gets a habit by ID.", CredentialTier::Api, get)
            .read_only(),
        ToolDefinition::new(
            "listHabits",
            "Gets a list of all habits.",
            CredentialTier::Api,
            list,
        )
        .read_only(),
    ]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{build, invalid_fields};
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_record() {
        let call = build("recordHabit", json!({ "habitId": "h1", "value": 3 })).unwrap();
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path(), "/updateHabit");
        let body = call.body.unwrap();
        assert_eq!(body["habitId"], "h1");
        assert_eq!(body["value"].as_f64(), Some(3.0));
        assert_eq!(body["updateDB"], true);
    }

    #[test]
    fn test_record_without_value() {
        let call = build("recordHabit", json!({ "habitId": "h1" })).unwrap();
        assert_eq!(call.body, Some(json!({ "habitId": "h1", "updateDB": true })));
    }

    #[test]
    fn test_undo() {
        let call = build("undoHabit", json!({ "habitId": "h1" })).unwrap();
        assert_eq!(
            call.body,
            Some(json!({ "habitId": "h1", "undo": true, "updateDB": true }))
        );
    }

    #[test]
    fn test_get_and_list() {
        let call = build("getHabit", json!({ "id": "h1" })).unwrap();
        assert_eq!(call.method, Method::GET);
        assert_eq!(call.path(), "/habit");
        assert_eq!(call.query.as_deref(), Some("id=h1"));
        assert_eq!(invalid_fields(build("getHabit", json!({}))), vec!["id"]);

        assert_eq!(build("listHabits", json!({})).unwrap().path(), "/habits");
    }
}
