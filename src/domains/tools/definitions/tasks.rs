//! Task, project and event creation tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::super::{
    ToolError,
    catalog::ToolDefinition,
    validation::{FieldChecks, Validate, ValidationError},
};
use crate::core::auth::CredentialTier;
use crate::domains::marvin::OutboundCall;

/// Parameters shared by `createTask` and `createProject`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewItemParams {
    /// The title of the task or project.
    pub title: String,

    /// The day the item is scheduled for (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,

    /// The ID of the parent project or category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// An array of label IDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,

    /// The due date (YYYY-MM-DD).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// The estimated time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<f64>,

    /// A note for the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Validate for NewItemParams {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new()
            .date("day", self.day.as_deref())
            .date("dueDate", self.due_date.as_deref())
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkTaskDoneParams {
    /// The ID of the task to mark as done.
    pub item_id: String,
}

impl Validate for MarkTaskDoneParams {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new().not_blank("itemId", &self.item_id).finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddEventParams {
    /// The title of the event.
    pub title: String,

    /// The start time of the event in ISO 8601 format.
    pub start: String,

    /// The length of the event in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,

    /// A note for the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Validate for AddEventParams {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new().datetime("start", &self.start).finish()
    }
}

fn create_task(params: NewItemParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::post("addTask").with_json(&params)?)
}

fn create_project(params: NewItemParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::post("addProject").with_json(&params)?)
}

fn mark_task_done(params: MarkTaskDoneParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::post("markDone").with_json(&params)?)
}

fn add_event(params: AddEventParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::post("addEvent").with_json(&params)?)
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "createTask",
            "Creates a new task in Amazing Marvin.",
            CredentialTier::Api,
            create_task,
        ),
        ToolDefinition::new(
            "markTaskDone",
            "Marks a task as done.",
            CredentialTier::Api,
            mark_task_done,
        ),
        ToolDefinition::new(
            "createProject",
            "Creates a new project.",
            CredentialTier::Api,
            create_project,
        ),
        ToolDefinition::new(
            "addEvent",
            "Creates a new calendar event.",
            CredentialTier::Api,
            add_event,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{build, invalid_fields};
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_create_task_minimal() {
        let call = build("createTask", json!({ "title": "Buy milk" })).unwrap();
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path(), "/addTask");
        assert_eq!(call.body, Some(json!({ "title": "Buy milk" })));
        assert_eq!(call.query, None);
    }

    #[test]
    fn test_create_task_full_and_extras_dropped() {
        let call = build(
            "createTask",
            json!({
                "title": "Write report",
                "day": "2024-05-01",
                "parentId": "p1",
                "labelIds": ["l1", "l2"],
                "dueDate": "2024-05-03",
                "timeEstimate": 3600000,
                "note": "quarterly",
                "db": "Categories",
                "_id": "sneaky"
            }),
        )
        .unwrap();
        assert_eq!(
            call.body,
            Some(json!({
                "title": "Write report",
                "day": "2024-05-01",
                "parentId": "p1",
                "labelIds": ["l1", "l2"],
                "dueDate": "2024-05-03",
                "timeEstimate": 3600000.0,
                "note": "quarterly"
            }))
        );
    }

    #[test]
    fn test_create_task_accepts_integral_float() {
        let call = build("createTask", json!({ "title": "x", "timeEstimate": 3600000.0 })).unwrap();
        assert_eq!(call.body, Some(json!({ "title": "x", "timeEstimate": 3600000.0 })));
    }

    #[test]
    fn test_create_task_requires_title() {
        assert_eq!(
            invalid_fields(build("createTask", json!({ "note": "x" }))),
            vec!["title"]
        );
    }

    #[test]
    fn test_create_task_bad_dates() {
        let mut fields = invalid_fields(build(
            "createTask",
            json!({ "title": "x", "day": "today", "dueDate": "05/01/2024" }),
        ));
        fields.sort();
        assert_eq!(fields, vec!["day", "dueDate"]);
    }

    #[test]
    fn test_create_project() {
        let call = build("createProject", json!({ "title": "Garden", "parentId": "root" })).unwrap();
        assert_eq!(call.path(), "/addProject");
        assert_eq!(call.body, Some(json!({ "title": "Garden", "parentId": "root" })));
    }

    #[test]
    fn test_mark_done() {
        let call = build("markTaskDone", json!({ "itemId": "t1" })).unwrap();
        assert_eq!(call.path(), "/markDone");
        assert_eq!(call.body, Some(json!({ "itemId": "t1" })));
        assert_eq!(invalid_fields(build("markTaskDone", json!({}))), vec!["itemId"]);
        assert_eq!(
            invalid_fields(build("markTaskDone", json!({ "itemId": "  " }))),
            vec!["itemId"]
        );
    }

    #[test]
    fn test_add_event() {
        let call = build(
            "addEvent",
            json!({ "title": "Standup", "start": "2024-05-01T09:30:00Z", "length": 900000 }),
        )
        .unwrap();
        assert_eq!(call.path(), "/addEvent");
        assert_eq!(
            call.body,
            Some(json!({ "title": "Standup", "start": "2024-05-01T09:30:00Z", "length": 900000.0 }))
        );

        assert_eq!(
            invalid_fields(build("addEvent", json!({ "title": "x", "start": "soon" }))),
            vec!["start"]
        );
    }
}
