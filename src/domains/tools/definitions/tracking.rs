//! Time tracking tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::super::{ToolError, catalog::ToolDefinition, validation::Validate};
use super::{NoParams, body_with};
use crate::core::auth::CredentialTier;
use crate::domains::marvin::OutboundCall;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackParams {
    /// The ID of the task to start or stop tracking.
    pub task_id: String,
}

impl Validate for TrackParams {}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTracksParams {
    /// An array of task IDs to get time tracking info for.
    pub task_ids: Vec<String>,
}

impl Validate for GetTracksParams {}

fn start(params: TrackParams) -> Result<OutboundCall, ToolError> {
    let body = body_with(&params, &[("action", json!("START"))])?;
    Ok(OutboundCall::post("track").with_body(body))
}

fn stop(params: TrackParams) -> Result<OutboundCall, ToolError> {
    let body = body_with(&params, &[("action", json!("STOP"))])?;
    Ok(OutboundCall::post("track").with_body(body))
}

fn tracked_item(_: NoParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::get("trackedItem"))
}

fn tracks(params: GetTracksParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::post("tracks").with_json(&params)?)
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "startTracking",
            "Starts time tracking for a task.",
            CredentialTier::Api,
            start,
        ),
        ToolDefinition::new(
            "stopTracking",
            "Stops time tracking for a task.",
            CredentialTier::Api,
            stop,
        ),
        ToolDefinition::new(
            "getTrackedItem",
            "Gets the currently tracked task.",
            CredentialTier::Api,
            tracked_item,
        )
        .read_only(),
        // POST, but the API only reads here.
        ToolDefinition::new(
            "getTracks",
            "Gets time tracking info for tasks.",
            CredentialTier::Api,
            tracks,
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
    fn test_start_and_stop() {
        let call = build("startTracking", json!({ "taskId": "t1" })).unwrap();
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path(), "/track");
        assert_eq!(call.body, Some(json!({ "taskId": "t1", "action": "START" })));

        let call = build("stopTracking", json!({ "taskId": "t1" })).unwrap();
        assert_eq!(call.body, Some(json!({ "taskId": "t1", "action": "STOP" })));
    }

    #[test]
    fn test_caller_cannot_override_action() {
        let call = build("startTracking", json!({ "taskId": "t1", "action": "STOP" })).unwrap();
        assert_eq!(call.body, Some(json!({ "taskId": "t1", "action": "START" })));
    }

    #[test]
    fn test_tracked_item() {
        let call = build("getTrackedItem", json!({})).unwrap();
        assert_eq!(call.method, Method::GET);
        assert_eq!(call.path(), "/trackedItem");
    }

    #[test]
    fn test_tracks() {
        let call = build("getTracks", json!({ "taskIds": ["a", "b"] })).unwrap();
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path(), "/tracks");
        assert_eq!(call.body, Some(json!({ "taskIds": ["a", "b"] })));

        assert_eq!(
            invalid_fields(build("getTracks", json!({ "taskIds": "a" }))),
            vec!["taskIds"]
        );
    }
}
