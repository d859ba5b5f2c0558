//! Tool Registry - per-connection dispatch for all tools.
//!
//! This module provides:
//! - Tool metadata for listing, read from the static catalog
//! - Dispatch of a tool call to exactly one outbound Marvin API call, using
//!   the credentials this registry was bound to

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::ToolError;
use super::catalog::{self, catalog};
use crate::core::auth::Credentials;
use crate::domains::marvin::RemoteApi;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry bound to one connection's credentials.
///
/// Constructed once per connection and dropped with it.
pub struct ToolRegistry {
    api: Arc<dyn RemoteApi>,
    credentials: Credentials,
}

impl ToolRegistry {
    /// Create a registry bound to `credentials`.
    pub fn new(api: Arc<dyn RemoteApi>, credentials: Credentials) -> Self {
        Self { api, credentials }
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        catalog().iter().map(|t| t.name).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        catalog().iter().map(|t| t.to_tool()).collect()
    }

    /// Validate the arguments, issue the tool's single outbound call and wrap
    /// the response.
    ///
    /// Unknown tools and invalid arguments fail before anything is sent.
    /// Remote failures come back as an error result rather than `Err`.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallToolResult, ToolError> {
        let Some(tool) = catalog::find(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        let call = tool.build_call(arguments).inspect_err(|e| {
            warn!("Rejected {} call: {}", name, e);
        })?;

        info!("{} -> {} {}", name, call.method, call.path());
        let auth = self.credentials.header_for(tool.tier);

        match self.api.send(&call, auth).await {
            Ok(body) => success_result(&body),
            Err(e) => {
                warn!("{} failed: {}", name, e);
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            }
        }
    }
}

/// Pretty-print the response body as the single text content item.
fn success_result(body: &Value) -> Result<CallToolResult, ToolError> {
    let text = serde_json::to_string_pretty(body)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording stand-in for the Marvin API.

    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::{Value, json};

    use crate::core::auth::AuthHeader;
    use crate::domains::marvin::{ApiError, OutboundCall, RemoteApi};

    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub call: OutboundCall,
        pub header: &'static str,
        pub token: String,
    }

    /// Records every call and answers with a fixed outcome.
    pub struct RecordingApi {
        calls: Mutex<Vec<RecordedCall>>,
        response: Result<Value, (StatusCode, String)>,
    }

    impl RecordingApi {
        pub fn ok(body: Value) -> Self {
            Self {
                calls: Mutex::default(),
                response: Ok(body),
            }
        }

        pub fn failing(status: StatusCode, body: &str) -> Self {
            Self {
                calls: Mutex::default(),
                response: Err((status, body.to_string())),
            }
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Default for RecordingApi {
        fn default() -> Self {
            Self::ok(json!({ "ok": true }))
        }
    }

    #[async_trait]
    impl RemoteApi for RecordingApi {
        async fn send(
            &self,
            call: &OutboundCall,
            auth: AuthHeader<'_>,
        ) -> Result<Value, ApiError> {
            self.calls.lock().unwrap().push(RecordedCall {
                call: call.clone(),
                header: auth.name,
                token: auth.token.to_string(),
            });
            match &self.response {
                Ok(body) => Ok(body.clone()),
                Err((status, body)) => Err(ApiError::Status {
                    status: *status,
                    body: body.clone(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingApi;
    use super::*;
    use crate::core::auth::CredentialTier;
    use reqwest::{Method, StatusCode};
    use rmcp::model::RawContent;
    use serde_json::json;

    fn registry(api: &Arc<RecordingApi>) -> ToolRegistry {
        ToolRegistry::new(api.clone(), Credentials::new("api-tok", "full-tok"))
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn text(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    /// Arguments satisfying each tool's schema.
    fn valid_arguments(tool: &str) -> Value {
        match tool {
            "createTask" | "createProject" => json!({ "title": "Buy milk" }),
            "markTaskDone" => json!({ "itemId": "t1" }),
            "addEvent" => json!({ "title": "Call", "start": "2024-05-01T10:00:00Z" }),
            "getTodayItems" | "getDueItems" | "getTodayTimeBlocks" => json!({}),
            "getCategories" | "getLabels" | "getTrackedItem" | "getReminders" => json!({}),
            "getChildren" => json!({ "parentId": "root" }),
            "startTracking" | "stopTracking" => json!({ "taskId": "t1" }),
            "getTracks" => json!({ "taskIds": ["t1"] }),
            "setReminder" => json!({ "itemId": "t1", "remindAt": 1714550400000i64 }),
            "deleteReminder" => json!({ "reminderId": "r1" }),
            "deleteAllReminders" | "resetRewardPoints" => json!({}),
            "recordHabit" | "undoHabit" => json!({ "habitId": "h1" }),
            "getHabit" => json!({ "id": "h1" }),
            "listHabits" | "getMe" | "getGoals" | "getKudos" => json!({}),
            "claimRewardPoints" => json!({ "points": 1, "itemId": "MANUAL" }),
            "unclaimRewardPoints" => json!({ "itemId": "t1" }),
            "spendRewardPoints" => json!({ "points": 1 }),
            "updateDoc" => json!({ "itemId": "d1", "setters": [] }),
            "createDoc" => json!({ "doc": { "db": "Tasks" } }),
            "deleteDoc" => json!({ "itemId": "d1" }),
            other => panic!("no sample arguments for {other}"),
        }
    }

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names.len(), 32);
        assert!(names.contains(&"createTask"));
        assert!(names.contains(&"getTodayItems"));
        assert!(names.contains(&"deleteAllReminders"));
        assert!(names.contains(&"createDoc"));
        assert_eq!(ToolRegistry::get_all_tools().len(), names.len());
    }

    #[tokio::test]
    async fn test_every_tool_issues_one_call_with_its_tier_header() {
        for tool in catalog() {
            let api = Arc::new(RecordingApi::default());
            let result = registry(&api)
                .call_tool(tool.name, args(valid_arguments(tool.name)))
                .await
                .unwrap();
            assert_eq!(result.is_error, Some(false), "{}", tool.name);

            let calls = api.calls();
            assert_eq!(calls.len(), 1, "{}", tool.name);
            let (header, token) = match tool.tier {
                CredentialTier::Api => ("X-API-Token", "api-tok"),
                CredentialTier::FullAccess => ("X-Full-Access-Token", "full-tok"),
            };
            assert_eq!(calls[0].header, header, "{}", tool.name);
            assert_eq!(calls[0].token, token, "{}", tool.name);
        }
    }

    #[tokio::test]
    async fn test_missing_required_field_makes_no_call() {
        let required: Vec<_> = catalog()
            .iter()
            .filter(|t| {
                t.input_schema()
                    .get("required")
                    .and_then(Value::as_array)
                    .is_some_and(|r| !r.is_empty())
            })
            .collect();
        assert!(required.len() > 15);

        for tool in required {
            let api = Arc::new(RecordingApi::default());
            let err = registry(&api)
                .call_tool(tool.name, JsonObject::new())
                .await
                .unwrap_err();
            assert!(
                matches!(err, ToolError::InvalidArguments(_)),
                "{}: {err:?}",
                tool.name
            );
            assert!(api.calls().is_empty(), "{}", tool.name);
        }
    }

    #[tokio::test]
    async fn test_full_access_tools_never_use_api_header() {
        for name in [
            "createDoc",
            "updateDoc",
            "deleteDoc",
            "deleteAllReminders",
            "resetRewardPoints",
        ] {
            let api = Arc::new(RecordingApi::default());
            registry(&api)
                .call_tool(name, args(valid_arguments(name)))
                .await
                .unwrap();
            assert_eq!(api.calls()[0].header, "X-Full-Access-Token");
        }
    }

    #[tokio::test]
    async fn test_create_task_end_to_end() {
        let api = Arc::new(RecordingApi::ok(json!({ "_id": "abc123" })));
        let result = registry(&api)
            .call_tool("createTask", args(json!({ "title": "Buy milk" })))
            .await
            .unwrap();

        assert_eq!(text(&result), "{\n  \"_id\": \"abc123\"\n}");
        assert_eq!(result.content.len(), 1);

        let calls = api.calls();
        assert_eq!(calls[0].call.method, Method::POST);
        assert_eq!(calls[0].call.path(), "/addTask");
        assert_eq!(calls[0].call.body, Some(json!({ "title": "Buy milk" })));
        assert_eq!(calls[0].header, "X-API-Token");
        assert_eq!(calls[0].token, "api-tok");
    }

    #[tokio::test]
    async fn test_result_text_round_trips() {
        let body = json!({
            "items": [{ "_id": "a", "done": false, "timeEstimate": 1.5 }],
            "count": 1,
            "note": "ünïcödé \"quoted\""
        });
        let api = Arc::new(RecordingApi::ok(body.clone()));
        let result = registry(&api)
            .call_tool("getTodayItems", JsonObject::new())
            .await
            .unwrap();

        let parsed: Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(parsed, body);
    }

    #[tokio::test]
    async fn test_remote_failure_is_error_result() {
        let api = Arc::new(RecordingApi::failing(
            StatusCode::UNAUTHORIZED,
            "Invalid API token",
        ));
        let result = registry(&api)
            .call_tool("getMe", JsonObject::new())
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(text(&result).contains("401"));
        assert!(text(&result).contains("Invalid API token"));
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let api = Arc::new(RecordingApi::default());
        let err = registry(&api)
            .call_tool("launchRocket", JsonObject::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(name) if name == "launchRocket"));
        assert!(api.calls().is_empty());
    }
}
