//! Generic document tools.
//!
//! These mutate arbitrary stored documents by key and always use the full
//! access token.

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::super::{
    ToolError,
    catalog::ToolDefinition,
    validation::{FieldChecks, Validate, ValidationError},
};
use crate::core::auth::CredentialTier;
use crate::domains::marvin::OutboundCall;

/// One field assignment applied by `updateDoc`.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct DocSetter {
    /// Field name to set.
    pub key: String,
    /// New value (any JSON).
    pub val: Value,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocParams {
    /// The ID of the document to update.
    pub item_id: String,

    /// An array of key-value pairs to update.
    pub setters: Vec<DocSetter>,
}

impl Validate for UpdateDocParams {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = FieldChecks::new().not_blank("itemId", &self.item_id);
        for (i, setter) in self.setters.iter().enumerate() {
            checks = checks.not_blank(&format!("setters[{}].key", i), &setter.key);
        }
        checks.finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateDocParams {
    /// The document to create. Must include a `db` field naming its database.
    pub doc: JsonObject,
}

impl Validate for CreateDocParams {
    fn validate(&self) -> Result<(), ValidationError> {
        let has_db = self
            .doc
            .get("db")
            .and_then(Value::as_str)
            .is_some_and(|db| !db.trim().is_empty());
        FieldChecks::new()
            .require("doc.db", has_db, "is required and must be a non-empty string")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDocParams {
    /// The ID of the document to delete.
    pub item_id: String,
}

impl Validate for DeleteDocParams {
    fn validate(&self) -> Result<(), ValidationError> {
        FieldChecks::new().not_blank("itemId", &self.item_id).finish()
    }
}

fn update(params: UpdateDocParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::post("doc/update").with_json(&params)?)
}

fn create(params: CreateDocParams) -> Result<OutboundCall, ToolError> {
    let mut doc = params.doc;
    doc.insert(
        "createdAt".to_string(),
        Value::from(chrono::Utc::now().timestamp_millis()),
    );
    Ok(OutboundCall::post("doc/create").with_body(Value::Object(doc)))
}

fn delete(params: DeleteDocParams) -> Result<OutboundCall, ToolError> {
    Ok(OutboundCall::post("doc/delete").with_json(&params)?)
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "updateDoc",
            "Updates any document. Use with caution.",
            CredentialTier::FullAccess,
            update,
        ),
        ToolDefinition::new(
            "createDoc",
            "Creates any document. Use with caution.",
            CredentialTier::FullAccess,
            create,
        ),
        ToolDefinition::new(
            "deleteDoc",
            "Deletes any document. Use with caution.",
            CredentialTier::FullAccess,
            delete,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{build, invalid_fields};
    use serde_json::json;

    #[test]
    fn test_update() {
        let call = build(
            "updateDoc",
            json!({
                "itemId": "d1",
                "setters": [
                    { "key": "done", "val": true },
                    { "key": "note", "val": { "nested": [1, 2] } }
                ]
            }),
        )
        .unwrap();
        assert_eq!(call.path(), "/doc/update");
        assert_eq!(
            call.body,
            Some(json!({
                "itemId": "d1",
                "setters": [
                    { "key": "done", "val": true },
                    { "key": "note", "val": { "nested": [1, 2] } }
                ]
            }))
        );
    }

    #[test]
    fn test_update_requires_setters() {
        assert_eq!(
            invalid_fields(build("updateDoc", json!({ "itemId": "d1" }))),
            vec!["setters"]
        );
        assert_eq!(
            invalid_fields(build(
                "updateDoc",
                json!({ "itemId": "d1", "setters": [{ "key": "", "val": 1 }] })
            )),
            vec!["setters[0].key"]
        );
    }

    #[test]
    fn test_update_names_malformed_setters() {
        assert_eq!(
            invalid_fields(build(
                "updateDoc",
                json!({ "itemId": "d", "setters": [{ "val": 1 }] })
            )),
            vec!["setters[0].key"]
        );
        assert_eq!(
            invalid_fields(build(
                "updateDoc",
                json!({ "itemId": "d", "setters": [{ "key": "done", "val": true }, "note"] })
            )),
            vec!["setters[1]"]
        );
        assert_eq!(
            invalid_fields(build(
                "updateDoc",
                json!({ "itemId": "d", "setters": [{ "key": 3, "val": true }] })
            )),
            vec!["setters[0].key"]
        );
    }

    #[test]
    fn test_create_stamps_created_at() {
        let before = chrono::Utc::now().timestamp_millis();
        let call = build(
            "createDoc",
            json!({ "doc": { "db": "Tasks", "title": "From doc" } }),
        )
        .unwrap();
        assert_eq!(call.path(), "/doc/create");

        let body = call.body.unwrap();
        assert_eq!(body["db"], "Tasks");
        assert_eq!(body["title"], "From doc");
        let created_at = body["createdAt"].as_i64().unwrap();
        assert!(created_at >= before);
    }

    #[test]
    fn test_create_requires_db() {
        assert_eq!(
            invalid_fields(build("createDoc", json!({ "doc": { "title": "x" } }))),
            vec!["doc.db"]
        );
        assert_eq!(
            invalid_fields(build("createDoc", json!({ "doc": "Tasks" }))),
            vec!["doc"]
        );
    }

    #[test]
    fn test_delete() {
        let call = build("deleteDoc", json!({ "itemId": "d1" })).unwrap();
        assert_eq!(call.path(), "/doc/delete");
        assert_eq!(call.body, Some(json!({ "itemId": "d1" })));
    }
}
