//! Declarative tool catalog.
//!
//! Each tool is one [`ToolDefinition`] record: name, description, required
//! credential tier, input schema and a request builder. The catalog is built
//! once per process and only read afterwards.

use std::fmt;
use std::sync::{Arc, LazyLock};

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool, ToolAnnotations},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::ToolError;
use super::definitions;
use super::validation::{ArgumentSchema, Validate};
use crate::core::auth::CredentialTier;
use crate::domains::marvin::OutboundCall;

type BuildFn = Box<dyn Fn(JsonObject) -> Result<OutboundCall, ToolError> + Send + Sync>;

/// One registered tool.
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub tier: CredentialTier,
    pub read_only: bool,
    input_schema: fn() -> Arc<JsonObject>,
    build: BuildFn,
}

impl ToolDefinition {
    /// Define a tool whose arguments deserialize into `P`.
    ///
    /// The advertised schema and the validation schema are both generated
    /// from `P`, so they cannot drift apart. The validation schema is
    /// compiled here, once per tool.
    pub fn new<P>(
        name: &'static str,
        description: &'static str,
        tier: CredentialTier,
        to_call: fn(P) -> Result<OutboundCall, ToolError>,
    ) -> Self
    where
        P: DeserializeOwned + JsonSchema + Validate + 'static,
    {
        let schema = ArgumentSchema::for_type::<P>();
        if let Err(e) = &schema {
            tracing::error!("Invalid argument schema for {}: {}", name, e);
        }
        Self {
            name,
            description,
            tier,
            read_only: false,
            input_schema: cached_schema_for_type::<P>,
            build: Box::new(move |arguments| {
                let schema = schema
                    .as_ref()
                    .map_err(|e| ToolError::internal(format!("invalid argument schema: {}", e)))?;
                to_call(schema.parse::<P>(arguments)?)
            }),
        }
    }

    /// Mark the tool as a query with no side effects.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn input_schema(&self) -> Arc<JsonObject> {
        (self.input_schema)()
    }

    /// Validate `arguments` and build the outbound call.
    pub fn build_call(&self, arguments: JsonObject) -> Result<OutboundCall, ToolError> {
        (self.build)(arguments)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: self.input_schema(),
            annotations: Some(ToolAnnotations {
                title: None,
                read_only_hint: Some(self.read_only),
                destructive_hint: Some(self.tier == CredentialTier::FullAccess),
                idempotent_hint: None,
                open_world_hint: Some(true),
            }),
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

impl fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("tier", &self.tier)
            .field("read_only", &self.read_only)
            .finish_non_exhaustive()
    }
}

static CATALOG: LazyLock<Vec<ToolDefinition>> = LazyLock::new(definitions::all);

/// Every tool, in registration order.
pub fn catalog() -> &'static [ToolDefinition] {
    &CATALOG
}

/// Look a tool up by exact name.
pub fn find(name: &str) -> Option<&'static ToolDefinition> {
    catalog().iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = catalog().iter().map(|t| t.name).collect();
        assert_eq!(names.len(), catalog().len());
        assert_eq!(catalog().len(), 32);
    }

    #[test]
    fn test_find_is_exact() {
        assert!(find("createTask").is_some());
        assert!(find("createtask").is_none());
        assert!(find("createTask ").is_none());
    }

    #[test]
    fn test_full_access_tools() {
        let mut full: Vec<_> = catalog()
            .iter()
            .filter(|t| t.tier == CredentialTier::FullAccess)
            .map(|t| t.name)
            .collect();
        full.sort();
        assert_eq!(
            full,
            vec![
                "createDoc",
                "deleteAllReminders",
                "deleteDoc",
                "resetRewardPoints",
                "updateDoc"
            ]
        );
    }

    #[test]
    fn test_schemas_are_objects() {
        for tool in catalog() {
            let schema = tool.input_schema();
            assert_eq!(
                schema.get("type").and_then(|v| v.as_str()),
                Some("object"),
                "{}",
                tool.name
            );
        }
    }

    #[test]
    fn test_argument_schemas_compile() {
        for tool in catalog() {
            let result = tool.build_call(JsonObject::new());
            assert!(
                !matches!(result, Err(ToolError::Internal(_))),
                "{}: {:?}",
                tool.name,
                result
            );
        }
    }

    #[test]
    fn test_annotations() {
        let tool = find("deleteDoc").unwrap().to_tool();
        let annotations = tool.annotations.unwrap();
        assert_eq!(annotations.destructive_hint, Some(true));
        assert_eq!(annotations.read_only_hint, Some(false));

        let tool = find("getLabels").unwrap().to_tool();
        assert_eq!(tool.annotations.unwrap().read_only_hint, Some(true));
    }
}
