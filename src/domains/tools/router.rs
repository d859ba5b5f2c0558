//! Tool Router - builds the rmcp ToolRouter from the catalog.
//!
//! Every route forwards to the same [`ToolRegistry`], so both transports share
//! one validation and dispatch path.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};

use super::catalog::catalog;
use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    catalog().iter().fold(ToolRouter::new(), |router, def| {
        let name = def.name;
        let registry = registry.clone();
        router.with_route(ToolRoute::new_dyn(
            def.to_tool(),
            move |ctx: ToolCallContext<'_, S>| {
                let args = ctx.arguments.clone().unwrap_or_default();
                let registry = registry.clone();
                async move {
                    registry
                        .call_tool(name, args)
                        .await
                        .map_err(McpError::from)
                }
                .boxed()
            },
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::super::registry::testing::RecordingApi;
    use super::*;
    use crate::core::auth::Credentials;

    struct TestServer {}

    fn test_registry() -> Arc<ToolRegistry> {
        Arc::new(ToolRegistry::new(
            Arc::new(RecordingApi::default()),
            Credentials::new("a", "f"),
        ))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_registry());
        let tools = router.list_all();
        assert_eq!(tools.len(), 32);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"createTask"));
        assert!(names.contains(&"getTodayItems"));
        assert!(names.contains(&"startTracking"));
        assert!(names.contains(&"claimRewardPoints"));
        assert!(names.contains(&"updateDoc"));
    }

    #[test]
    fn test_registry_matches_router() {
        let registry_names = ToolRegistry::tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(test_registry());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
