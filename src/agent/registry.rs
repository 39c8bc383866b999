use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::traits::{ExecutionContext, Tool, ToolCall, ToolDefinition, ToolResult};

/// Concurrency-safe catalog mapping tool names to implementations.
///
/// The lock guards catalog metadata only. Dispatch clones the `Arc` under
/// the read lock and runs the tool after releasing it, so a slow tool never
/// blocks registrations or lookups from other conversations sharing the
/// registry.
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }

    /// Add a tool under its own name. Fails on empty or duplicate names,
    /// leaving the catalog untouched.
    pub fn register(&self, tool: Arc<dyn Tool>) -> Result<(), Error> {
        let name = tool.name().to_string();
        if name.is_empty() {
            return Err(Error::EmptyToolName);
        }

        let mut tools = self.tools.write().unwrap();
        if tools.contains_key(&name) {
            return Err(Error::AlreadyRegistered(name));
        }

        tracing::debug!(tool = %name, "tool registered");
        tools.insert(name, tool);
        Ok(())
    }

    pub fn unregister(&self, name: &str) -> Result<(), Error> {
        let mut tools = self.tools.write().unwrap();
        if tools.remove(name).is_none() {
            return Err(Error::ToolNotFound(name.to_string()));
        }

        tracing::debug!(tool = %name, "tool unregistered");
        Ok(())
    }

    /// Look up a tool by name. The returned reference is shared; callers
    /// must not assume exclusive access.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Tool>, Error> {
        self.tools
            .read()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ToolNotFound(name.to_string()))
    }

    /// Names of all registered tools, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.tools.read().unwrap().keys().cloned().collect()
    }

    /// Provider-shaped definitions for every registered tool, taken as a
    /// single snapshot under the read lock.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .read()
            .unwrap()
            .values()
            .map(|tool| tool.definition())
            .collect()
    }

    /// Run the tool named by `call` with its raw argument payload.
    ///
    /// Execution failures propagate annotated with the tool name; argument
    /// decode failures pass through unchanged since they already carry it.
    pub async fn execute(
        &self,
        cancel: CancellationToken,
        call: &ToolCall,
    ) -> Result<ToolResult, Error> {
        if call.kind != "function" {
            return Err(Error::UnsupportedCallKind(call.kind.clone()));
        }

        let tool = self.get(&call.name)?;
        let ctx = ExecutionContext::new(cancel).with_call_id(&call.id);

        tracing::debug!(tool = %call.name, call_id = %call.id, "dispatching tool call");

        match tool.execute(&ctx, &call.arguments).await {
            Ok(content) => Ok(ToolResult::new(&call.id, content)),
            Err(err @ Error::ArgumentDecode { .. }) => Err(err),
            Err(err) => Err(Error::ToolExecution {
                tool: call.name.clone(),
                source: Box::new(err),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use async_trait::async_trait;
    use std::time::Duration;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the raw arguments back"
        }

        fn parameters(&self) -> Schema {
            Schema::object().with_property("text", Schema::string("Text to echo"))
        }

        async fn execute(&self, _ctx: &ExecutionContext, args: &str) -> Result<String, Error> {
            Ok(args.to_string())
        }
    }

    struct NamelessTool;

    #[async_trait]
    impl Tool for NamelessTool {
        fn name(&self) -> &str {
            ""
        }

        fn description(&self) -> &str {
            "Misconfigured tool"
        }

        fn parameters(&self) -> Schema {
            Schema::object()
        }

        async fn execute(&self, _ctx: &ExecutionContext, _args: &str) -> Result<String, Error> {
            Ok(String::new())
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn parameters(&self) -> Schema {
            Schema::object()
        }

        async fn execute(&self, _ctx: &ExecutionContext, _args: &str) -> Result<String, Error> {
            Err(Error::InvalidArgument("nothing to do".into()))
        }
    }

    struct SlowTool;

    #[async_trait]
    impl Tool for SlowTool {
        fn name(&self) -> &str {
            "slow"
        }

        fn description(&self) -> &str {
            "Sleeps before answering"
        }

        fn parameters(&self) -> Schema {
            Schema::object()
        }

        async fn execute(&self, _ctx: &ExecutionContext, _args: &str) -> Result<String, Error> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok("done".to_string())
        }
    }

    #[test]
    fn duplicate_registration_keeps_first_tool() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let err = registry.register(Arc::new(EchoTool)).unwrap_err();
        assert!(matches!(err, Error::AlreadyRegistered(name) if name == "echo"));

        assert_eq!(registry.names(), vec!["echo".to_string()]);
        assert!(registry.get("echo").is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let registry = ToolRegistry::new();
        let err = registry.register(Arc::new(NamelessTool)).unwrap_err();
        assert!(matches!(err, Error::EmptyToolName));
        assert!(registry.names().is_empty());
    }

    #[test]
    fn unregister_then_get_fails() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();
        registry.unregister("echo").unwrap();

        assert!(matches!(
            registry.get("echo"),
            Err(Error::ToolNotFound(name)) if name == "echo"
        ));
        assert!(matches!(
            registry.unregister("echo"),
            Err(Error::ToolNotFound(_))
        ));
    }

    #[test]
    fn definitions_mirror_registered_tools() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 1);

        let def = &definitions[0];
        assert_eq!(def.kind, "function");
        assert_eq!(def.function.name, "echo");
        assert_eq!(def.function.parameters["type"], "object");
        assert_eq!(
            def.function.parameters["properties"]["text"]["type"],
            "string"
        );
    }

    #[tokio::test]
    async fn execute_rejects_non_function_calls() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let call = ToolCall {
            id: "call_1".into(),
            kind: "retrieval".into(),
            name: "echo".into(),
            arguments: "{}".into(),
        };

        let err = registry
            .execute(CancellationToken::new(), &call)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedCallKind(kind) if kind == "retrieval"));
    }

    #[tokio::test]
    async fn execute_unknown_tool_fails() {
        let registry = ToolRegistry::new();
        let call = ToolCall::function("call_1", "missing", "{}");

        let err = registry
            .execute(CancellationToken::new(), &call)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(name) if name == "missing"));
    }

    #[tokio::test]
    async fn execute_wraps_result_with_call_id() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let call = ToolCall::function("call_42", "echo", r#"{"text":"hi"}"#);
        let result = registry
            .execute(CancellationToken::new(), &call)
            .await
            .unwrap();

        assert_eq!(result.tool_call_id, "call_42");
        assert_eq!(result.role, "tool");
        assert_eq!(result.content, r#"{"text":"hi"}"#);
    }

    #[tokio::test]
    async fn execute_annotates_tool_failures() {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(FailingTool)).unwrap();

        let call = ToolCall::function("call_1", "failing", "{}");
        let err = registry
            .execute(CancellationToken::new(), &call)
            .await
            .unwrap_err();

        match err {
            Error::ToolExecution { tool, source } => {
                assert_eq!(tool, "failing");
                assert!(matches!(*source, Error::InvalidArgument(_)));
            }
            other => panic!("expected ToolExecution, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_execution_does_not_block_registration() {
        let registry = Arc::new(ToolRegistry::new());
        registry.register(Arc::new(SlowTool)).unwrap();

        let dispatched = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let call = ToolCall::function("call_1", "slow", "{}");
                registry.execute(CancellationToken::new(), &call).await
            })
        };

        // Registering while the slow tool runs must complete immediately.
        tokio::time::sleep(Duration::from_millis(20)).await;
        registry.register(Arc::new(EchoTool)).unwrap();
        assert_eq!(registry.names().len(), 2);

        let result = dispatched.await.unwrap().unwrap();
        assert_eq!(result.content, "done");
    }
}
