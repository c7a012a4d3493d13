//! MCP-backed tool host.
//!
//! The host owns one rmcp client session over a spawned server's stdio.
//! Dropping it cancels the session and the child process with it.

use super::{ToolDescriptor, ToolError, ToolHost, ToolOutput};
use rmcp::{
    ServiceExt,
    model::{CallToolRequestParams, CallToolResult, Tool},
    service::{RoleClient, RunningService},
    transport::{ConfigureCommandExt, TokioChildProcess},
};
use serde_json::{Map, Value};
use tokio::process::Command;
use tracing::debug;

const NO_DESCRIPTION: &str = "No description available";

/// Error type for MCP connection setup and teardown.
pub type McpError = Box<dyn std::error::Error + Send + Sync>;

/// Tool host backed by an MCP server.
pub struct McpToolHost {
    service: RunningService<RoleClient, ()>,
}

impl McpToolHost {
    /// Spawn `command args..` and complete the MCP handshake.
    pub async fn spawn(
        command: impl AsRef<str>,
        args: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, McpError> {
        let command = command.as_ref();
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        debug!(%command, ?args, "spawning MCP server");

        let transport = TokioChildProcess::new(Command::new(command).configure(|cmd| {
            cmd.args(&args);
        }))?;
        let service = ().serve(transport).await?;
        Ok(Self { service })
    }

    /// Close the channel and stop the server.
    pub async fn shutdown(self) -> Result<(), McpError> {
        let reason = self.service.cancel().await?;
        debug!(?reason, "MCP service stopped");
        Ok(())
    }
}

fn call_params(name: &str, arguments: Map<String, Value>) -> CallToolRequestParams {
    CallToolRequestParams {
        name: name.to_string().into(),
        arguments: Some(arguments),
        meta: None,
        task: None,
    }
}

impl From<Tool> for ToolDescriptor {
    fn from(tool: Tool) -> Self {
        ToolDescriptor {
            name: tool.name.to_string(),
            description: tool
                .description
                .map(|d| d.to_string())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            input_schema: Value::Object((*tool.input_schema).clone()),
        }
    }
}

/// Prefer each content item's text; fall back to its JSON form.
fn normalize(result: CallToolResult) -> ToolOutput {
    if result.content.is_empty() {
        if let Some(structured) = result.structured_content {
            return ToolOutput::Raw(structured.to_string());
        }
    }

    ToolOutput::Items(
        result
            .content
            .iter()
            .map(|item| match item.as_text() {
                Some(text) => text.text.clone(),
                None => serde_json::to_string(item).unwrap_or_default(),
            })
            .collect(),
    )
}

impl ToolHost for McpToolHost {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolError> {
        let tools = self
            .service
            .list_all_tools()
            .await
            .map_err(|e| ToolError::Transport(e.to_string()))?;
        Ok(tools.into_iter().map(ToolDescriptor::from).collect())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<ToolOutput, ToolError> {
        let result = self
            .service
            .call_tool(call_params(name, arguments))
            .await
            .map_err(|e| ToolError::Execution(e.to_string()))?;
        Ok(normalize(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::Content;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn text_content_is_kept_in_order() {
        let result = CallToolResult::success(vec![Content::text("73"), Content::text("78")]);
        assert_eq!(
            normalize(result),
            ToolOutput::Items(vec!["73".into(), "78".into()])
        );
    }

    #[test]
    fn structured_only_result_is_stringified() {
        let mut result = CallToolResult::success(Vec::new());
        result.structured_content = Some(json!({"sum": 5}));
        assert_eq!(normalize(result), ToolOutput::Raw(r#"{"sum":5}"#.into()));
    }

    #[test]
    fn call_params_carry_typed_arguments() {
        let Value::Object(arguments) = json!({"n": 7, "vals": [1, 2, 3]}) else {
            unreachable!()
        };
        let params = call_params("sum", arguments.clone());
        assert_eq!(params.name, "sum");
        assert_eq!(params.arguments, Some(arguments));
    }

    #[test]
    fn descriptor_from_mcp_tool() {
        let schema = json!({"type": "object", "properties": {"a": {"type": "integer"}}});
        let Value::Object(schema) = schema else {
            unreachable!()
        };
        let tool = Tool::new("add", "Add two numbers", Arc::new(schema));
        let descriptor = ToolDescriptor::from(tool);
        assert_eq!(descriptor.name, "add");
        assert_eq!(descriptor.description, "Add two numbers");
        assert_eq!(descriptor.parameters().unwrap()[0].name, "a");
    }
}
