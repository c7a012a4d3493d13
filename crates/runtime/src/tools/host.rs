//! Tool host trait.

use crate::tools::{ToolDescriptor, ToolError, ToolOutput};
use serde_json::{Map, Value};
use std::future::Future;

/// Trait for tool execution hosts.
///
/// This is the boundary between the iteration loop and side effects.
pub trait ToolHost: Send + Sync {
    /// Fetch the host's tool catalog, in the host's order.
    fn list_tools(&self) -> impl Future<Output = Result<Vec<ToolDescriptor>, ToolError>> + Send;

    /// Invoke a tool with already-typed arguments.
    fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> impl Future<Output = Result<ToolOutput, ToolError>> + Send;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    type Handler = dyn Fn(&str, &Map<String, Value>) -> Result<ToolOutput, ToolError> + Send + Sync;

    /// An in-memory host with a fixed catalog.
    pub struct StaticToolHost {
        tools: Vec<ToolDescriptor>,
        handler: Box<Handler>,
        calls: Mutex<Vec<(String, Map<String, Value>)>>,
    }

    impl StaticToolHost {
        pub fn new(
            tools: Vec<ToolDescriptor>,
            handler: impl Fn(&str, &Map<String, Value>) -> Result<ToolOutput, ToolError>
            + Send
            + Sync
            + 'static,
        ) -> Self {
            Self {
                tools,
                handler: Box::new(handler),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<(String, Map<String, Value>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ToolHost for StaticToolHost {
        async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolError> {
            Ok(self.tools.clone())
        }

        async fn call_tool(
            &self,
            name: &str,
            arguments: Map<String, Value>,
        ) -> Result<ToolOutput, ToolError> {
            let result = (self.handler)(name, &arguments);
            self.calls.lock().unwrap().push((name.to_string(), arguments));
            result
        }
    }
}
