//! Render the tool catalog for the system prompt.

use super::{ToolDescriptor, ToolError};
use tracing::warn;

fn render_line(index: usize, tool: &ToolDescriptor) -> Result<String, ToolError> {
    let params = if tool.declares_properties()? {
        tool.parameters()?
            .iter()
            .map(|p| format!("{}: {}", p.name, p.declared.as_deref().unwrap_or("unknown")))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        "no parameters".to_string()
    };
    Ok(format!(
        "{}. {}({params}) - {}",
        index + 1,
        tool.name,
        tool.description
    ))
}

/// One numbered line per tool, newline separated.
///
/// A tool whose schema cannot be read gets a placeholder line instead of
/// aborting the whole catalog.
pub fn render_catalog(tools: &[ToolDescriptor]) -> String {
    tools
        .iter()
        .enumerate()
        .map(|(i, tool)| {
            render_line(i, tool).unwrap_or_else(|e| {
                warn!(index = i, error = %e, "failed to describe tool");
                format!("{}. Error processing tool", i + 1)
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_numbered_lines() {
        let tools = vec![
            ToolDescriptor::new(
                "add",
                "Add two numbers",
                json!({"properties": {"a": {"type": "integer"}, "b": {"type": "integer"}}}),
            ),
            ToolDescriptor::new(
                "strings_to_chars_to_int",
                "Return the ASCII values of the characters in a word",
                json!({"properties": {"string": {"type": "string"}}}),
            ),
        ];
        assert_eq!(
            render_catalog(&tools),
            "1. add(a: integer, b: integer) - Add two numbers\n\
             2. strings_to_chars_to_int(string: string) - Return the ASCII values of the characters in a word"
        );
    }

    #[test]
    fn malformed_tool_does_not_abort() {
        let tools = vec![
            ToolDescriptor::new("broken", "x", json!({"properties": []})),
            ToolDescriptor::new("ping", "Ping", json!({"type": "object"})),
            ToolDescriptor::new("odd", "Odd", json!({"properties": {"v": {}}})),
        ];
        assert_eq!(
            render_catalog(&tools),
            "1. Error processing tool\n2. ping(no parameters) - Ping\n3. odd(v: unknown) - Odd"
        );
    }

    #[test]
    fn empty_catalog() {
        assert_eq!(render_catalog(&[]), "");
    }
}
