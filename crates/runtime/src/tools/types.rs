//! Tool-related types.

use super::ToolError;
use serde_json::{Map, Value};
use std::fmt;

/// A tool exposed by the tool host.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// JSON Schema for the input; parameters live under `properties`.
    pub input_schema: Value,
}

/// A single declared parameter, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// The raw `type` from the schema, if any.
    pub declared: Option<String>,
}

/// How a textual token is converted for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Integer,
    Number,
    Array,
    Text,
}

impl Parameter {
    pub fn kind(&self) -> ParamType {
        match self.declared.as_deref() {
            Some("integer") => ParamType::Integer,
            Some("number") => ParamType::Number,
            Some("array") => ParamType::Array,
            _ => ParamType::Text,
        }
    }
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> ToolError {
        ToolError::InvalidSchema {
            tool: self.name.clone(),
            reason: reason.into(),
        }
    }

    /// The `properties` object, or `None` when the schema declares none.
    fn properties(&self) -> Result<Option<&Map<String, Value>>, ToolError> {
        let schema = self
            .input_schema
            .as_object()
            .ok_or_else(|| self.invalid("schema is not an object"))?;
        match schema.get("properties") {
            None => Ok(None),
            Some(Value::Object(props)) => Ok(Some(props)),
            Some(_) => Err(self.invalid("`properties` is not an object")),
        }
    }

    /// Whether the schema has a `properties` entry at all.
    pub fn declares_properties(&self) -> Result<bool, ToolError> {
        Ok(self.properties()?.is_some())
    }

    /// Declared parameters in schema order.
    pub fn parameters(&self) -> Result<Vec<Parameter>, ToolError> {
        let Some(props) = self.properties()? else {
            return Ok(Vec::new());
        };
        props
            .iter()
            .map(|(name, info)| {
                let info = info
                    .as_object()
                    .ok_or_else(|| self.invalid(format!("parameter `{name}` is not an object")))?;
                Ok(Parameter {
                    name: name.clone(),
                    declared: info.get("type").and_then(Value::as_str).map(str::to_string),
                })
            })
            .collect()
    }
}

/// What a tool call returned, normalized to text.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// One string per content item.
    Items(Vec<String>),
    /// A result with no content items, stringified.
    Raw(String),
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Items(items) => write!(f, "{items:?}"),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}
