//! Argument coercion from textual tokens to schema-declared types.

use serde_json::{Map, Number, Value};

use crate::tools::{ParamType, ToolDescriptor};
use crate::{Error, Result};

/// Convert positional string tokens into typed arguments, in schema order.
///
/// One token is consumed per declared parameter; surplus tokens are ignored.
pub fn coerce_arguments<S: AsRef<str>>(
    tool: &ToolDescriptor,
    tokens: &[S],
) -> Result<Map<String, Value>> {
    let params = tool.parameters()?;
    if tokens.len() < params.len() {
        return Err(Error::InsufficientArguments {
            tool: tool.name.clone(),
            needed: params.len(),
            given: tokens.len(),
        });
    }

    params
        .iter()
        .zip(tokens)
        .map(|(param, token)| {
            let value = coerce(&param.name, param.kind(), token.as_ref())?;
            Ok((param.name.clone(), value))
        })
        .collect()
}

fn coerce(parameter: &str, kind: ParamType, token: &str) -> Result<Value> {
    let fail = |expected: &'static str, source: Option<Box<dyn std::error::Error + Send + Sync>>| {
        Error::ArgumentCoercion {
            parameter: parameter.to_string(),
            expected,
            value: token.to_string(),
            source,
        }
    };

    match kind {
        ParamType::Integer => token
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| fail("integer", Some(e.into()))),
        ParamType::Number => {
            let n = token
                .trim()
                .parse::<f64>()
                .map_err(|e| fail("number", Some(e.into())))?;
            Number::from_f64(n)
                .map(Value::Number)
                .ok_or_else(|| fail("number", None))
        }
        ParamType::Array => {
            let inner = token.trim().trim_matches(|c: char| c == '[' || c == ']');
            if inner.trim().is_empty() {
                return Ok(Value::Array(Vec::new()));
            }
            inner
                .split(',')
                .map(|item| {
                    item.trim_matches(|c: char| c.is_whitespace() || c == '\'' || c == '"')
                        .parse::<i64>()
                        .map(Value::from)
                        .map_err(|e| fail("array of integers", Some(e.into())))
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        ParamType::Text => Ok(Value::String(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolError;
    use serde_json::json;

    fn tool(properties: Value) -> ToolDescriptor {
        ToolDescriptor::new("t", "test tool", json!({"type": "object", "properties": properties}))
    }

    #[test]
    fn integer_and_array() {
        let t = tool(json!({"n": {"type": "integer"}, "vals": {"type": "array"}}));
        let args = coerce_arguments(&t, &["7", "[1, 2, 3]"]).unwrap();
        assert_eq!(Value::Object(args), json!({"n": 7, "vals": [1, 2, 3]}));
    }

    #[test]
    fn array_elements_may_be_quoted() {
        let t = tool(json!({"vals": {"type": "array"}}));
        let args = coerce_arguments(&t, &["['73', \"78\", 68 ]"]).unwrap();
        assert_eq!(args["vals"], json!([73, 78, 68]));

        let args = coerce_arguments(&t, &["[]"]).unwrap();
        assert_eq!(args["vals"], json!([]));
    }

    #[test]
    fn padded_quoted_elements_are_trimmed() {
        let t = tool(json!({"vals": {"type": "array"}}));
        let args = coerce_arguments(&t, &["[' 73', '78 ', \" 68\" ]"]).unwrap();
        assert_eq!(args["vals"], json!([73, 78, 68]));
    }

    #[test]
    fn number_and_string_pass_through() {
        let t = tool(json!({"x": {"type": "number"}, "s": {"type": "string"}, "u": {}}));
        let args = coerce_arguments(&t, &["2.5", "INDIA", "raw"]).unwrap();
        assert_eq!(Value::Object(args), json!({"x": 2.5, "s": "INDIA", "u": "raw"}));
    }

    #[test]
    fn bad_integer_fails_deterministically() {
        let t = tool(json!({"a": {"type": "integer"}}));
        for _ in 0..2 {
            match coerce_arguments(&t, &["abc"]) {
                Err(Error::ArgumentCoercion {
                    parameter,
                    expected,
                    value,
                    ..
                }) => {
                    assert_eq!(parameter, "a");
                    assert_eq!(expected, "integer");
                    assert_eq!(value, "abc");
                }
                other => panic!("expected coercion error, got {other:?}"),
            }
        }
    }

    #[test]
    fn non_finite_number_is_rejected() {
        let t = tool(json!({"x": {"type": "number"}}));
        assert!(matches!(
            coerce_arguments(&t, &["inf"]),
            Err(Error::ArgumentCoercion { .. })
        ));
    }

    #[test]
    fn bad_array_element_fails() {
        let t = tool(json!({"vals": {"type": "array"}}));
        assert!(matches!(
            coerce_arguments(&t, &["[1, two]"]),
            Err(Error::ArgumentCoercion { .. })
        ));
    }

    #[test]
    fn too_few_tokens() {
        let t = tool(json!({"a": {"type": "integer"}, "b": {"type": "integer"}}));
        match coerce_arguments(&t, &["1"]) {
            Err(Error::InsufficientArguments { tool, needed, given }) => {
                assert_eq!(tool, "t");
                assert_eq!((needed, given), (2, 1));
            }
            other => panic!("expected insufficient arguments, got {other:?}"),
        }
    }

    #[test]
    fn surplus_tokens_are_ignored() {
        let t = tool(json!({"a": {"type": "integer"}}));
        let args = coerce_arguments(&t, &["1", "2", "3"]).unwrap();
        assert_eq!(Value::Object(args), json!({"a": 1}));
    }

    #[test]
    fn malformed_schema_surfaces_as_tool_error() {
        let t = ToolDescriptor::new("t", "", json!(null));
        assert!(matches!(
            coerce_arguments::<&str>(&t, &[]),
            Err(Error::Tool(ToolError::InvalidSchema { .. }))
        ));
    }
}
