//! Per-iteration records folded back into later prompts.

use serde_json::{Map, Value};
use std::fmt;

use crate::tools::ToolOutput;

/// One successful tool dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    /// 1-based iteration number.
    pub index: usize,
    pub tool: String,
    pub arguments: Map<String, Value>,
    pub result: ToolOutput,
}

/// An entry in the session transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    Call(IterationRecord),
    FinalAnswer { index: usize, text: String },
    Error { index: usize, message: String },
}

impl TranscriptEntry {
    pub fn index(&self) -> usize {
        match self {
            Self::Call(record) => record.index,
            Self::FinalAnswer { index, .. } | Self::Error { index, .. } => *index,
        }
    }
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call(record) => write!(
                f,
                "In the {} iteration you called {} with {} parameters, and the function returned {}.",
                record.index,
                record.tool,
                Value::Object(record.arguments.clone()),
                record.result
            ),
            Self::FinalAnswer { text, .. } => write!(f, "FINAL_ANSWER received: {text}"),
            Self::Error { index, message } => write!(f, "Error in iteration {index}: {message}"),
        }
    }
}

/// The most recent thing the loop learned.
#[derive(Debug, Clone, PartialEq)]
pub enum LastResult {
    Tool(ToolOutput),
    FinalAnswer(String),
}

impl fmt::Display for LastResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tool(output) => fmt::Display::fmt(output, f),
            Self::FinalAnswer(text) => f.write_str(text),
        }
    }
}
