//! Prompt composition: fixed instructions plus the growing transcript.

use crate::transcript::TranscriptEntry;

/// Seed task used when no query is configured.
pub const DEFAULT_QUERY: &str = "Find the ASCII values of characters in INDIA and then return sum of exponentials of those values.";

const NEXT_STEP: &str = "  What should I do next?";

/// Build the system instructions around a rendered tool catalog.
pub fn system_prompt(catalog: &str) -> String {
    format!(
        r#"You are a math agent solving problems in iterations. You have access to various mathematical tools.

Available tools:
{catalog}

You must respond with EXACTLY ONE line in one of these formats (no additional text):
1. For function calls:
   FUNCTION_CALL: function_name|param1|param2|...

2. For final answers:
   FINAL_ANSWER: [number]

Important:
- When a function returns multiple values, you need to process all of them
- Only give FINAL_ANSWER when you have completed all necessary calculations
- After computing the numeric answer, output a tool call using: FUNCTION_CALL: send_answer_email|[numeric answer]
- Do not repeat function calls with the same parameters

Examples:
- FUNCTION_CALL: add|5|3
- FUNCTION_CALL: strings_to_chars_to_int|INDIA
- FINAL_ANSWER: [42]
- FUNCTION_CALL: send_answer_email|42

DO NOT include any explanations or additional text.
Your entire response should be a single line starting with either FUNCTION_CALL: or FINAL_ANSWER:"#
    )
}

/// Extend the previous query with every summary so far.
///
/// The previous query already carries earlier summaries, so the query
/// only ever grows. `limit` keeps just the newest summaries in the
/// appended segment.
pub fn next_query(previous: &str, transcript: &[TranscriptEntry], limit: Option<usize>) -> String {
    let skip = limit.map_or(0, |n| transcript.len().saturating_sub(n));
    let summaries = transcript[skip..]
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    format!("{previous}\n\n{summaries}{NEXT_STEP}")
}

/// The full prompt sent to the model.
pub fn compose(system: &str, query: &str) -> String {
    format!("{system}\n\nQuery: {query}")
}
