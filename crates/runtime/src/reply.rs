//! Decoding of the model's one-line reply grammar.
//!
//! ```text
//! FUNCTION_CALL: <name>|<param1>|<param2>|...
//! FINAL_ANSWER: [<number>]
//! ```

const FUNCTION_CALL: &str = "FUNCTION_CALL:";
const FINAL_ANSWER: &str = "FINAL_ANSWER:";

/// A decoded model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Invoke `name` with positional textual arguments.
    Call { name: String, args: Vec<String> },
    /// The whole `FINAL_ANSWER:` line, verbatim.
    Final { text: String },
    /// Nothing in the response matched the grammar.
    Malformed,
}

/// Decode the first grammar line in `text`; surrounding lines are dropped.
pub fn parse_reply(text: &str) -> Reply {
    let Some(line) = text
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with(FUNCTION_CALL) || line.starts_with(FINAL_ANSWER))
    else {
        return Reply::Malformed;
    };

    match line.strip_prefix(FUNCTION_CALL) {
        Some(call) => {
            let mut parts = call.split('|').map(|p| p.trim().to_string());
            let name = parts.next().unwrap_or_default();
            Reply::Call {
                name,
                args: parts.collect(),
            }
        }
        None => Reply::Final {
            text: line.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_amid_commentary() {
        assert_eq!(
            parse_reply("blah\nFUNCTION_CALL: add|2|3\nmore blah"),
            Reply::Call {
                name: "add".into(),
                args: vec!["2".into(), "3".into()],
            }
        );
    }

    #[test]
    fn final_answer_is_literal_line() {
        assert_eq!(
            parse_reply("FINAL_ANSWER: [42]"),
            Reply::Final {
                text: "FINAL_ANSWER: [42]".into()
            }
        );
    }

    #[test]
    fn first_matching_line_wins() {
        assert_eq!(
            parse_reply("  FINAL_ANSWER: [1]  \nFUNCTION_CALL: add|1|1"),
            Reply::Final {
                text: "FINAL_ANSWER: [1]".into()
            }
        );
    }

    #[test]
    fn tokens_are_trimmed() {
        assert_eq!(
            parse_reply("FUNCTION_CALL:  int_list_to_exponential_sum | [73, 78, 68] "),
            Reply::Call {
                name: "int_list_to_exponential_sum".into(),
                args: vec!["[73, 78, 68]".into()],
            }
        );
    }

    #[test]
    fn call_without_params() {
        assert_eq!(
            parse_reply("FUNCTION_CALL: ping"),
            Reply::Call {
                name: "ping".into(),
                args: Vec::new(),
            }
        );
    }

    #[test]
    fn no_grammar_line() {
        assert_eq!(parse_reply("I think the answer is 42."), Reply::Malformed);
        assert_eq!(parse_reply(""), Reply::Malformed);
        assert_eq!(parse_reply("say FUNCTION_CALL: add|1|2"), Reply::Malformed);
    }
}
