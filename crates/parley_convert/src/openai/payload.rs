//! Tool result text carried in `tool` message content.
//!
//! OpenAI tool messages have no error flag. Errors travel as
//! `{"error": "..."}`. Successes travel as plain text, except text that would
//! itself read as an envelope, which is wrapped as `{"result": "..."}`.

use parley_core::ToolCallResult;
use serde_json::{Map, Value};

const ERROR_KEY: &str = "error";
const RESULT_KEY: &str = "result";

/// Wire content for a tool result.
pub(crate) fn encode(result: &ToolCallResult) -> String {
    if result.is_error {
        envelope(ERROR_KEY, &result.content)
    } else if decode(&result.content).is_some() {
        envelope(RESULT_KEY, &result.content)
    } else {
        result.content.clone()
    }
}

fn envelope(key: &str, text: &str) -> String {
    let mut map = Map::new();
    map.insert(key.to_string(), Value::String(text.to_string()));
    Value::Object(map).to_string()
}

/// `(is_error, text)` when `content` is exactly a one-key string envelope.
pub(crate) fn decode(content: &str) -> Option<(bool, String)> {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(content) else {
        return None;
    };
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.into_iter().next()?;
    let Value::String(text) = value else {
        return None;
    };
    match key.as_str() {
        ERROR_KEY => Some((true, text)),
        RESULT_KEY => Some((false, text)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(result: &ToolCallResult) -> (bool, String) {
        let wire = encode(result);
        decode(&wire).unwrap_or((false, wire))
    }

    #[test]
    fn test_plain_success_is_sent_verbatim() {
        let result = ToolCallResult::success("c", "grep", "Error: 0 matches is a normal grep line");
        assert_eq!(encode(&result), "Error: 0 matches is a normal grep line");
        assert_eq!(
            round_trip(&result),
            (false, "Error: 0 matches is a normal grep line".to_string())
        );
    }

    #[test]
    fn test_error_is_enveloped() {
        let result = ToolCallResult::error("c", "grep", "no such file");
        assert_eq!(encode(&result), r#"{"error":"no such file"}"#);
        assert_eq!(round_trip(&result), (true, "no such file".to_string()));
    }

    #[test]
    fn test_success_that_looks_like_an_envelope_is_wrapped() {
        for text in [r#"{"error":"x"}"#, r#" {"result": "y"} "#] {
            let result = ToolCallResult::success("c", "echo", text);
            assert_eq!(round_trip(&result), (false, text.to_string()));
        }
    }

    #[test]
    fn test_other_json_is_not_an_envelope() {
        assert_eq!(decode(r#"{"error": 3}"#), None);
        assert_eq!(decode(r#"{"error": "a", "code": 2}"#), None);
        assert_eq!(decode("[1, 2]"), None);
    }
}
