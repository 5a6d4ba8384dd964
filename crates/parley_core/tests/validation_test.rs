//! Tests for history integrity checks.

use parley_core::*;
use parley_error::HistoryErrorKind;
use serde_json::json;

fn add_call(id: &str) -> ToolCallRequest {
    ToolCallRequest::new(id, "add")
        .with_arg("first", json!(1))
        .with_arg("second", json!(2))
}

// ============================================================================
// Tool call / result matching
// ============================================================================

#[test]
fn test_orphan_result_is_rejected() {
    let messages = vec![
        Message::user().with_text("add 1 and 2"),
        Message::tool().with_tool_result(ToolCallResult::success("abc", "add", "3")),
    ];

    let err = validate_tool_call_result_matches_request(&messages).unwrap_err();
    assert_eq!(err.kind, HistoryErrorKind::ToolResultMismatch("abc".to_string()));
}

#[test]
fn test_result_in_following_message_matches() {
    let messages = vec![
        Message::user().with_text("add 1 and 2"),
        Message::assistant().with_tool_call(add_call("abc")),
        Message::tool().with_tool_result(ToolCallResult::success("abc", "add", "3")),
    ];

    assert!(validate_tool_call_result_matches_request(&messages).is_ok());
}

#[test]
fn test_result_in_same_message_matches() {
    let message = Message::assistant()
        .with_tool_call(add_call("abc"))
        .with_tool_result(ToolCallResult::success("abc", "add", "3"));

    assert!(validate_tool_call_result_matches_request(&[message]).is_ok());
}

#[test]
fn test_result_before_request_is_rejected() {
    let message = Message::assistant()
        .with_tool_result(ToolCallResult::success("abc", "add", "3"))
        .with_tool_call(add_call("abc"));

    assert!(validate_tool_call_result_matches_request(&[message]).is_err());
}

#[test]
fn test_request_answered_only_once() {
    let messages = vec![
        Message::assistant().with_tool_call(add_call("abc")),
        Message::tool().with_tool_result(ToolCallResult::success("abc", "add", "3")),
        Message::tool().with_tool_result(ToolCallResult::success("abc", "add", "3")),
    ];

    let err = validate_tool_call_result_matches_request(&messages).unwrap_err();
    assert!(matches!(err.kind, HistoryErrorKind::ToolResultMismatch(ref id) if id == "abc"));
}

#[test]
fn test_duplicate_call_id_in_one_message() {
    let message = Message::assistant()
        .with_id("msg_dup")
        .with_tool_call(add_call("abc"))
        .with_tool_call(add_call("abc"));

    let err = validate_tool_call_result_matches_request(&[message]).unwrap_err();
    assert_eq!(
        err.kind,
        HistoryErrorKind::DuplicateToolCallId {
            message_id: "msg_dup".to_string(),
            call_id: "abc".to_string(),
        }
    );
}

#[test]
fn test_call_id_reused_across_messages_awaits_each_result() {
    let messages = vec![
        Message::assistant().with_tool_call(add_call("call_0")),
        Message::user().with_text("also add these"),
        Message::assistant().with_tool_call(add_call("call_0")),
        Message::tool()
            .with_tool_result(ToolCallResult::success("call_0", "add", "3"))
            .with_tool_result(ToolCallResult::success("call_0", "add", "3")),
    ];
    assert!(validate_tool_call_result_matches_request(&messages).is_ok());

    let over_answered = [
        messages.as_slice(),
        &[Message::tool().with_tool_result(ToolCallResult::success("call_0", "add", "3"))],
    ]
    .concat();
    let err = validate_tool_call_result_matches_request(&over_answered).unwrap_err();
    assert_eq!(err.kind, HistoryErrorKind::ToolResultMismatch("call_0".to_string()));
}

#[test]
fn test_unanswered_request_is_allowed() {
    let messages = vec![Message::assistant().with_tool_call(add_call("abc"))];
    assert!(validate_tool_call_result_matches_request(&messages).is_ok());
}

// ============================================================================
// Role alternation
// ============================================================================

#[test]
fn test_alternating_history_has_no_warnings() {
    let messages = vec![
        Message::system().with_text("Be brief."),
        Message::user().with_text("Hi"),
        Message::assistant().with_tool_call(add_call("a")),
        Message::tool().with_tool_result(ToolCallResult::success("a", "add", "3")),
        Message::assistant().with_text("3"),
    ];

    assert!(validate_role_alternation(&messages).is_empty());
}

#[test]
fn test_repeated_user_turns_warn() {
    let messages = vec![
        Message::user().with_text("Hi"),
        Message::system().with_text("ignored"),
        Message::user().with_text("Anyone there?"),
    ];

    let warnings = validate_role_alternation(&messages);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].previous_index, 0);
    assert_eq!(warnings[0].index, 2);
    assert_eq!(warnings[0].side, "user");
}

#[test]
fn test_validate_history_returns_warnings_instead_of_failing() {
    let messages = vec![
        Message::assistant().with_text("Hello"),
        Message::assistant().with_text("Still here"),
    ];

    let warnings = validate_history(&messages).expect("advisory only");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].to_string().contains("model side"));
}

// ============================================================================
// Metadata placement
// ============================================================================

#[test]
fn test_metadata_on_user_message_is_rejected() {
    let metadata = GenerationMetadata::builder()
        .model("gpt-4o")
        .provider(Dialect::OpenAi)
        .build()
        .expect("valid metadata");
    let message = Message::user()
        .with_id("msg_user")
        .with_text("Hi")
        .with_metadata(metadata);

    let err = validate_history(&[message]).unwrap_err();
    assert_eq!(
        err.kind,
        HistoryErrorKind::MetadataOnNonAssistant("msg_user".to_string())
    );
}
