//! Tests for OpenAI conversion in both directions.

use parley_convert::*;
use parley_core::*;
use parley_error::{ConversionErrorKind, HistoryErrorKind, ParleyErrorKind};
use serde_json::json;

fn converter() -> HistoryConverter {
    HistoryConverter::new(ConversionOptions::default())
}

fn tool_round_history() -> ChatHistory {
    ChatHistory::default().appended(vec![
        Message::system().with_text("You add numbers."),
        Message::user().with_text("What is 1 + 2?"),
        Message::assistant()
            .with_thought("I should call add.")
            .with_tool_call(
                ToolCallRequest::new("call_1", "add")
                    .with_arg("first", json!(1))
                    .with_arg("second", json!(2)),
            ),
        Message::tool().with_tool_result(ToolCallResult::success("call_1", "add", "3")),
        Message::assistant().with_text("3"),
    ])
}

// ============================================================================
// Outbound
// ============================================================================

#[test]
fn test_tool_round_to_openai() {
    let messages = converter().to_openai(&tool_round_history()).expect("convert");
    let value = serde_json::to_value(&messages).expect("serialize");

    assert_eq!(
        value,
        json!([
            {"role": "system", "content": "You add numbers."},
            {"role": "user", "content": "What is 1 + 2?"},
            {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "add", "arguments": "{\"first\":1,\"second\":2}"}
                }]
            },
            {"role": "tool", "content": "3", "tool_call_id": "call_1"},
            {"role": "assistant", "content": "3"}
        ])
    );
}

#[test]
fn test_user_media_parts() {
    let history = ChatHistory::default().appended(vec![
        Message::user()
            .with_text("Compare these")
            .with_media(
                MediaKind::Image,
                vec![
                    Asset::from_url("https://example.com/a.png", "image/png"),
                    Asset::inline("AAAA", "image/jpeg"),
                ],
            )
            .with_media(MediaKind::Audio, vec![Asset::inline("BBBB", "audio/mpeg")])
            .with_document(vec![Asset::from_openai_file("file-9", "application/pdf")]),
    ]);

    let messages = converter().to_openai(&history).expect("convert");
    let value = serde_json::to_value(&messages[0]).expect("serialize");
    assert_eq!(
        value["content"],
        json!([
            {"type": "text", "text": "Compare these"},
            {"type": "image_url", "image_url": {"url": "https://example.com/a.png"}},
            {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,AAAA"}},
            {"type": "input_audio", "input_audio": {"data": "BBBB", "format": "mp3"}},
            {"type": "file", "file": {"file_id": "file-9"}}
        ])
    );
}

#[test]
fn test_local_path_is_unresolved() {
    let history = ChatHistory::default().appended(vec![Message::user().with_media(
        MediaKind::Image,
        vec![Asset::from_path("/tmp/cat.png", "image/png", 10).with_id("asset_local")],
    )]);

    let err = converter().to_openai(&history).unwrap_err();
    match err.kind() {
        ParleyErrorKind::Conversion(e) => assert_eq!(
            e.kind,
            ConversionErrorKind::UnresolvedAsset {
                asset_id: "asset_local".to_string(),
                dialect: "openai".to_string(),
            }
        ),
        other => panic!("Expected conversion error, got {:?}", other),
    }
}

#[test]
fn test_video_is_unsupported() {
    let history = ChatHistory::default().appended(vec![Message::user().with_media(
        MediaKind::Video,
        vec![Asset::from_url("https://example.com/v.mp4", "video/mp4")],
    )]);

    let err = converter().to_openai(&history).unwrap_err();
    assert!(matches!(
        err.kind(),
        ParleyErrorKind::Conversion(e) if matches!(
            &e.kind,
            ConversionErrorKind::UnsupportedContentForRole { content, .. } if content == "video"
        )
    ));
}

#[test]
fn test_tool_call_in_user_message_is_unsupported() {
    let history = ChatHistory::default().appended(vec![
        Message::user().with_tool_call(ToolCallRequest::new("call_1", "add")),
    ]);

    let err = converter().to_openai(&history).unwrap_err();
    assert!(err.to_string().contains("tool_call content is not supported for role 'user'"));
}

#[test]
fn test_orphan_tool_result_is_surfaced() {
    let history = ChatHistory::default().appended(vec![
        Message::user().with_text("Hi"),
        Message::tool().with_tool_result(ToolCallResult::success("abc", "add", "3")),
    ]);

    let err = converter().to_openai(&history).unwrap_err();
    match err.kind() {
        ParleyErrorKind::History(e) => {
            assert_eq!(e.kind, HistoryErrorKind::ToolResultMismatch("abc".to_string()))
        }
        other => panic!("Expected history error, got {:?}", other),
    }
}

#[test]
fn test_oversized_inline_asset_requires_upload() {
    let converter = HistoryConverter::new(ConversionOptions {
        inline_size_threshold_bytes: 4,
    });
    let history = ChatHistory::default().appended(vec![Message::user().with_document(vec![
        Asset::from_bytes(b"0123456789", "application/pdf").with_id("asset_big"),
    ])]);

    let err = converter.to_openai(&history).unwrap_err();
    assert!(matches!(
        err.kind(),
        ParleyErrorKind::Conversion(e) if e.kind == ConversionErrorKind::AssetRequiresUpload {
            asset_id: "asset_big".to_string(),
            size_bytes: 10,
            threshold: 4,
        }
    ));
}

#[test]
fn test_tool_result_files_follow_in_user_message() {
    let history = ChatHistory::default().appended(vec![
        Message::assistant().with_tool_call(ToolCallRequest::new("call_1", "render")),
        Message::tool().with_tool_result(
            ToolCallResult::error("call_1", "render", "partial output")
                .with_assets(vec![Asset::inline("AAAA", "image/png")]),
        ),
    ]);

    let messages = converter().to_openai(&history).expect("convert");
    assert_eq!(messages.len(), 3);
    assert_eq!(
        messages[1],
        OpenAiMessage::Tool {
            content: OpenAiContent::Text(r#"{"error":"partial output"}"#.to_string()),
            tool_call_id: "call_1".to_string(),
        }
    );
    let OpenAiMessage::User {
        content: OpenAiContent::Parts(parts),
        ..
    } = &messages[2]
    else {
        panic!("Expected user message with parts");
    };
    assert!(matches!(
        &parts[1],
        OpenAiContentPart::ImageUrl { image_url } if image_url.url == "data:image/png;base64,AAAA"
    ));
}

#[test]
fn test_thought_only_assistant_message_is_skipped() {
    let history = ChatHistory::default().appended(vec![
        Message::user().with_text("hi"),
        Message::assistant().with_thought("Nothing to say yet."),
    ]);

    let messages = converter().to_openai(&history).expect("convert");
    assert_eq!(messages.len(), 1);
    assert!(matches!(messages[0], OpenAiMessage::User { .. }));
    assert_eq!(
        converter().to_genai(&history).expect("convert").contents.len(),
        messages.len()
    );
}

// ============================================================================
// Inbound
// ============================================================================

#[test]
fn test_messages_round_trip() {
    let converter = converter();
    let original = tool_round_history();
    let native = converter.to_openai(&original).expect("convert");
    let back = converter.messages_from_openai(&native).expect("parse");

    assert_eq!(back.len(), 5);
    assert_eq!(*back[0].role(), Role::System);
    let calls: Vec<_> = back[2].tool_calls().collect();
    assert_eq!(calls[0].args["second"], json!(2));
    let results: Vec<_> = back[3].tool_results().collect();
    assert_eq!(results[0].name, "add");
    assert_eq!(results[0].content, "3");
    assert!(!results[0].is_error);
    assert_eq!(back[4].content()[0].as_text(), Some("3"));
}

#[test]
fn test_consecutive_tool_messages_merge() {
    let native: Vec<OpenAiMessage> = serde_json::from_value(json!([
        {
            "role": "assistant",
            "content": null,
            "tool_calls": [
                {"id": "a", "type": "function", "function": {"name": "left", "arguments": "{}"}},
                {"id": "b", "type": "function", "function": {"name": "right", "arguments": ""}}
            ]
        },
        {"role": "tool", "content": "L", "tool_call_id": "a"},
        {"role": "tool", "content": "{\"error\": \"R failed\"}", "tool_call_id": "b"}
    ]))
    .expect("valid messages");

    let messages = converter().messages_from_openai(&native).expect("parse");
    assert_eq!(messages.len(), 2);
    let results: Vec<_> = messages[1].tool_results().collect();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].name, "right");
    assert!(results[1].is_error);
    assert_eq!(results[1].content, "R failed");
}

#[test]
fn test_user_parts_inbound() {
    let native: Vec<OpenAiMessage> = serde_json::from_value(json!([{
        "role": "user",
        "name": "alice",
        "content": [
            {"type": "text", "text": "see"},
            {"type": "image_url", "image_url": {"url": "https://example.com/a.jpg"}},
            {"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}},
            {"type": "file", "file": {"file_data": "data:application/pdf;base64,BBBB", "filename": "a.pdf"}}
        ]
    }]))
    .expect("valid messages");

    let messages = converter().messages_from_openai(&native).expect("parse");
    let message = &messages[0];
    assert_eq!(message.name().as_deref(), Some("alice"));
    assert_eq!(message.content().len(), 3);
    match &message.content()[1] {
        ContentItem::Media { kind, assets } => {
            assert_eq!(*kind, MediaKind::Image);
            assert_eq!(assets.len(), 2);
            assert_eq!(assets[0].mime_type(), "image/jpeg");
            assert_eq!(assets[1].data_base64().as_deref(), Some("AAAA"));
        }
        other => panic!("Expected image media, got {:?}", other),
    }
    assert!(matches!(&message.content()[2], ContentItem::Document { assets } if assets[0].mime_type() == "application/pdf"));
}

#[test]
fn test_invalid_arguments() {
    let native: Vec<OpenAiMessage> = serde_json::from_value(json!([{
        "role": "assistant",
        "content": null,
        "tool_calls": [{"id": "x", "type": "function", "function": {"name": "f", "arguments": "[1, 2]"}}]
    }]))
    .expect("valid messages");

    let err = converter().messages_from_openai(&native).unwrap_err();
    assert!(matches!(err.kind, ConversionErrorKind::InvalidToolArguments { ref call_id, .. } if call_id == "x"));
}

#[test]
fn test_completion_becomes_model_turn() {
    let completion: ChatCompletion = serde_json::from_value(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": "Let me add.",
                "reasoning_content": "Need the add tool.",
                "tool_calls": [{
                    "id": "call_7",
                    "type": "function",
                    "function": {"name": "add", "arguments": "{\"first\": 1.5, \"second\": 2}"}
                }]
            },
            "finish_reason": "tool_calls"
        }],
        "usage": {"prompt_tokens": 20, "completion_tokens": 10, "total_tokens": 30}
    }))
    .expect("valid completion");

    let history = ChatHistory::default().appended(vec![Message::user().with_text("1.5 + 2?")]);
    let turn = converter()
        .from_openai(&completion, &history, Some(120))
        .expect("absorb");

    assert_eq!(turn.delta.len(), 1);
    assert_eq!(turn.history.messages().len(), 2);
    assert_eq!(history.messages().len(), 1);

    let message = &turn.delta[0];
    assert_eq!(*message.role(), Role::Assistant);
    assert!(message.content()[0].is_thought());
    assert_eq!(message.content()[1].as_text(), Some("Let me add."));
    assert_eq!(message.tool_calls().next().map(|c| c.id.as_str()), Some("call_7"));

    let metadata = message.metadata().as_ref().expect("metadata");
    assert_eq!(metadata.model(), "gpt-4o");
    assert_eq!(*metadata.provider(), Dialect::OpenAi);
    assert_eq!(*metadata.finish_reason(), Some(FinishReason::ToolCalls));
    assert_eq!(*metadata.latency_ms(), Some(120));
    assert_eq!(metadata.usage().map(|u| *u.output_tokens()), Some(10));
}

#[test]
fn test_completion_without_choices_is_malformed() {
    let completion = ChatCompletion {
        id: "x".to_string(),
        model: "gpt-4o".to_string(),
        choices: Vec::new(),
        usage: None,
    };

    let err = converter()
        .from_openai(&completion, &ChatHistory::default(), None)
        .unwrap_err();
    assert!(matches!(err.kind, ConversionErrorKind::MalformedResponse(_)));
}

// ============================================================================
// Round trips
// ============================================================================

/// Asset ids travel only in file part names; everything else must survive.
fn without_asset_ids(items: &[ContentItem]) -> Vec<ContentItem> {
    let strip = |assets: &[Asset]| -> Vec<Asset> {
        assets.iter().map(|a| a.clone().with_id("")).collect()
    };
    items
        .iter()
        .map(|item| match item {
            ContentItem::Media { kind, assets } => ContentItem::media(*kind, strip(assets)),
            ContentItem::Document { assets } => ContentItem::document(strip(assets)),
            ContentItem::ToolResult(result) => ContentItem::ToolResult(ToolCallResult {
                assets: strip(&result.assets),
                ..result.clone()
            }),
            other => other.clone(),
        })
        .collect()
}

#[test]
fn test_each_supported_item_survives_round_trip() {
    let original = ChatHistory::default().appended(vec![
        Message::user()
            .with_text("Compare these")
            .with_media(
                MediaKind::Image,
                vec![
                    Asset::from_url("https://example.com/cat.png", "image/png"),
                    Asset::inline("AAAA", "image/png"),
                ],
            )
            .with_media(MediaKind::Audio, vec![Asset::inline("UklG", "audio/wav")])
            .with_document(vec![Asset::inline("JVBE", "application/pdf").with_id("asset_report")]),
        Message::assistant()
            .with_text("Searching.")
            .with_tool_call(ToolCallRequest::new("c1", "grep").with_arg("pattern", json!("cat")))
            .with_tool_call(ToolCallRequest::new("c2", "grep").with_arg("pattern", json!(["a", 1])))
            .with_tool_call(ToolCallRequest::new("c3", "grep")),
        Message::tool()
            .with_tool_result(ToolCallResult::success("c1", "grep", "cat.png:1"))
            .with_tool_result(ToolCallResult::error("c2", "grep", "bad pattern"))
            .with_tool_result(ToolCallResult::success("c3", "grep", r#"{"error":"logged text"}"#)),
    ]);

    let converter = converter();
    let native = converter.to_openai(&original).expect("convert");
    let back = converter.messages_from_openai(&native).expect("parse");

    assert_eq!(back.len(), original.messages().len());
    for (parsed, sent) in back.iter().zip(original.messages()) {
        assert_eq!(parsed.role(), sent.role());
        assert_eq!(
            without_asset_ids(parsed.content()),
            without_asset_ids(sent.content())
        );
    }
    assert_eq!(back[0].content()[3], original.messages()[0].content()[3]);
}

#[test]
fn test_success_text_starting_with_error_stays_success() {
    let result = ToolCallResult::success("call_1", "grep", "Error: 0 matches is a normal grep line");
    let history = ChatHistory::default().appended(vec![
        Message::assistant().with_tool_call(ToolCallRequest::new("call_1", "grep")),
        Message::tool().with_tool_result(result.clone()),
    ]);

    let converter = converter();
    let native = converter.to_openai(&history).expect("convert");
    let back = converter.messages_from_openai(&native).expect("parse");

    assert_eq!(back[1].tool_results().next(), Some(&result));
}
