//! OpenAI chat completions dialect.

mod inbound;
mod outbound;
mod payload;
mod types;

pub(crate) use inbound::{message_from_completion, messages_from_openai};
pub(crate) use outbound::to_openai;
pub use types::{
    ChatChoice, ChatCompletion, OpenAiContent, OpenAiContentPart, OpenAiFile, OpenAiFunctionCall,
    OpenAiImageUrl, OpenAiInputAudio, OpenAiMessage, OpenAiToolCall, OpenAiUsage,
};

#[cfg(test)]
mod tests {
    use super::outbound::audio_format;

    #[test]
    fn test_audio_format() {
        assert_eq!(audio_format("audio/mpeg"), "mp3");
        assert_eq!(audio_format("audio/x-wav"), "wav");
        assert_eq!(audio_format("audio/flac"), "flac");
    }
}
