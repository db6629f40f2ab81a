use thiserror::Error;

/// Input that failed a client-side constraint. The `Display` text is what the
/// page shows; no request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("이미지 데이터가 없습니다.")]
    MissingImage,
    #[error("메시지를 입력해주세요!")]
    EmptyMessage,
    #[error("메시지는 최대 {max}자까지 입력 가능합니다.")]
    MessageTooLong { max: usize },
    #[error("이미지 파일 또는 URL을 입력해주세요.")]
    MissingSource,
    #[error("프롬프트를 입력해주세요.")]
    EmptyPrompt,
    #[error("프롬프트는 최소 {min}자 이상이어야 합니다.")]
    PromptTooShort { min: usize },
    #[error("프롬프트는 최대 {max}자까지 입력 가능합니다.")]
    PromptTooLong { max: usize },
}

/// Failure raised by a `Transport` before any response body was read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Failed to build request: {0}")]
    Build(String),
    #[error("Network error: {0}")]
    Network(String),
}

/// Everything that can go wrong once a request has been issued.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The server answered but the page's success discriminant did not hold.
    #[error("Server rejected request ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RequestError {
    /// Text to show for this failure, given the page's generic fallbacks.
    pub fn user_message(&self, failure_fallback: &str, connectivity_fallback: &str) -> String {
        match self {
            RequestError::Rejected { message: Some(message), .. } if !message.trim().is_empty() => {
                message.clone()
            }
            RequestError::Rejected { .. } => failure_fallback.to_string(),
            RequestError::Transport(_) | RequestError::Decode(_) => {
                connectivity_fallback.to_string()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid client configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid client configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_localized() {
        assert_eq!(ValidationError::EmptyPrompt.to_string(), "프롬프트를 입력해주세요.");
        assert_eq!(
            ValidationError::PromptTooLong { max: 1000 }.to_string(),
            "프롬프트는 최대 1000자까지 입력 가능합니다."
        );
        assert_eq!(
            ValidationError::MessageTooLong { max: 500 }.to_string(),
            "메시지는 최대 500자까지 입력 가능합니다."
        );
    }

    #[test]
    fn rejected_prefers_server_message() {
        let err = RequestError::Rejected { status: 400, message: Some("bad image".into()) };
        assert_eq!(err.user_message("fallback", "offline"), "bad image");

        let err = RequestError::Rejected { status: 500, message: Some("   ".into()) };
        assert_eq!(err.user_message("fallback", "offline"), "fallback");

        let err = RequestError::Rejected { status: 500, message: None };
        assert_eq!(err.user_message("fallback", "offline"), "fallback");
    }

    #[test]
    fn transport_and_decode_use_connectivity_fallback() {
        let err = RequestError::from(TransportError::Network("refused".into()));
        assert_eq!(err.user_message("fallback", "offline"), "offline");

        let decode = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = RequestError::from(decode);
        assert_eq!(err.user_message("fallback", "offline"), "offline");
    }
}
