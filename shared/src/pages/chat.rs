use super::Page;
use crate::api::{ChatRequest, ChatResponse};
use crate::config::ChatConfig;
use crate::error::{TransportError, ValidationError};
use crate::transport::{is_success, RequestBody};
use crate::view::{el, View};

pub const WELCOME_MESSAGE: &str =
    "안녕하세요! 저는 간단한 챗봇입니다. 무엇이든 물어보세요. 😊";

#[derive(Debug, Clone, PartialEq)]
pub struct ChatPage {
    config: ChatConfig,
}

impl ChatPage {
    pub fn new(config: ChatConfig) -> Self {
        Self { config }
    }

    pub fn max_length(&self) -> usize {
        self.config.max_length
    }

    pub fn char_count_label(&self, length: usize) -> String {
        format!("{}/{}", length, self.config.max_length)
    }

    /// Counter colour: red near the limit, orange when getting close.
    pub fn char_count_class(&self, length: usize) -> &'static str {
        if length > self.config.danger_length {
            "char-count char-count-danger"
        } else if length > self.config.warn_length {
            "char-count char-count-warn"
        } else {
            "char-count"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub text: String,
    pub timestamp: String,
}

impl Page for ChatPage {
    type Input = String;
    type Payload = ChatRequest;
    type Response = ChatResponse;
    type Output = ChatReply;

    const ENDPOINT: &'static str = "/chat";
    const FAILURE_FALLBACK: &'static str = "죄송합니다. 오류가 발생했습니다. 다시 시도해주세요.";
    const CONNECTIVITY_FALLBACK: &'static str =
        "죄송합니다. 오류가 발생했습니다. 다시 시도해주세요.";
    const LOADING_TEXT: &'static str = "챗봇이 답변을 준비하고 있습니다...";

    fn validate(&self, input: &String) -> Result<ChatRequest, ValidationError> {
        let message = input.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        if message.chars().count() > self.config.max_length {
            return Err(ValidationError::MessageTooLong { max: self.config.max_length });
        }
        Ok(ChatRequest { message: message.to_string() })
    }

    fn encode(&self, payload: ChatRequest) -> Result<RequestBody, TransportError> {
        RequestBody::json(&payload)
    }

    /// Any non-2xx answer counts as a failure, whatever its body says.
    fn interpret(&self, status: u16, response: ChatResponse) -> Result<ChatReply, Option<String>> {
        if !is_success(status) {
            return Err(None);
        }
        match response.response {
            Some(text) => Ok(ChatReply { text, timestamp: response.timestamp.unwrap_or_default() }),
            None => Err(None),
        }
    }

    fn render_success(&self, reply: &ChatReply) -> View {
        bubble(Sender::Bot, &reply.text, &reply.timestamp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub sender: Sender,
    pub text: String,
    pub timestamp: String,
}

/// The conversation shown above the input box, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<ChatEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn push_user(&mut self, text: impl Into<String>, timestamp: impl Into<String>) {
        self.entries.push(ChatEntry { sender: Sender::User, text: text.into(), timestamp: timestamp.into() });
    }

    pub fn push_bot(&mut self, text: impl Into<String>, timestamp: impl Into<String>) {
        self.entries.push(ChatEntry { sender: Sender::Bot, text: text.into(), timestamp: timestamp.into() });
    }

    pub fn render(&self) -> View {
        el("div")
            .class("chat-messages")
            .children(self.entries.iter().map(|e| bubble(e.sender, &e.text, &e.timestamp)))
            .into()
    }
}

fn bubble(sender: Sender, text: &str, timestamp: &str) -> View {
    let side = match sender {
        Sender::User => "message message-user",
        Sender::Bot => "message message-bot",
    };
    el("div")
        .class(side)
        .child(
            el("div")
                .class("bubble")
                .child(el("div").class("message-text").text(text))
                .child(el("div").class("message-time").text(timestamp)),
        )
        .into()
}
