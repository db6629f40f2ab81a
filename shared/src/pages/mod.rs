//! Per-endpoint behaviour plugged into the generic controller.

pub mod analyzer;
pub mod chat;
pub mod generator;
pub mod predictor;

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use strum_macros::{Display, EnumIter};

use crate::error::{TransportError, ValidationError};
use crate::transport::RequestBody;
use crate::view::{el, View};

pub use analyzer::AnalyzerPage;
pub use chat::ChatPage;
pub use generator::GeneratorPage;
pub use predictor::PredictorPage;

/// One page's request/response contract: what it sends, where, and how the
/// answer is judged and shown.
pub trait Page {
    /// Raw form or canvas state at submission time.
    type Input;
    /// Validated request content, before encoding.
    type Payload;
    /// JSON body returned by the endpoint.
    type Response: DeserializeOwned;
    /// What a successful response is reduced to for rendering.
    type Output: Clone + Debug + PartialEq;

    const ENDPOINT: &'static str;
    /// Shown when the server reports failure without a message.
    const FAILURE_FALLBACK: &'static str;
    /// Shown when the request never produced a JSON answer.
    const CONNECTIVITY_FALLBACK: &'static str;
    const LOADING_TEXT: &'static str;

    fn validate(&self, input: &Self::Input) -> Result<Self::Payload, ValidationError>;

    fn encode(&self, payload: Self::Payload) -> Result<RequestBody, TransportError>;

    /// `Err(None)` means "failed, no usable server message".
    fn interpret(&self, status: u16, response: Self::Response) -> Result<Self::Output, Option<String>>;

    fn render_success(&self, output: &Self::Output) -> View;

    fn render_idle(&self) -> View {
        View::Empty
    }

    fn render_loading(&self) -> View {
        el("div")
            .class("loading")
            .child(el("span").class("spinner"))
            .child(el("p").class("loading-text").text(Self::LOADING_TEXT))
            .into()
    }

    fn render_error(&self, message: &str) -> View {
        el("div")
            .class("result-error")
            .child(el("span").class("error-icon").text("❌"))
            .child(el("p").class("error-text").text(message))
            .into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum PageKind {
    #[strum(serialize = "손글씨 숫자 인식")]
    Predictor,
    #[strum(serialize = "챗봇")]
    Chat,
    #[strum(serialize = "이미지 분석")]
    Analyzer,
    #[strum(serialize = "이미지 생성")]
    Generator,
}

impl PageKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            PageKind::Predictor => PredictorPage::ENDPOINT,
            PageKind::Chat => ChatPage::ENDPOINT,
            PageKind::Analyzer => AnalyzerPage::ENDPOINT,
            PageKind::Generator => GeneratorPage::ENDPOINT,
        }
    }
}
