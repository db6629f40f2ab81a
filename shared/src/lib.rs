pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod pages;
pub mod transport;
pub mod view;

pub use api::{
    AnalysisItem, AnalyzeResponse, ChatRequest, ChatResponse, GenerateRequest, GenerateResponse,
    GenerationSettings, PredictRequest, PredictResponse,
};
pub use config::ClientConfig;
pub use controller::{Controller, Controls, SubmitRejected, UiState};
pub use error::{ConfigError, RequestError, TransportError, ValidationError};
pub use pages::{AnalyzerPage, ChatPage, GeneratorPage, Page, PageKind, PredictorPage};
pub use transport::{FormPart, HttpRequest, HttpResponse, Method, PartValue, RequestBody, Transport};
pub use view::View;
