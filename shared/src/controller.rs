//! The submit → request → render cycle shared by every page.
//!
//! A [`Controller`] owns the busy flag of one page. The event-driven UI calls
//! [`Controller::begin`] when the user submits, ships the returned request on
//! its own, and feeds the outcome back through [`Controller::complete`].
//! [`Controller::submit`] runs the same cycle against a [`Transport`] in one
//! call.

use log::{debug, warn};
use thiserror::Error;

use crate::error::{RequestError, TransportError, ValidationError};
use crate::pages::Page;
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::view::View;

#[derive(Debug, Clone, PartialEq)]
pub enum UiState<O> {
    Idle,
    Busy,
    Success(O),
    Error(String),
}

impl<O> UiState<O> {
    pub fn name(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Busy => "busy",
            UiState::Success(_) => "success",
            UiState::Error(_) => "error",
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, UiState::Busy)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn output(&self) -> Option<&O> {
        match self {
            UiState::Success(output) => Some(output),
            _ => None,
        }
    }
}

/// How the triggering control should look right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub submit_disabled: bool,
    pub show_loading: bool,
    /// Leaving the page would drop an in-flight request.
    pub confirm_unload: bool,
}

/// Why a submission did not produce a request.
#[derive(Debug, Error)]
pub enum SubmitRejected {
    #[error("a request is already in flight")]
    Busy,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Build(#[from] TransportError),
}

pub struct Controller<P: Page> {
    page: P,
    state: UiState<P::Output>,
}

impl<P: Page> Controller<P> {
    pub fn new(page: P) -> Self {
        Self { page, state: UiState::Idle }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn state(&self) -> &UiState<P::Output> {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn controls(&self) -> Controls {
        let busy = self.is_busy();
        Controls { submit_disabled: busy, show_loading: busy, confirm_unload: busy }
    }

    /// Validates `input` and, if the controller is free, moves to Busy and
    /// returns the one request to send. A submission while Busy changes
    /// nothing.
    pub fn begin(&mut self, input: &P::Input) -> Result<HttpRequest, SubmitRejected> {
        if self.is_busy() {
            debug!("{}: submission ignored, request in flight", P::ENDPOINT);
            return Err(SubmitRejected::Busy);
        }

        let payload = match self.page.validate(input) {
            Ok(payload) => payload,
            Err(e) => {
                debug!("{}: rejected locally: {}", P::ENDPOINT, e);
                self.state = UiState::Error(e.to_string());
                return Err(e.into());
            }
        };

        let body = match self.page.encode(payload) {
            Ok(body) => body,
            Err(e) => {
                warn!("{}: could not encode request: {}", P::ENDPOINT, e);
                self.state = UiState::Error(P::CONNECTIVITY_FALLBACK.to_string());
                return Err(e.into());
            }
        };

        self.state = UiState::Busy;
        debug!("{}: busy", P::ENDPOINT);
        Ok(HttpRequest::post(P::ENDPOINT, body))
    }

    /// Applies the outcome of the request issued by [`begin`](Self::begin).
    /// Always leaves Busy. Outcomes arriving while not Busy are dropped.
    pub fn complete(
        &mut self,
        outcome: Result<HttpResponse, TransportError>,
    ) -> &UiState<P::Output> {
        if !self.is_busy() {
            warn!(
                "{}: ignoring completion while {}",
                P::ENDPOINT,
                self.state.name()
            );
            return &self.state;
        }

        self.state = match self.resolve(outcome) {
            Ok(output) => UiState::Success(output),
            Err(e) => {
                warn!("{}: request failed: {}", P::ENDPOINT, e);
                UiState::Error(e.user_message(P::FAILURE_FALLBACK, P::CONNECTIVITY_FALLBACK))
            }
        };
        debug!("{}: {}", P::ENDPOINT, self.state.name());
        &self.state
    }

    fn resolve(
        &self,
        outcome: Result<HttpResponse, TransportError>,
    ) -> Result<P::Output, RequestError> {
        let response = outcome?;
        let parsed: P::Response = serde_json::from_str(&response.body)?;
        self.page
            .interpret(response.status, parsed)
            .map_err(|message| RequestError::Rejected { status: response.status, message })
    }

    /// Whole cycle against `transport`. Rejected submissions return the state
    /// they left behind.
    pub async fn submit<T: Transport>(
        &mut self,
        input: &P::Input,
        transport: &T,
    ) -> &UiState<P::Output> {
        match self.begin(input) {
            Ok(request) => {
                let outcome = transport.send(request).await;
                self.complete(outcome)
            }
            Err(_) => &self.state,
        }
    }

    /// Back to Idle, unless a request is in flight.
    pub fn reset(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.state = UiState::Idle;
        true
    }

    pub fn view(&self) -> View {
        match &self.state {
            UiState::Idle => self.page.render_idle(),
            UiState::Busy => self.page.render_loading(),
            UiState::Success(output) => self.page.render_success(output),
            UiState::Error(message) => self.page.render_error(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{GeneratorPage, PredictorPage};
    use crate::config::GeneratorConfig;
    use crate::pages::generator::GeneratorForm;
    use crate::transport::RequestBody;
    use serde_json::json;

    fn predictor() -> Controller<PredictorPage> {
        Controller::new(PredictorPage)
    }

    #[test]
    fn starts_idle_with_enabled_controls() {
        let controller = predictor();
        assert_eq!(controller.state(), &UiState::Idle);
        assert_eq!(
            controller.controls(),
            Controls { submit_disabled: false, show_loading: false, confirm_unload: false }
        );
        assert_eq!(controller.view().text_content(), "숫자를 그린 뒤 예측하기를 눌러주세요.");
    }

    #[test]
    fn begin_moves_to_busy_and_builds_request() {
        let mut controller = predictor();
        let request = controller.begin(&"data:image/png;base64,AAAA".to_string()).unwrap();

        assert_eq!(request.path, "/predict");
        assert_eq!(request.body, RequestBody::Json(json!({"image": "data:image/png;base64,AAAA"})));
        assert!(controller.is_busy());
        assert!(controller.controls().submit_disabled);
        assert!(controller.controls().show_loading);
        assert!(controller.controls().confirm_unload);
        assert!(controller.view().text_content().contains("AI가 분석 중입니다..."));
    }

    #[test]
    fn second_begin_while_busy_is_a_no_op() {
        let mut controller = predictor();
        controller.begin(&"data:image/png;base64,AAAA".to_string()).unwrap();

        let second = controller.begin(&"data:image/png;base64,BBBB".to_string());
        assert!(matches!(second, Err(SubmitRejected::Busy)));
        assert!(controller.is_busy());
    }

    #[test]
    fn busy_check_precedes_validation() {
        let mut controller = predictor();
        controller.begin(&"data:image/png;base64,AAAA".to_string()).unwrap();

        let invalid = controller.begin(&String::new());
        assert!(matches!(invalid, Err(SubmitRejected::Busy)));
        assert!(controller.is_busy());
    }

    #[test]
    fn invalid_input_goes_straight_to_error() {
        let mut controller = predictor();
        let rejected = controller.begin(&"   ".to_string());

        assert!(matches!(rejected, Err(SubmitRejected::Invalid(ValidationError::MissingImage))));
        assert_eq!(controller.state().error_message(), Some("이미지 데이터가 없습니다."));
        assert!(!controller.controls().submit_disabled);
    }

    #[test]
    fn completion_without_pending_request_is_ignored() {
        let mut controller = predictor();
        let state = controller.complete(Ok(HttpResponse::new(200, r#"{"result":3,"confidence":0.9}"#)));
        assert_eq!(state, &UiState::Idle);
    }

    #[test]
    fn success_then_error_then_success() {
        let mut controller = predictor();

        controller.begin(&"data:a".to_string()).unwrap();
        controller.complete(Ok(HttpResponse::new(200, r#"{"result":7,"confidence":0.95}"#)));
        assert_eq!(controller.state().name(), "success");

        controller.begin(&"data:b".to_string()).unwrap();
        controller.complete(Ok(HttpResponse::new(400, r#"{"error":"이미지 전처리 실패"}"#)));
        assert_eq!(controller.state().error_message(), Some("이미지 전처리 실패"));

        controller.begin(&"data:c".to_string()).unwrap();
        controller.complete(Ok(HttpResponse::new(200, r#"{"result":1,"confidence":0.4}"#)));
        assert_eq!(controller.state().output().map(|p| p.label.as_str()), Some("1"));
    }

    #[test]
    fn non_json_body_uses_connectivity_fallback() {
        let mut controller = predictor();
        controller.begin(&"data:a".to_string()).unwrap();
        controller.complete(Ok(HttpResponse::new(502, "<html>Bad Gateway</html>")));

        assert_eq!(controller.state().error_message(), Some("서버 연결 오류"));
        assert!(!controller.is_busy());
    }

    #[test]
    fn reset_refuses_while_busy() {
        let mut controller = Controller::new(GeneratorPage::new(GeneratorConfig::default()));
        let mut form = GeneratorForm::from_config(&GeneratorConfig::default());
        form.prompt = "sunset".into();

        controller.begin(&form).unwrap();
        assert!(!controller.reset());
        assert!(controller.is_busy());

        controller.complete(Err(TransportError::Network("offline".into())));
        assert!(!controller.controls().confirm_unload);
        assert!(controller.reset());
        assert_eq!(controller.state(), &UiState::Idle);
    }
}
