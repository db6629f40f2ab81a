use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use futures::executor::block_on;
use shared::api::AnalysisItem;
use shared::config::GeneratorConfig;
use shared::pages::analyzer::{AnalyzeForm, Analysis};
use shared::pages::generator::GeneratorForm;
use shared::{
    AnalyzerPage, ChatPage, ClientConfig, Controller, GeneratorPage, HttpRequest, HttpResponse,
    PredictorPage, RequestBody, Transport, TransportError, UiState,
};

/// Replays canned outcomes and records every request it was handed.
#[derive(Default)]
struct ScriptedTransport {
    outcomes: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    sent: RefCell<Vec<HttpRequest>>,
    calls: Cell<usize>,
}

impl ScriptedTransport {
    fn replying(status: u16, body: &str) -> Self {
        let transport = Self::default();
        transport.push(Ok(HttpResponse::new(status, body)));
        transport
    }

    fn failing() -> Self {
        let transport = Self::default();
        transport.push(Err(TransportError::Network("connection refused".into())));
        transport
    }

    fn push(&self, outcome: Result<HttpResponse, TransportError>) {
        self.outcomes.borrow_mut().push_back(outcome);
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.set(self.calls.get() + 1);
        self.sent.borrow_mut().push(request);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
    }
}

fn generator() -> Controller<GeneratorPage> {
    Controller::new(GeneratorPage::new(GeneratorConfig::default()))
}

fn prompt(text: &str) -> GeneratorForm {
    GeneratorForm { prompt: text.to_string(), ..GeneratorForm::from_config(&GeneratorConfig::default()) }
}

#[test]
fn blank_inputs_never_reach_the_network() {
    let transport = ScriptedTransport::replying(200, "{}");

    let mut chat = Controller::new(ChatPage::new(ClientConfig::default().chat));
    for input in ["", "   ", "\n\t"] {
        block_on(chat.submit(&input.to_string(), &transport));
        assert_eq!(chat.state().error_message(), Some("메시지를 입력해주세요!"));
    }

    let mut generate = generator();
    block_on(generate.submit(&prompt(""), &transport));
    assert_eq!(generate.state().error_message(), Some("프롬프트를 입력해주세요."));

    let mut analyze = Controller::new(AnalyzerPage);
    block_on(analyze.submit(&AnalyzeForm::default(), &transport));
    assert_eq!(analyze.state().error_message(), Some("이미지 파일 또는 URL을 입력해주세요."));

    assert_eq!(transport.calls.get(), 0);
}

#[test]
fn over_long_prompt_is_rejected_locally() {
    let transport = ScriptedTransport::replying(200, "{}");
    let mut controller = generator();

    block_on(controller.submit(&prompt(&"x".repeat(1001)), &transport));

    assert_eq!(
        controller.state().error_message(),
        Some("프롬프트는 최대 1000자까지 입력 가능합니다.")
    );
    assert_eq!(transport.calls.get(), 0);
}

#[test]
fn valid_submission_issues_exactly_one_request() {
    let transport = ScriptedTransport::replying(
        200,
        r#"{"success":true,"image_path":"/outputs/sd_v15_1.png","message":"ok"}"#,
    );
    let mut controller = generator();

    block_on(controller.submit(&prompt("sunset"), &transport));

    assert_eq!(transport.calls.get(), 1);
    let sent = transport.sent.borrow();
    assert_eq!(sent[0].path, "/generate");
    let RequestBody::Json(body) = &sent[0].body else { panic!("generator posts JSON") };
    assert_eq!(body["prompt"], "sunset");
    assert_eq!(body["settings"]["num_inference_steps"], 30);
    assert!(body["settings"].get("seed").is_none());

    assert_eq!(
        controller.state().output().map(|image| image.image_path.as_str()),
        Some("/outputs/sd_v15_1.png")
    );
}

#[test]
fn busy_controller_issues_no_additional_requests() {
    let transport = ScriptedTransport::replying(200, r#"{"result":4,"confidence":0.8}"#);
    let mut controller = Controller::new(PredictorPage);

    let request = controller.begin(&"data:image/png;base64,AAAA".to_string()).unwrap();
    assert!(controller.begin(&"data:image/png;base64,AAAA".to_string()).is_err());
    block_on(controller.submit(&"data:image/png;base64,AAAA".to_string(), &transport));
    assert_eq!(transport.calls.get(), 0);

    let outcome = block_on(transport.send(request));
    controller.complete(outcome);
    assert_eq!(transport.calls.get(), 1);
    assert_eq!(controller.state().name(), "success");
}

#[test]
fn analysis_results_render_in_received_order() {
    let body = r#"{
        "success": true,
        "source_type": "url",
        "description": "이 이미지는 고양이로 보입니다.",
        "results": [
            {"label": "tabby", "probability": 0.61, "confidence": "61.00%"},
            {"label": "tiger cat", "probability": 0.22, "confidence": "22.00%"},
            {"label": "Egyptian cat", "probability": 0.09, "confidence": "9.00%"}
        ]
    }"#;
    let transport = ScriptedTransport::replying(200, body);
    let mut controller = Controller::new(AnalyzerPage);
    let form = AnalyzeForm { file: None, url: "https://example.com/cat.jpg".into() };

    block_on(controller.submit(&form, &transport));

    let view = controller.view();
    let labels: Vec<String> =
        view.find_by_class("result-label").iter().map(|cell| cell.text_content()).collect();
    assert_eq!(labels, vec!["tabby", "tiger cat", "Egyptian cat"]);
    assert_eq!(
        controller.state(),
        &UiState::Success(Analysis {
            description: "이 이미지는 고양이로 보입니다.".into(),
            results: vec![
                AnalysisItem { label: "tabby".into(), probability: 0.61, confidence: "61.00%".into() },
                AnalysisItem { label: "tiger cat".into(), probability: 0.22, confidence: "22.00%".into() },
                AnalysisItem { label: "Egyptian cat".into(), probability: 0.09, confidence: "9.00%".into() },
            ],
        })
    );
}

#[test]
fn failure_shows_server_message_or_fallback() {
    let transport = ScriptedTransport::default();
    transport.push(Ok(HttpResponse::new(
        400,
        r#"{"success":false,"error":"URL에서 이미지를 불러오지 못했습니다. URL을 확인해주세요."}"#,
    )));
    transport.push(Ok(HttpResponse::new(500, r#"{"success":false}"#)));

    let mut controller = Controller::new(AnalyzerPage);
    let form = AnalyzeForm { file: None, url: "https://example.com/missing.jpg".into() };

    block_on(controller.submit(&form, &transport));
    let error_text = controller.view().find_by_class("error-text")[0].text_content();
    assert_eq!(error_text, "URL에서 이미지를 불러오지 못했습니다. URL을 확인해주세요.");

    block_on(controller.submit(&form, &transport));
    let error_text = controller.view().find_by_class("error-text")[0].text_content();
    assert_eq!(error_text, "분석에 실패했습니다.");
}

#[test]
fn network_failure_shows_connectivity_message_and_clears_busy() {
    let transport = ScriptedTransport::failing();
    let mut controller = Controller::new(PredictorPage);

    block_on(controller.submit(&"data:image/png;base64,AAAA".to_string(), &transport));

    assert_eq!(controller.state().error_message(), Some("서버 연결 오류"));
    assert!(!controller.is_busy());
    assert!(!controller.controls().submit_disabled);
    assert!(!controller.controls().show_loading);
}

#[test]
fn chat_failure_falls_back_to_apology() {
    let transport = ScriptedTransport::replying(
        500,
        r#"{"response":"오류가 발생했습니다: boom","timestamp":"10:00:00"}"#,
    );
    let mut controller = Controller::new(ChatPage::new(ClientConfig::default().chat));

    block_on(controller.submit(&"안녕".to_string(), &transport));

    assert_eq!(
        controller.state().error_message(),
        Some("죄송합니다. 오류가 발생했습니다. 다시 시도해주세요.")
    );
}
