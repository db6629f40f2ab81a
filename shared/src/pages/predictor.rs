use strum_macros::Display;

use super::Page;
use crate::api::{PredictRequest, PredictResponse};
use crate::error::{TransportError, ValidationError};
use crate::transport::RequestBody;
use crate::view::{el, View};

/// Handwritten digit recognition from a canvas snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PredictorPage;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Between 0 and 1.
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ConfidenceLevel {
    #[strum(serialize = "매우 높음")]
    VeryHigh,
    #[strum(serialize = "높음")]
    High,
    #[strum(serialize = "보통")]
    Medium,
    #[strum(serialize = "낮음")]
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            ConfidenceLevel::VeryHigh
        } else if score >= 0.7 {
            ConfidenceLevel::High
        } else if score >= 0.5 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

fn label_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Page for PredictorPage {
    /// PNG data URI of the canvas.
    type Input = String;
    type Payload = PredictRequest;
    type Response = PredictResponse;
    type Output = Prediction;

    const ENDPOINT: &'static str = "/predict";
    const FAILURE_FALLBACK: &'static str = "예측 실패";
    const CONNECTIVITY_FALLBACK: &'static str = "서버 연결 오류";
    const LOADING_TEXT: &'static str = "AI가 분석 중입니다...";

    fn validate(&self, input: &String) -> Result<PredictRequest, ValidationError> {
        let image = input.trim();
        if image.is_empty() {
            return Err(ValidationError::MissingImage);
        }
        Ok(PredictRequest { image: image.to_string() })
    }

    fn encode(&self, payload: PredictRequest) -> Result<RequestBody, TransportError> {
        RequestBody::json(&payload)
    }

    fn interpret(&self, _status: u16, response: PredictResponse) -> Result<Prediction, Option<String>> {
        match response.result {
            Some(ref value) if !value.is_null() => Ok(Prediction {
                label: label_text(value),
                confidence: response.confidence.unwrap_or(0.0),
            }),
            _ => Err(response.error),
        }
    }

    fn render_idle(&self) -> View {
        el("p").class("result-placeholder").text("숫자를 그린 뒤 예측하기를 눌러주세요.").into()
    }

    fn render_success(&self, prediction: &Prediction) -> View {
        let level = ConfidenceLevel::from_score(prediction.confidence);
        el("div")
            .class("prediction-result")
            .child(
                el("p")
                    .class("prediction-label")
                    .text("🎯 예측 결과: ")
                    .child(el("span").class("prediction-value").text(prediction.label.as_str())),
            )
            .child(el("p").class("prediction-confidence").text(format!(
                "신뢰도: {:.1}% ({})",
                prediction.confidence * 100.0,
                level
            )))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_level_thresholds() {
        assert_eq!(ConfidenceLevel::from_score(0.95), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_score(0.9), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_score(0.7), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.5), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.49), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::High.to_string(), "높음");
    }

    #[test]
    fn numeric_and_string_labels() {
        let page = PredictorPage;
        let numeric = PredictResponse {
            result: Some(serde_json::json!(7)),
            confidence: Some(0.93),
            error: None,
        };
        assert_eq!(page.interpret(200, numeric).unwrap().label, "7");

        let text = PredictResponse {
            result: Some(serde_json::json!("seven")),
            confidence: None,
            error: None,
        };
        let prediction = page.interpret(200, text).unwrap();
        assert_eq!(prediction.label, "seven");
        assert_eq!(prediction.confidence, 0.0);
    }

    #[test]
    fn null_result_is_failure() {
        let page = PredictorPage;
        let response = PredictResponse {
            result: Some(serde_json::Value::Null),
            confidence: None,
            error: Some("예측 실패".into()),
        };
        assert_eq!(page.interpret(500, response), Err(Some("예측 실패".to_string())));
    }

    #[test]
    fn success_view_shows_label_and_confidence() {
        let view = PredictorPage.render_success(&Prediction { label: "3".into(), confidence: 0.934 });
        assert_eq!(view.find_by_class("prediction-value")[0].children[0], View::Text("3".into()));
        assert_eq!(
            view.find_by_class("prediction-confidence")[0].children[0],
            View::Text("신뢰도: 93.4% (매우 높음)".into())
        );
    }
}
