use super::Page;
use crate::api::{AnalysisItem, AnalyzeResponse};
use crate::error::{TransportError, ValidationError};
use crate::transport::{FormPart, RequestBody};
use crate::view::{el, Element, View};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalyzerPage;

/// An image picked from disk, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Form state. A chosen file wins over the URL field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzeForm {
    pub file: Option<ImageFile>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeSource {
    File(ImageFile),
    Url(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub description: String,
    pub results: Vec<AnalysisItem>,
}

/// Badge tone of a result row, picked from its probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    High,
    Medium,
    Low,
}

impl Tone {
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.5 {
            Tone::High
        } else if probability > 0.2 {
            Tone::Medium
        } else {
            Tone::Low
        }
    }

    fn class(self) -> &'static str {
        match self {
            Tone::High => "badge badge-high",
            Tone::Medium => "badge badge-medium",
            Tone::Low => "badge badge-low",
        }
    }
}

impl AnalyzeForm {
    /// The typed URL, trimmed, when it is what would be analyzed.
    pub fn url_preview(&self) -> Option<&str> {
        let url = self.url.trim();
        (self.file.is_none() && !url.is_empty()).then_some(url)
    }
}

/// Server descriptions are multi-line; keep their line breaks.
fn description(text: &str) -> Element {
    let mut paragraph = el("p").class("analysis-description");
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            paragraph = paragraph.child(el("br"));
        }
        paragraph = paragraph.text(line);
    }
    paragraph
}

impl Page for AnalyzerPage {
    type Input = AnalyzeForm;
    type Payload = AnalyzeSource;
    type Response = AnalyzeResponse;
    type Output = Analysis;

    const ENDPOINT: &'static str = "/analyze";
    const FAILURE_FALLBACK: &'static str = "분석에 실패했습니다.";
    const CONNECTIVITY_FALLBACK: &'static str =
        "요청 중 오류가 발생했습니다. 네트워크를 확인해주세요.";
    const LOADING_TEXT: &'static str = "분석 중...";

    fn validate(&self, form: &AnalyzeForm) -> Result<AnalyzeSource, ValidationError> {
        if let Some(file) = &form.file {
            return Ok(AnalyzeSource::File(file.clone()));
        }
        let url = form.url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingSource);
        }
        Ok(AnalyzeSource::Url(url.to_string()))
    }

    fn encode(&self, source: AnalyzeSource) -> Result<RequestBody, TransportError> {
        let part = match source {
            AnalyzeSource::File(file) => FormPart::file("image", file.name, file.mime_type, file.bytes),
            AnalyzeSource::Url(url) => FormPart::text("image_url", url),
        };
        Ok(RequestBody::Multipart(vec![part]))
    }

    fn interpret(&self, _status: u16, response: AnalyzeResponse) -> Result<Analysis, Option<String>> {
        if !response.success {
            return Err(response.error);
        }
        Ok(Analysis { description: response.description, results: response.results })
    }

    fn render_success(&self, analysis: &Analysis) -> View {
        let header = el("tr").children(
            ["라벨", "확률", "확신도"].map(|title| el("th").text(title)),
        );
        let rows = analysis.results.iter().map(|item| {
            el("tr")
                .class("result-row")
                .child(el("td").class("result-label").text(item.label.as_str()))
                .child(
                    el("td")
                        .class("result-probability")
                        .text(format!("{:.2}%", item.probability * 100.0)),
                )
                .child(
                    el("td").child(
                        el("span")
                            .class(Tone::from_probability(item.probability).class())
                            .text(item.confidence.as_str()),
                    ),
                )
        });

        el("div")
            .class("analysis-result")
            .child(
                el("div")
                    .class("analysis-summary")
                    .child(el("span").class("summary-title").text("분석 결과"))
                    .child(description(&analysis.description)),
            )
            .child(
                el("div")
                    .class("analysis-details")
                    .child(el("h3").text("상세 결과"))
                    .child(
                        el("table")
                            .class("result-table")
                            .child(el("thead").child(header))
                            .child(el("tbody").children(rows)),
                    ),
            )
            .into()
    }
}
