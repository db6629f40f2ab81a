use std::str::FromStr;

use super::Page;
use crate::api::{GenerateRequest, GenerateResponse, GenerationSettings};
use crate::config::{GeneratorConfig, SettingsBounds};
use crate::error::{TransportError, ValidationError};
use crate::transport::{is_success, RequestBody};
use crate::view::{el, View};

const UNKNOWN_ERROR: &str = "알 수 없는 오류가 발생했습니다.";

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorPage {
    config: GeneratorConfig,
}

impl GeneratorPage {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

/// Raw field values as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorForm {
    pub prompt: String,
    pub steps: String,
    pub guidance: String,
    pub width: String,
    pub height: String,
    pub model_id: String,
    pub seed: String,
}

impl GeneratorForm {
    /// The form as it looks on first load and after a reset.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let defaults = &config.defaults;
        Self {
            prompt: config.default_prompt.clone(),
            steps: defaults.num_inference_steps.to_string(),
            guidance: defaults.guidance_scale.to_string(),
            width: defaults.width.to_string(),
            height: defaults.height.to_string(),
            model_id: defaults.model_id.clone(),
            seed: String::new(),
        }
    }

    /// Parses the numeric fields. Blank, unparsable or non-positive values
    /// fall back to the configured default; the rest are clamped into bounds.
    pub fn settings(&self, config: &GeneratorConfig) -> GenerationSettings {
        let defaults = &config.defaults;
        let SettingsBounds { steps, guidance, size } = config.bounds;

        let model_id = self.model_id.trim();
        let seed = self.seed.trim();

        GenerationSettings {
            num_inference_steps: positive_or(&self.steps, defaults.num_inference_steps)
                .clamp(steps.0, steps.1),
            guidance_scale: positive_or(&self.guidance, defaults.guidance_scale)
                .clamp(guidance.0, guidance.1),
            width: positive_or(&self.width, defaults.width).clamp(size.0, size.1),
            height: positive_or(&self.height, defaults.height).clamp(size.0, size.1),
            model_id: if model_id.is_empty() {
                defaults.model_id.clone()
            } else {
                model_id.to_string()
            },
            seed: if seed.is_empty() { None } else { seed.parse().ok() },
            output_prefix: defaults.output_prefix.clone(),
        }
    }
}

fn positive_or<T>(raw: &str, default: T) -> T
where
    T: FromStr + PartialOrd + Default + Copy,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => value,
        _ => default,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub image_path: String,
    pub download_name: String,
}

impl GeneratedImage {
    fn new(image_path: String) -> Self {
        let download_name = image_path
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("generated_image.png")
            .to_string();
        Self { image_path, download_name }
    }
}

impl Page for GeneratorPage {
    type Input = GeneratorForm;
    type Payload = GenerateRequest;
    type Response = GenerateResponse;
    type Output = GeneratedImage;

    const ENDPOINT: &'static str = "/generate";
    const FAILURE_FALLBACK: &'static str = "이미지 생성에 실패했습니다.";
    const CONNECTIVITY_FALLBACK: &'static str =
        "서버와 통신 중 오류가 발생했습니다. 네트워크를 확인해주세요.";
    const LOADING_TEXT: &'static str = "이미지를 생성하고 있습니다... 잠시만 기다려주세요.";

    fn validate(&self, form: &GeneratorForm) -> Result<GenerateRequest, ValidationError> {
        let prompt = form.prompt.trim();
        let length = prompt.chars().count();
        if length == 0 {
            return Err(ValidationError::EmptyPrompt);
        }
        if length < self.config.prompt_min {
            return Err(ValidationError::PromptTooShort { min: self.config.prompt_min });
        }
        if length > self.config.prompt_max {
            return Err(ValidationError::PromptTooLong { max: self.config.prompt_max });
        }
        Ok(GenerateRequest { prompt: prompt.to_string(), settings: form.settings(&self.config) })
    }

    fn encode(&self, payload: GenerateRequest) -> Result<RequestBody, TransportError> {
        RequestBody::json(&payload)
    }

    fn interpret(&self, status: u16, response: GenerateResponse) -> Result<GeneratedImage, Option<String>> {
        if !is_success(status) {
            let message = response
                .error
                .or_else(|| (!response.errors.is_empty()).then(|| response.errors.join(", ")))
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            return Err(Some(message));
        }
        match (response.success, response.image_path) {
            (true, Some(path)) => Ok(GeneratedImage::new(path)),
            _ => Err(response.error),
        }
    }

    fn render_idle(&self) -> View {
        el("div")
            .class("initial-message")
            .child(el("p").text("프롬프트를 입력하고 이미지 생성 버튼을 눌러주세요."))
            .into()
    }

    fn render_success(&self, image: &GeneratedImage) -> View {
        el("div")
            .class("generated-result")
            .child(
                el("img")
                    .class("generated-image")
                    .attr("src", image.image_path.as_str())
                    .attr("alt", "생성된 이미지"),
            )
            .child(
                el("a")
                    .class("download-link")
                    .attr("href", image.image_path.as_str())
                    .attr("download", image.download_name.as_str())
                    .text("⬇️ 다운로드"),
            )
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> GeneratorPage {
        GeneratorPage::new(GeneratorConfig::default())
    }

    fn form(prompt: &str) -> GeneratorForm {
        GeneratorForm { prompt: prompt.to_string(), ..GeneratorForm::from_config(&GeneratorConfig::default()) }
    }

    #[test]
    fn prompt_bounds() {
        assert!(page().validate(&form("sunset")).is_ok());
        assert_eq!(page().validate(&form("")), Err(ValidationError::EmptyPrompt));
        assert_eq!(page().validate(&form("   ")), Err(ValidationError::EmptyPrompt));
        assert_eq!(page().validate(&form("ab")), Err(ValidationError::PromptTooShort { min: 3 }));
        assert!(page().validate(&form(&"a".repeat(1000))).is_ok());
        assert_eq!(
            page().validate(&form(&"a".repeat(1001))),
            Err(ValidationError::PromptTooLong { max: 1000 })
        );
    }

    #[test]
    fn prompt_length_counts_characters() {
        assert!(page().validate(&form("노을빛")).is_ok());
        assert!(page().validate(&form(&"노".repeat(1000))).is_ok());
    }

    #[test]
    fn settings_fall_back_and_clamp() {
        let config = GeneratorConfig::default();
        let raw = GeneratorForm {
            prompt: "sunset".into(),
            steps: "abc".into(),
            guidance: "0".into(),
            width: "4096".into(),
            height: "64".into(),
            model_id: "  ".into(),
            seed: " 1234 ".into(),
        };
        let settings = raw.settings(&config);
        assert_eq!(settings.num_inference_steps, 30);
        assert_eq!(settings.guidance_scale, 7.5);
        assert_eq!(settings.width, 1024);
        assert_eq!(settings.height, 256);
        assert_eq!(settings.model_id, "runwayml/stable-diffusion-v1-5");
        assert_eq!(settings.seed, Some(1234));
        assert_eq!(settings.output_prefix, "sd_v15");
    }

    #[test]
    fn blank_or_bad_seed_is_omitted() {
        let config = GeneratorConfig::default();
        assert_eq!(form("sunset").settings(&config).seed, None);
        let bad = GeneratorForm { seed: "lucky".into(), ..form("sunset") };
        assert_eq!(bad.settings(&config).seed, None);
    }

    #[test]
    fn http_failure_messages() {
        let single = GenerateResponse { error: Some("요청 데이터가 없습니다.".into()), ..Default::default() };
        assert_eq!(page().interpret(400, single), Err(Some("요청 데이터가 없습니다.".into())));

        let list = GenerateResponse { errors: vec!["a".into(), "b".into()], ..Default::default() };
        assert_eq!(page().interpret(400, list), Err(Some("a, b".into())));

        assert_eq!(
            page().interpret(500, GenerateResponse::default()),
            Err(Some(UNKNOWN_ERROR.to_string()))
        );
    }

    #[test]
    fn ok_without_success_uses_server_error_or_fallback() {
        assert_eq!(page().interpret(200, GenerateResponse::default()), Err(None));
        let with_error = GenerateResponse { error: Some("GPU busy".into()), ..Default::default() };
        assert_eq!(page().interpret(200, with_error), Err(Some("GPU busy".into())));
    }

    #[test]
    fn success_renders_image_and_download_link() {
        let response = GenerateResponse {
            success: true,
            image_path: Some("/outputs/sd_v15_20240101.png".into()),
            ..Default::default()
        };
        let image = page().interpret(200, response).unwrap();
        assert_eq!(image.download_name, "sd_v15_20240101.png");

        let view = page().render_success(&image);
        assert_eq!(view.find_by_tag("img")[0].attr_value("src"), Some("/outputs/sd_v15_20240101.png"));
        assert_eq!(view.find_by_tag("a")[0].attr_value("download"), Some("sd_v15_20240101.png"));
    }
}
