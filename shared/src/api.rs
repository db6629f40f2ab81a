use serde::{Deserialize, Serialize};

// /predict

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictRequest {
    pub image: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PredictResponse {
    /// The predicted label. Absent (or null) when the server failed.
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

// /chat

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

// /analyze

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalysisItem {
    pub label: String,
    pub probability: f64,
    /// Server-formatted text, shown as-is.
    pub confidence: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub results: Vec<AnalysisItem>,
    #[serde(default)]
    pub error: Option<String>,
}

// /generate

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    pub num_inference_steps: u32,
    pub guidance_scale: f64,
    pub width: u32,
    pub height: u32,
    pub model_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    pub output_prefix: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            num_inference_steps: 30,
            guidance_scale: 7.5,
            width: 512,
            height: 512,
            model_id: "runwayml/stable-diffusion-v1-5".to_string(),
            seed: None,
            output_prefix: "sd_v15".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub settings: GenerationSettings,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}
