use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File { file_name: String, mime_type: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: PartValue::Text(value.into()) }
    }

    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            value: PartValue::File {
                file_name: file_name.into(),
                mime_type: mime_type.into(),
                bytes,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    pub fn json<T: Serialize>(payload: &T) -> Result<Self, TransportError> {
        serde_json::to_value(payload)
            .map(RequestBody::Json)
            .map_err(|e| TransportError::Build(e.to_string()))
    }
}

/// One outgoing call, fully built from the form state at submission time.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn post(path: impl Into<String>, body: RequestBody) -> Self {
        Self { method: Method::Post, path: path.into(), body }
    }
}

/// Raw answer from the server. JSON decoding happens in the controller so a
/// non-JSON body is treated the same as a dropped connection.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn ok(&self) -> bool {
        is_success(self.status)
    }
}

/// The seam between a controller and the network. The browser build uses
/// `gloo-net`; tests script responses.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Joins an endpoint path onto a base such as `""` or `http://host:5000/`.
pub fn endpoint_url(api_base: &str, path: &str) -> String {
    let base = api_base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_are_uppercase() {
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
    }

    #[test]
    fn endpoint_url_handles_slashes() {
        assert_eq!(endpoint_url("", "/predict"), "/predict");
        assert_eq!(endpoint_url("http://localhost:5000/", "/chat"), "http://localhost:5000/chat");
        assert_eq!(endpoint_url("http://localhost:5000", "generate"), "http://localhost:5000/generate");
    }

    #[test]
    fn ok_covers_2xx_only() {
        assert!(HttpResponse::new(200, "{}").ok());
        assert!(HttpResponse::new(204, "").ok());
        assert!(!HttpResponse::new(400, "{}").ok());
        assert!(!HttpResponse::new(503, "{}").ok());
    }
}
