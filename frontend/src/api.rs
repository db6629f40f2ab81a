use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::transport::endpoint_url;
use shared::{
    FormPart, HttpRequest, HttpResponse, Method, PartValue, RequestBody, Transport, TransportError,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::FormData;
use yew::html::Scope;
use yew::prelude::*;

/// Sends controller requests with `gloo-net`, relative to the configured base.
#[derive(Clone, Debug, PartialEq)]
pub struct GlooTransport {
    api_base: String,
}

impl GlooTransport {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self { api_base: api_base.into() }
    }

    fn build(&self, request: HttpRequest) -> Result<Request, TransportError> {
        let url = endpoint_url(&self.api_base, &request.path);
        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };

        match request.body {
            RequestBody::Json(value) => builder
                .json(&value)
                .map_err(|e| TransportError::Build(e.to_string())),
            RequestBody::Multipart(parts) => builder
                .body(form_data(parts)?)
                .map_err(|e| TransportError::Build(e.to_string())),
        }
    }
}

fn form_data(parts: Vec<FormPart>) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(js_error)?;
    for part in parts {
        match part.value {
            PartValue::Text(text) => form.append_with_str(&part.name, &text),
            PartValue::File { file_name, mime_type, bytes } => {
                let file = GlooFile::new_with_options(
                    &file_name,
                    bytes.as_slice(),
                    Some(&mime_type),
                    None,
                );
                form.append_with_blob_and_filename(&part.name, file.as_ref(), &file_name)
            }
        }
        .map_err(js_error)?;
    }
    Ok(form)
}

fn js_error(value: JsValue) -> TransportError {
    TransportError::Build(format!("{:?}", value))
}

impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = request.path.clone();
        let request = self.build(request)?;

        let response = request.send().await.map_err(|e| {
            log::error!("Network error on {}: {}", path, e);
            TransportError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if response.ok() {
            log::info!("{} answered {}", path, status);
        } else {
            log::warn!("{} answered {}", path, status);
        }
        Ok(HttpResponse::new(status, body))
    }
}

/// Sends `request` in the background and hands the outcome back to the
/// component as a message.
pub fn dispatch<C, F>(link: &Scope<C>, transport: &GlooTransport, request: HttpRequest, to_msg: F)
where
    C: Component,
    F: FnOnce(Result<HttpResponse, TransportError>) -> C::Message + 'static,
{
    let link = link.clone();
    let transport = transport.clone();
    log::info!("Sending {} {}", request.method, request.path);

    spawn_local(async move {
        let outcome = transport.send(request).await;
        link.send_message(to_msg(outcome));
    });
}
