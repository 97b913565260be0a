//! `fetch()` transport.
//!
//! Uses browser `fetch()` via gloo-net. Any HTTP status is returned as a
//! response; only failures to get one at all (offline, CORS, DNS) are errors.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use docqa_core::ports::HttpTransport;
use docqa_types::{
    ClientError, Result,
    http::{HttpMethod, HttpRequest, HttpResponse, MultipartPart, RequestBody, UploadFile},
};

pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FetchTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

fn js_err(e: JsValue) -> ClientError {
    ClientError::JsInterop(format!("{:?}", e))
}

fn file_blob(file: &UploadFile) -> Result<Blob> {
    let parts = Array::of1(&Uint8Array::from(file.bytes.as_slice()));
    let bag = BlobPropertyBag::new();
    if !file.mime_type.is_empty() {
        bag.set_type(&file.mime_type);
    }
    Blob::new_with_u8_array_sequence_and_options(&parts, &bag).map_err(js_err)
}

/// Browser `FormData`; the browser adds the multipart boundary header.
fn form_data(parts: &[MultipartPart]) -> Result<FormData> {
    let form = FormData::new().map_err(js_err)?;
    for part in parts {
        match part {
            MultipartPart::Text { name, value } => {
                form.append_with_str(name, value).map_err(js_err)?;
            }
            MultipartPart::File { name, file } => {
                let blob = file_blob(file)?;
                form.append_with_blob_and_filename(name, &blob, &file.name)
                    .map_err(js_err)?;
            }
        }
    }
    Ok(form)
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let mut rb = builder(req.method, &req.url);
        for (name, value) in &req.headers {
            rb = rb.header(name, value);
        }

        let request = match &req.body {
            RequestBody::Empty => rb.build(),
            RequestBody::Json(value) => rb.body(serde_json::to_string(value)?),
            RequestBody::Form(encoded) => rb.body(encoded.clone()),
            RequestBody::Multipart(parts) => rb.body(form_data(parts)?),
        }
        .map_err(|e| ClientError::Network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let status_text = response.status_text();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        log::debug!("{} {} -> {}", req.method.as_str(), req.url, status);
        Ok(HttpResponse { status, status_text, body })
    }
}
