//! Authenticated client for the question-answering backend.
//!
//! Every backend operation goes through one request shape:
//! 1. Method is explicit, or inferred (body present → POST, else GET)
//! 2. JSON bodies carry `Content-Type: application/json`; form bodies are
//!    urlencoded; multipart bodies get no content type (the transport picks
//!    the boundary)
//! 3. `Authorization: Bearer <token>` is attached when a token is stored,
//!    except on login/registration
//! 4. Responses are normalized: 204 → no value, non-2xx → `ClientError::Api`
//!    carrying the backend `detail`

use std::rc::Rc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use docqa_types::{
    ClientError, Result,
    admin::{Collection, DbStats, DocumentPage, ResponseStats, TokenUsageStats},
    chat::{BatchDeleteBody, ChatReply, ChatRequestBody, RenameBody, Thread, ThreadHistory},
    http::{HttpMethod, HttpRequest, HttpResponse, MultipartPart, RequestBody, UploadFile},
    session::LoginResponse,
};

use crate::ports::{ApiPort, HttpTransport, TokenStore};

const LOGIN_FAILED: &str = "Login failed.";
const REGISTER_FAILED: &str = "Registration failed.";

/// Description of one backend call before it is bound to a base URL and token.
#[derive(Debug, Clone)]
pub struct ApiCall {
    method: Option<HttpMethod>,
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
    body: RequestBody,
    authenticated: bool,
    /// Used instead of the status text when the backend gives no detail
    fallback_message: Option<&'static str>,
}

impl ApiCall {
    /// `segments` are joined as URL path segments and percent-encoded.
    /// A trailing `""` produces a trailing slash.
    pub fn new<S: AsRef<str>>(segments: &[S]) -> Self {
        Self {
            method: None,
            segments: segments.iter().map(|s| s.as_ref().to_string()).collect(),
            query: Vec::new(),
            body: RequestBody::Empty,
            authenticated: true,
            fallback_message: None,
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn form(mut self, pairs: &[(&str, &str)]) -> Self {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs.iter())
            .finish();
        self.body = RequestBody::Form(encoded);
        self
    }

    pub fn multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// No bearer header (there is no session yet)
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn fallback_message(mut self, message: &'static str) -> Self {
        self.fallback_message = Some(message);
        self
    }

    pub fn resolved_method(&self) -> HttpMethod {
        self.method.unwrap_or(if self.body.is_empty() {
            HttpMethod::Get
        } else {
            HttpMethod::Post
        })
    }

    fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// `ApiPort` implementation over any `HttpTransport`.
pub struct ApiClient {
    base_url: Url,
    transport: Rc<dyn HttpTransport>,
    tokens: Rc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        transport: Rc<dyn HttpTransport>,
        tokens: Rc<dyn TokenStore>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| ClientError::Config(format!("invalid api_url {:?}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!("{} cannot be a base URL", base_url)));
        }
        Ok(Self { base_url, transport, tokens })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Bind a call to the base URL and the currently stored token.
    pub fn build_request(&self, call: &ApiCall) -> Result<HttpRequest> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(call.segments.iter());
        if !call.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(call.query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        let mut headers = Vec::new();
        match &call.body {
            RequestBody::Json(_) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
            }
            RequestBody::Form(_) => {
                headers.push((
                    "Content-Type".to_string(),
                    "application/x-www-form-urlencoded".to_string(),
                ));
            }
            RequestBody::Empty | RequestBody::Multipart(_) => {}
        }

        if call.authenticated {
            if let Some(token) = self.tokens.read_token()? {
                if !token.is_empty() {
                    headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
                }
            }
        }

        Ok(HttpRequest {
            method: call.resolved_method(),
            url: url.into(),
            headers,
            body: call.body.clone(),
        })
    }

    /// Send a call and normalize the response. `Ok(None)` means 204/empty.
    pub async fn execute(&self, call: ApiCall) -> Result<Option<Value>> {
        let method = call.resolved_method();
        let path = call.path();
        let result = match self.build_request(&call) {
            Ok(req) => match self.transport.send(req).await {
                Ok(resp) => normalize_response(resp, call.fallback_message),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        if let Err(ref e) = result {
            log::error!("API {} {} failed: {}", method.as_str(), path, e);
        }
        result
    }

    async fn fetch<R: DeserializeOwned>(&self, call: ApiCall) -> Result<R> {
        let value = self.execute(call).await?;
        decode_body(value)
    }
}

/// Map an HTTP response onto the client's error model.
pub fn normalize_response(
    resp: HttpResponse,
    fallback_message: Option<&str>,
) -> Result<Option<Value>> {
    if resp.status == 204 {
        return Ok(None);
    }

    let parsed: std::result::Result<Value, serde_json::Error> = if resp.body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str(&resp.body)
    };

    if !resp.ok() {
        let detail = parsed.as_ref().ok().and_then(detail_message);
        let message = detail
            .or_else(|| fallback_message.map(String::from))
            .or_else(|| Some(resp.status_text.clone()).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| format!("HTTP {}", resp.status));
        return Err(ClientError::Api { status: resp.status, message });
    }

    match parsed? {
        Value::Null => Ok(None),
        value => Ok(Some(value)),
    }
}

/// Extract a human-readable message from a FastAPI-style error body.
fn detail_message(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::String(_) | Value::Null => None,
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

fn decode_body<R: DeserializeOwned>(value: Option<Value>) -> Result<R> {
    let value = value
        .ok_or_else(|| ClientError::Serialization("empty response body".to_string()))?;
    Ok(serde_json::from_value(value)?)
}

#[async_trait(?Send)]
impl ApiPort for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let call = ApiCall::new(&["token"])
            .form(&[("username", username), ("password", password)])
            .anonymous()
            .fallback_message(LOGIN_FAILED);
        self.fetch(call).await
    }

    async fn register(&self, username: &str, password: &str) -> Result<()> {
        let call = ApiCall::new(&["register"])
            .form(&[("username", username), ("password", password)])
            .anonymous()
            .fallback_message(REGISTER_FAILED);
        self.execute(call).await.map(|_| ())
    }

    async fn list_threads(&self) -> Result<Vec<Thread>> {
        self.fetch(ApiCall::new(&["threads", ""])).await
    }

    async fn thread_history(&self, thread_id: &str) -> Result<ThreadHistory> {
        self.fetch(ApiCall::new(&["threads", thread_id])).await
    }

    async fn rename_thread(&self, thread_id: &str, name: &str) -> Result<()> {
        let call = ApiCall::new(&["threads", thread_id, "name"])
            .method(HttpMethod::Put)
            .json(&RenameBody { name })?;
        self.execute(call).await.map(|_| ())
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<()> {
        let call = ApiCall::new(&["threads", thread_id]).method(HttpMethod::Delete);
        self.execute(call).await.map(|_| ())
    }

    async fn delete_threads(&self, thread_ids: &[String]) -> Result<()> {
        let call = ApiCall::new(&["threads", "delete-batch"])
            .json(&BatchDeleteBody { thread_ids })?;
        self.execute(call).await.map(|_| ())
    }

    async fn post_chat_message(&self, thread_id: &str, message: &str) -> Result<ChatReply> {
        let call = ApiCall::new(&["chat"]).json(&ChatRequestBody { thread_id, message })?;
        self.fetch(call).await
    }

    async fn upload_document(
        &self,
        file: UploadFile,
        collection_name: &str,
        source_url: Option<&str>,
    ) -> Result<()> {
        let mut parts = vec![
            MultipartPart::File { name: "file".to_string(), file },
            MultipartPart::Text {
                name: "collection_name".to_string(),
                value: collection_name.to_string(),
            },
        ];
        if let Some(url) = source_url {
            parts.push(MultipartPart::Text {
                name: "source_url".to_string(),
                value: url.to_string(),
            });
        }
        let call = ApiCall::new(&["upload"]).method(HttpMethod::Post).multipart(parts);
        self.execute(call).await.map(|_| ())
    }

    async fn list_collections(&self) -> Result<Vec<Collection>> {
        self.fetch(ApiCall::new(&["collections"])).await
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let call = ApiCall::new(&["collections", name]).method(HttpMethod::Delete);
        self.execute(call).await.map(|_| ())
    }

    async fn collection_documents(&self, name: &str, limit: u64, offset: u64) -> Result<DocumentPage> {
        let call = ApiCall::new(&["collections", name, "documents"])
            .query("limit", limit)
            .query("offset", offset);
        self.fetch(call).await
    }

    async fn db_stats(&self) -> Result<DbStats> {
        self.fetch(ApiCall::new(&["collections", "stats"])).await
    }

    async fn response_stats(&self) -> Result<ResponseStats> {
        self.fetch(ApiCall::new(&["collections", "response-stats"])).await
    }

    async fn token_usage_stats(&self) -> Result<TokenUsageStats> {
        self.fetch(ApiCall::new(&["token-usage-stats"])).await
    }
}
