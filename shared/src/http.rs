use crate::error::{ApiError, ApiResult, DecodeError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// HTTP interface abstraction
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// One field of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq)]
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(String),
    /// The transport sets the boundary itself, so no Content-Type header is added.
    Multipart(Vec<MultipartPart>),
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: RequestBody,
    pub timeout_ms: Option<u32>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: RequestBody::Empty,
            timeout_ms: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        let json = serde_json::to_string(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.body = RequestBody::Json(json);
        Ok(self.with_header("Content-Type", "application/json"))
    }

    pub fn with_multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(DecodeError::from(e)))
    }

    /// Body as loose JSON; an empty body (204, bare 200) becomes `Null`.
    pub fn value(&self) -> ApiResult<Value> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        self.json()
    }
}

/// HTTP transport port.
/// `?Send` because the browser transport holds JS handles across awaits.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// Test double: MockHttpClient
// =========================================================

#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) enum MockReply {
    Status(u16, String),
    Fail(ApiError),
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: RequestBody,
    pub timeout_ms: Option<u32>,
}

#[cfg(test)]
pub(crate) struct MockHttpClient {
    // "METHOD url" -> reply
    responses: RefCell<HashMap<String, MockReply>>,
    pub requests: RefCell<Vec<RecordedRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: Value) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), MockReply::Status(status, body.to_string()));
    }

    pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), MockReply::Status(status, body.to_string()));
    }

    pub fn mock_failure(&self, method: HttpMethod, url: &str, err: ApiError) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), MockReply::Fail(err));
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(RecordedRequest {
            method: req.method,
            url: req.url.clone(),
            headers: req.headers.clone(),
            body: req.body.clone(),
            timeout_ms: req.timeout_ms,
        });

        match self.responses.borrow().get(&Self::key(req.method, &req.url)) {
            Some(MockReply::Status(status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(MockReply::Fail(err)) => Err(err.clone()),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_body_sets_content_type() {
        let req = HttpRequest::new("http://x/locais", HttpMethod::Post)
            .with_json(&json!({ "nome": "Praia" }))
            .unwrap();
        assert_eq!(
            req.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(req.body, RequestBody::Json("{\"nome\":\"Praia\"}".into()));
    }

    #[test]
    fn multipart_leaves_content_type_to_transport() {
        let req = HttpRequest::new("http://x/locais", HttpMethod::Post).with_multipart(vec![
            MultipartPart::Text {
                name: "local".into(),
                value: "{}".into(),
            },
        ]);
        assert!(!req.headers.contains_key("Content-Type"));
    }

    #[test]
    fn empty_body_is_null() {
        let resp = HttpResponse {
            status: 204,
            body: String::new(),
        };
        assert!(resp.is_success());
        assert_eq!(resp.value().unwrap(), Value::Null);
    }
}
