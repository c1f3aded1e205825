//! REST client for the Synergia backend
//!
//! One method per endpoint, grouped by resource in the submodules. Every call
//! goes through [`ApiClient::execute`], which adds the bearer token, applies
//! the timeout and turns non-2xx answers into [`ApiError`]s.

mod admin;
mod applications;
mod locations;
mod tools;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult, DecodeError, ErrorEnvelope};
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartPart};
use crate::models::ImageUpload;
use crate::normalize::normalize_keys;
use crate::session::resolve_token;
use crate::storage::StoragePort;
use crate::{HEADER_AUTHORIZATION, STORAGE_TOKEN_KEY, STORAGE_USER_KEY};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

pub use admin::ApplicationReportRange;

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

pub struct ApiClient<C> {
    base_url: String,
    http: C,
    storage: Arc<dyn StoragePort>,
    timeout_ms: u32,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(config: &AppConfig, http: C, storage: Arc<dyn StoragePort>) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http,
            storage,
            timeout_ms: config.request_timeout_ms,
            on_unauthorized: None,
        }
    }

    /// Called after a 401 has cleared the stored session.
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[cfg(test)]
    pub(crate) fn http(&self) -> &C {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Token of the stored user, falling back to the mirror key.
    fn bearer_token(&self) -> Option<String> {
        self.storage
            .get(STORAGE_USER_KEY)
            .and_then(|raw| match serde_json::from_str::<Value>(&raw) {
                Ok(user) => resolve_token(&user),
                Err(e) => {
                    tracing::warn!("stored user is not valid JSON: {}", e);
                    None
                }
            })
            .or_else(|| {
                self.storage
                    .get(STORAGE_TOKEN_KEY)
                    .filter(|t| !t.trim().is_empty())
            })
    }

    fn clear_session(&self) {
        self.storage.remove(STORAGE_USER_KEY);
        self.storage.remove(STORAGE_TOKEN_KEY);
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }

    async fn dispatch(&self, req: HttpRequest, guard_unauthorized: bool) -> ApiResult<HttpResponse> {
        let mut req = req.with_timeout(self.timeout_ms);
        if let Some(token) = self.bearer_token() {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        let method = req.method;
        let url = req.url.clone();
        let resp = self.http.send(req).await.inspect_err(|e| {
            tracing::warn!("{} {} failed: {}", method.as_str(), url, e);
        })?;

        if resp.status == 401 && guard_unauthorized {
            tracing::warn!("{} {} answered 401, clearing session", method.as_str(), url);
            self.clear_session();
            return Err(ApiError::Unauthorized);
        }

        if !resp.is_success() {
            tracing::debug!("{} {} answered {}", method.as_str(), url, resp.status);
            return Err(ApiError::Server {
                status: resp.status,
                envelope: ErrorEnvelope::parse(&resp.body),
            });
        }

        Ok(resp)
    }

    /// Sends a request through the global 401 handling.
    pub async fn execute(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.dispatch(req, true).await
    }

    // ---------------------------------------------------------
    // Verb helpers
    // ---------------------------------------------------------

    async fn get_value(&self, path: &str) -> ApiResult<Value> {
        let req = HttpRequest::new(&self.url(path), HttpMethod::Get);
        self.execute(req).await?.value()
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        decode(self.get_value(path).await?)
    }

    /// Lists tolerate an empty body.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Vec<T>> {
        match self.get_value(path).await? {
            Value::Null => Ok(Vec::new()),
            value => decode(value),
        }
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> ApiResult<Value> {
        let req = HttpRequest::new(&self.url(path), method).with_json(body)?;
        self.execute(req).await?.value()
    }

    async fn send_empty(&self, method: HttpMethod, path: &str) -> ApiResult<Value> {
        let req = HttpRequest::new(&self.url(path), method);
        self.execute(req).await?.value()
    }

    /// `multipart/form-data` with a JSON string part plus an `imagem` file part.
    async fn send_multipart<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        json_part: &str,
        body: &B,
        image: &ImageUpload,
    ) -> ApiResult<Value> {
        let json = serde_json::to_string(body).map_err(|e| ApiError::Request(e.to_string()))?;
        let parts = vec![
            MultipartPart::Text {
                name: json_part.to_string(),
                value: json,
            },
            MultipartPart::File {
                name: "imagem".to_string(),
                file_name: image.file_name.clone(),
                content_type: image.content_type.clone(),
                bytes: image.bytes.clone(),
            },
        ];
        let req = HttpRequest::new(&self.url(path), method).with_multipart(parts);
        self.execute(req).await?.value()
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(DecodeError::from(e)))
}

/// Decodes after renaming snake_case keys (user and profile endpoints).
fn decode_normalized<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    decode(normalize_keys(value))
}
