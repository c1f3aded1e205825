//! `fetch` transport
//!
//! Implements the shared [`HttpClient`] port on top of `web_sys::fetch`.
//! Timeouts race the request against a timer and abort it through an
//! `AbortController`.

use async_trait::async_trait;
use futures::future::{Either, select};
use gloo_timers::future::TimeoutFuture;
use std::pin::pin;
use synergia_shared::error::{ApiError, ApiResult};
use synergia_shared::http::{HttpClient, HttpRequest, HttpResponse, MultipartPart, RequestBody};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, AbortSignal, Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit,
    Response,
};

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Browser HTTP client. Stateless, so it can live inside the shared `ApiClient`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

/// Builds the `multipart/form-data` body. The browser picks the boundary and
/// the Content-Type header.
fn form_data(parts: &[MultipartPart]) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    for part in parts {
        match part {
            MultipartPart::Text { name, value } => form.append_with_str(name, value)?,
            MultipartPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let data = js_sys::Uint8Array::from(bytes.as_slice());
                let options = BlobPropertyBag::new();
                options.set_type(content_type);
                let blob =
                    Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(&data), &options)?;
                form.append_with_blob_and_filename(name, &blob, file_name)?;
            }
        }
    }
    Ok(form)
}

fn build_request(req: &HttpRequest, signal: &AbortSignal) -> Result<Request, JsValue> {
    let headers = Headers::new()?;
    for (key, value) in &req.headers {
        headers.set(key, value)?;
    }

    let init = RequestInit::new();
    init.set_method(req.method.as_str());
    init.set_headers(&headers.into());
    init.set_signal(Some(signal));

    match &req.body {
        RequestBody::Empty => {}
        RequestBody::Json(body) => init.set_body(&JsValue::from_str(body)),
        RequestBody::Multipart(parts) => init.set_body(&form_data(parts)?.into()),
    }

    Request::new_with_str_and_init(&req.url, &init)
}

async fn read_text(response: &Response) -> ApiResult<String> {
    let promise = response
        .text()
        .map_err(|e| ApiError::Network(js_error(e)))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| ApiError::Network(js_error(e)))?;
    Ok(text.as_string().unwrap_or_default())
}

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let window = web_sys::window().ok_or_else(|| ApiError::Network("window indisponível".into()))?;
        let controller = AbortController::new().map_err(|e| ApiError::Request(js_error(e)))?;
        let request =
            build_request(&req, &controller.signal()).map_err(|e| ApiError::Request(js_error(e)))?;

        let fetch = JsFuture::from(window.fetch_with_request(&request));
        let outcome = match req.timeout_ms {
            Some(ms) => match select(pin!(fetch), pin!(TimeoutFuture::new(ms))).await {
                Either::Left((outcome, _)) => outcome,
                Either::Right(_) => {
                    controller.abort();
                    tracing::warn!("{} {} aborted after {} ms", req.method.as_str(), req.url, ms);
                    return Err(ApiError::Timeout(ms));
                }
            },
            None => fetch.await,
        };

        let response: Response = outcome
            .map_err(|e| ApiError::Network(js_error(e)))?
            .dyn_into()
            .map_err(|e| ApiError::Network(js_error(e)))?;

        let status = response.status();
        let body = read_text(&response).await?;
        tracing::debug!("{} {} -> {}", req.method.as_str(), req.url, status);

        Ok(HttpResponse { status, body })
    }
}
