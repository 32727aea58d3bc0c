use reqwest::{
    Client as HttpClient, RequestBuilder, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use std::time::Duration;

use crate::{
    api_v1::{ChatCompletionRequest, ChatCompletionResponse, ModelListResponse},
    error::HuggingFaceError,
};

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";

/// Timeout for `GET /models`.
pub const LIST_MODELS_TIMEOUT: Duration = Duration::from_secs(15);
/// Timeout for `POST /chat/completions`.
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

const BILL_TO_HEADER: HeaderName = HeaderName::from_static("x-hf-bill-to");

/// Minimal HTTP client for the Hugging Face router.
///
/// * Non-streaming only (one request ▶ one response).
/// * Accepts and returns the `api_v1` request / response structs defined
///   in this crate.
/// * Shares a single `reqwest::Client`, so cloning `HuggingFaceClient` is cheap.
///
/// Credentials are passed per call because the active key may change between
/// requests (environment, pinned constant or stored credential).
#[derive(Clone, Debug)]
pub struct HuggingFaceClient {
    http: HttpClient,
    base: String,
}

impl HuggingFaceClient {
    /// Build with a custom `reqwest::Client` in case the caller needs proxy
    /// settings, custom TLS, etc.
    pub fn with_http(http: HttpClient, base_url: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self {
            http,
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Fetch the raw model listing.
    pub async fn list_models(&self, api_key: &str) -> Result<ModelListResponse, HuggingFaceError> {
        let url = format!("{}/models", self.base);
        tracing::debug!(%url, "fetching model list");

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let request = self
            .http
            .get(url)
            .headers(headers)
            .timeout(LIST_MODELS_TIMEOUT);
        let resp = authorize(request, api_key)?.send().await?;

        if resp.status() != StatusCode::OK {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(HuggingFaceError::Api { status, body });
        }

        let bytes = resp.bytes().await?;
        let parsed: ModelListResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed)
    }

    /// Perform a **non-streaming** chat completion.
    ///
    /// `bill_to` adds the `X-HF-Bill-To` header so usage is billed to that
    /// organization.
    pub async fn chat_completion(
        &self,
        api_key: &str,
        bill_to: Option<&str>,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, HuggingFaceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(organization) = bill_to {
            let value = HeaderValue::from_str(organization).map_err(|_| {
                HuggingFaceError::Format(format!("invalid organization header: {organization}"))
            })?;
            headers.insert(BILL_TO_HEADER, value);
        }

        let url = format!("{}/chat/completions", self.base);
        tracing::debug!(%url, model = %request.model, "sending chat completion");

        let builder = self
            .http
            .post(url)
            .headers(headers)
            .timeout(GENERATION_TIMEOUT)
            .json(&request);
        let resp = authorize(builder, api_key)?.send().await?;

        if resp.status() != StatusCode::OK {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(HuggingFaceError::Api { status, body });
        }

        let bytes = resp.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed)
    }
}

impl Default for HuggingFaceClient {
    fn default() -> Self {
        Self::with_http(HttpClient::new(), None)
    }
}

fn authorize(request: RequestBuilder, api_key: &str) -> Result<RequestBuilder, HuggingFaceError> {
    if api_key.is_empty() {
        return Ok(request);
    }
    let value = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|_| HuggingFaceError::Format("API key contains invalid header characters".into()))?;
    Ok(request.header(AUTHORIZATION, value))
}
