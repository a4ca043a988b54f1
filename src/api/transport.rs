// Dashboard backend transport
// Every network call goes through here and comes back as an ApiResult.

use std::future::Future;
use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::SettingsError;
use crate::utils::config::{DashboardSettings, USER_AGENT};
use crate::utils::formatters::truncate;

/// Response body, parsed as JSON when possible
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Parse a raw body, keeping the text when it is not JSON
    pub fn from_body(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }
}

/// Uniform outcome of one backend call.
///
/// `error` is only set when no response was obtained at all; in that case
/// `payload` is `None` and `ok` is `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult {
    pub ok: bool,
    pub payload: Option<Payload>,
    pub error: Option<String>,
}

impl ApiResult {
    /// A response was received with the given success flag and body
    pub fn response(ok: bool, body: String) -> Self {
        Self {
            ok,
            payload: Some(Payload::from_body(body)),
            error: None,
        }
    }

    /// No response was obtained
    pub fn failure(error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.is_empty() {
            error = "request failed".to_string();
        }
        Self {
            ok: false,
            payload: None,
            error: Some(error),
        }
    }

    pub fn json(&self) -> Option<&Value> {
        self.payload.as_ref().and_then(Payload::as_json)
    }
}

/// Method, headers and body for one call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Default for ApiRequest {
    fn default() -> Self {
        Self::get()
    }
}

impl ApiRequest {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }

    /// A request carrying `body` serialized as JSON
    pub fn json<T: Serialize>(method: Method, body: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            method,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(serde_json::to_string(body)?),
        })
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Something that can perform a backend call.
///
/// Implementations must never fail: every outcome, including connectivity
/// loss, is folded into the returned `ApiResult`.
pub trait Transport: Send + Sync {
    fn fetch(&self, path: &str, request: ApiRequest) -> impl Future<Output = ApiResult> + Send;
}

/// reqwest-backed transport with a cookie jar for the session
pub struct HttpTransport {
    client: Client,
    api_base: String,
}

impl HttpTransport {
    pub fn new(settings: &DashboardSettings) -> Result<Self, SettingsError> {
        let jar = Arc::new(Jar::default());

        if let Some(cookie) = &settings.session_cookie {
            let url = Url::parse(&settings.api_base).map_err(|e| SettingsError::InvalidApiBase {
                value: settings.api_base.clone(),
                reason: e.to_string(),
            })?;
            jar.add_cookie_str(cookie, &url);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .cookie_provider(jar)
            .build()?;

        Ok(Self {
            client,
            api_base: settings.api_base.clone(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, path: &str, request: ApiRequest) -> ApiResult {
        let url = format!("{}{}", self.api_base, path);
        debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("{} {} failed: {}", request.method, url, e);
                return ApiResult::failure(e.to_string());
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("{} {} body read failed: {}", request.method, url, e);
                return ApiResult::failure(e.to_string());
            }
        };

        debug!("{} {} -> {} {}", request.method, url, status, truncate(&text, 120));
        ApiResult::response(status.is_success(), text)
    }
}
