use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Normalized response body: empty payloads are distinguished from JSON and
/// from text the server sent without valid JSON encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RawBody {
    Empty,
    Json(Value),
    Text(String),
}

impl RawBody {
    /// Decode into a typed model. Malformed payloads surface as
    /// [`ApiError::Decode`] instead of leaking duck-typed values upward.
    pub fn decode<T: DeserializeOwned>(self, endpoint: &str) -> Result<T, ApiError> {
        let value = match self {
            RawBody::Json(value) => value,
            RawBody::Empty => Value::Null,
            RawBody::Text(text) => Value::String(text),
        };
        serde_json::from_value(value).map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

/// Options for a single request. Defaults to GET with a JSON content type;
/// caller-supplied headers override the default.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_body(method: Method, body: Value) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: Some(body),
        }
    }
}

/// The single HTTP entry point every resource client goes through. No
/// retries, no timeouts, no cancellation: callers see each request exactly
/// once, succeed or fail.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    client: Client,
    base_url: String,
}

impl ApiTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request against `<base><path>` and normalize the response.
    ///
    /// Non-2xx statuses become [`ApiError::Status`]; network failures are
    /// logged and propagated unchanged. A successful response body decodes
    /// as empty, JSON, or raw text, in that order of preference.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<RawBody, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(options.method.clone(), &url);

        let caller_sets_content_type = options
            .headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("content-type"));
        if !caller_sets_content_type {
            request = request.header(CONTENT_TYPE, "application/json");
        }
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            request = request.body(body.to_string());
        }

        let response = request.send().await.map_err(|err| {
            error!(%url, error = %err, "request failed at the network level");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let text = response.text().await?;
        if text.is_empty() {
            return Ok(RawBody::Empty);
        }
        match serde_json::from_str(&text) {
            Ok(value) => Ok(RawBody::Json(value)),
            Err(_) => {
                debug!(%url, "response body is not JSON, passing through as text");
                Ok(RawBody::Text(text))
            }
        }
    }

    pub async fn get(&self, path: &str) -> Result<RawBody, ApiError> {
        self.request(path, RequestOptions::default()).await
    }

    /// GET and decode in one step.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get(path).await?.decode(path)
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<RawBody, ApiError> {
        self.request(path, RequestOptions::with_body(Method::POST, body))
            .await
    }

    pub async fn put(&self, path: &str) -> Result<RawBody, ApiError> {
        self.request(path, RequestOptions::method(Method::PUT)).await
    }

    pub async fn delete(&self, path: &str) -> Result<RawBody, ApiError> {
        self.request(path, RequestOptions::method(Method::DELETE))
            .await
    }
}
