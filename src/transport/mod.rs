//! HTTP transport for the Lettr API.
//!
//! [`Transporter`] is the seam between the services and the network, and
//! what tests replace with a mock. [`HttpTransporter`] is the reqwest
//! implementation: bearer auth, JSON content negotiation, response
//! envelope unwrapping, and mapping of non-2xx responses onto
//! [`LettrError`] variants (including the 429 split between rate-limit
//! and quota exhaustion).

use std::collections::HashMap;

use async_trait::async_trait;
use http::HeaderMap;
use parking_lot::RwLock;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::LettrConfig;
use crate::errors::{LettrError, LettrResult};
use crate::types::{ErrorCode, RateLimit, SendingQuota};

/// Sends JSON requests on behalf of the services.
///
/// All bodies and responses are JSON values; DTO (de)serialization stays
/// in the services. `last_response_headers` returns the headers of the
/// most recent response, successful or not, so callers can inspect
/// rate-limit state without going through an error.
#[async_trait]
pub trait Transporter: Send + Sync {
    async fn post(&self, path: &str, body: Value) -> LettrResult<Value>;

    async fn get(&self, path: &str) -> LettrResult<Value>;

    async fn get_with_query(&self, path: &str, query: &[(String, String)]) -> LettrResult<Value>;

    async fn delete(&self, path: &str) -> LettrResult<()>;

    fn last_response_headers(&self) -> HeaderMap;
}

/// reqwest-backed [`Transporter`].
pub struct HttpTransporter {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
    last_headers: RwLock<HeaderMap>,
}

impl HttpTransporter {
    /// Builds a transporter from the given configuration.
    pub fn new(config: &LettrConfig) -> LettrResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(format!("lettr-rust/{}", crate::VERSION))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(config.base_url())?,
            api_key: config.api_key().to_string(),
            last_headers: RwLock::new(HeaderMap::new()),
        })
    }

    fn endpoint(&self, path: &str) -> LettrResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: Option<&[(String, String)]>,
    ) -> LettrResult<Value> {
        let url = self.endpoint(path)?;

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .bearer_auth(&self.api_key)
            .header(http::header::ACCEPT, "application/json");

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, %url, "sending request");

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();

        // last-writer-wins; concurrent callers get whichever response
        // landed most recently
        *self.last_headers.write() = headers.clone();

        let text = response.text().await?;

        if status.is_success() {
            debug!(%status, "request succeeded");
            return decode_body(&text);
        }

        debug!(%status, "request failed");
        Err(map_error(status.as_u16(), &headers, &text))
    }
}

#[async_trait]
impl Transporter for HttpTransporter {
    async fn post(&self, path: &str, body: Value) -> LettrResult<Value> {
        self.request(Method::POST, path, Some(&body), None).await
    }

    async fn get(&self, path: &str) -> LettrResult<Value> {
        self.request(Method::GET, path, None, None).await
    }

    async fn get_with_query(&self, path: &str, query: &[(String, String)]) -> LettrResult<Value> {
        self.request(Method::GET, path, None, Some(query)).await
    }

    async fn delete(&self, path: &str) -> LettrResult<()> {
        self.request(Method::DELETE, path, None, None).await?;
        Ok(())
    }

    fn last_response_headers(&self) -> HeaderMap {
        self.last_headers.read().clone()
    }
}

/// Parses a success body, treating an empty body as an empty object and
/// unwrapping one level of `{"data": {...}}` envelope.
fn decode_body(text: &str) -> LettrResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    let decoded: Value = serde_json::from_str(text)?;
    Ok(unwrap_envelope(decoded))
}

fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    }
}

/// Maps a non-2xx response onto the error taxonomy.
fn map_error(status: u16, headers: &HeaderMap, body: &str) -> LettrError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    // raw text only substitutes for a body that failed to parse; a JSON
    // body without a message key gets the generic fallback
    let message = match &parsed {
        Some(body) => body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| "Unknown API error".to_string()),
        None if body.trim().is_empty() => "Unknown API error".to_string(),
        None => body.to_string(),
    };

    match status {
        401 => LettrError::Unauthorized { message },
        404 => LettrError::NotFound { message },
        409 => LettrError::Conflict { message },
        422 => LettrError::Validation {
            message,
            errors: field_errors(parsed.as_ref()),
        },
        429 => rate_limit_or_quota(parsed.as_ref(), headers, message),
        status => LettrError::Api { status, message },
    }
}

/// Per-field messages from a 422 body's `errors` key.
fn field_errors(body: Option<&Value>) -> HashMap<String, Vec<String>> {
    body.and_then(|b| b.get("errors"))
        .cloned()
        .and_then(|errors| serde_json::from_value(errors).ok())
        .unwrap_or_default()
}

/// Splits 429 responses: a quota error code in the body means the sending
/// quota is exhausted; anything else is ordinary throttling.
fn rate_limit_or_quota(body: Option<&Value>, headers: &HeaderMap, message: String) -> LettrError {
    let error_code = body
        .and_then(|b| b.get("error_code"))
        .and_then(Value::as_str)
        .and_then(|code| serde_json::from_value::<ErrorCode>(Value::String(code.into())).ok());

    if error_code.is_some_and(|code| code.is_quota_error()) {
        return LettrError::QuotaExceeded {
            message,
            quota: SendingQuota::from_headers(headers),
        };
    }

    let retry_after = headers
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());

    LettrError::RateLimit {
        message,
        rate_limit: RateLimit::from_headers(headers),
        retry_after,
    }
}
