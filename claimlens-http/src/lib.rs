//! Minimal HTTP client with safe logging, retries, and flexible auth.
//!
//! - Request options: `Auth`, query params, timeout, retries
//! - Redacts sensitive query params and never logs secret values
//! - Retries 429/5xx with exponential backoff and `Retry-After` support
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), claimlens_http::HttpError> {
//! let client = claimlens_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", claimlens_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Security: `Auth::Bearer` values are sanitized before use, and logs only
//! ever include the auth kind (bearer/query/none), not the secret itself.

use reqwest::header::{HeaderValue, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}")]
    Api { status: StatusCode, message: String },
}

/// Authentication strategies supported by the HTTP client helpers.
///
/// ```
/// use claimlens_http::Auth;
///
/// let bearer = Auth::Bearer("token");
/// match bearer {
///     Auth::Bearer(value) => assert_eq!(value, "token"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// Authorization: Bearer <token>
    Bearer(&'a str),
    /// Auth via query param (e.g. Google's `key`)
    Query { name: &'a str, value: Cow<'a, str> },
    None,
}

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use claimlens_http::{Auth, RequestOpts};
/// use std::borrow::Cow;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     retries: Some(1),
///     auth: Some(Auth::Query {
///         name: "key",
///         value: Cow::Borrowed("demo"),
///     }),
///     ..Default::default()
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub retries: Option<usize>,
    pub auth: Option<Auth<'a>>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>, // e.g. [("q", "term".into())]
}

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use claimlens_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// assert_eq!(client.max_retries, 2);
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(15),
            max_retries: 2,
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// Override the default retry budget returned by [`HttpClient::new`].
    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    /// GET JSON with per-request options (query/auth/timeout/retries).
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        self.request_json::<(), T>(Method::GET, path, None, opts)
            .await
    }

    /// POST JSON using optional Bearer auth.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let opts = RequestOpts {
            auth: bearer.map(Auth::Bearer),
            ..Default::default()
        };
        self.request_json(Method::POST, path, Some(body), opts).await
    }

    /// POST JSON with per-request options.
    pub async fn post_json_opts<B, T>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request_json(Method::POST, path, Some(body), opts).await
    }

    async fn request_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        mut opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;

        // Fold query-param auth into the regular query list once, so it
        // survives retries without being re-appended.
        if let Some(Auth::Query { name, value }) = &opts.auth {
            let mut q = opts.query.take().unwrap_or_default();
            q.push((*name, value.clone()));
            opts.query = Some(q);
        }

        let max_retries = opts.retries.unwrap_or(self.max_retries);
        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let mut attempt = 0usize;

        loop {
            let mut rb = self.inner.request(method.clone(), url.clone()).timeout(timeout);

            if let Some(q) = &opts.query {
                let pairs: Vec<(&str, &str)> = q.iter().map(|(k, v)| (*k, v.as_ref())).collect();
                rb = rb.query(&pairs);
            }
            if let Some(b) = body {
                rb = rb.json(b);
            }
            if let Some(Auth::Bearer(tok)) = &opts.auth {
                rb = rb.bearer_auth(sanitize_api_key(tok)?);
            }

            tracing::debug!(
                attempt = attempt + 1,
                max_retries,
                method = %method,
                host_path = %format!("{}{}", url.domain().unwrap_or("-"), url.path()),
                query = ?redact_query(opts.query.as_deref()),
                timeout_ms = timeout.as_millis() as u64,
                auth_kind = auth_kind(opts.auth.as_ref()),
                has_body = body.is_some(),
                "http.request.start"
            );

            let t0 = std::time::Instant::now();
            let resp = match rb.send().await {
                Ok(resp) => resp,
                Err(err) => {
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff_delay(attempt);
                        tracing::warn!(
                            attempt,
                            max_retries,
                            backoff_ms = delay.as_millis() as u64,
                            error = %err,
                            "http.retrying.network"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    return Err(HttpError::Network(err.to_string()));
                }
            };

            let status = resp.status();
            let headers = resp.headers().clone();
            let bytes = match resp.bytes().await {
                Ok(bytes) => bytes,
                Err(err) => {
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff_delay(attempt);
                        tracing::warn!(
                            attempt,
                            max_retries,
                            backoff_ms = delay.as_millis() as u64,
                            error = %err,
                            "http.retrying.body"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    return Err(HttpError::Network(err.to_string()));
                }
            };

            let snippet = snip_body(&bytes);
            tracing::debug!(
                %status,
                duration_ms = t0.elapsed().as_millis() as u64,
                body_len = bytes.len(),
                "http.response"
            );

            if status.is_success() {
                return serde_json::from_slice::<T>(&bytes).map_err(|e| {
                    tracing::warn!(
                        serde_err = %e,
                        body_snippet = %snippet,
                        "http.response.decode_error"
                    );
                    HttpError::Decode(e.to_string(), snippet)
                });
            }

            let message = extract_error_message(&bytes);
            let retryable = status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();

            if retryable && attempt < max_retries {
                attempt += 1;
                let delay = match retry_after_secs(&headers) {
                    Some(secs) => Duration::from_secs(secs),
                    None => {
                        let exp = backoff_delay(attempt);
                        if status == StatusCode::TOO_MANY_REQUESTS {
                            // default floor for 429 when no Retry-After is present
                            exp.max(Duration::from_millis(1100))
                        } else {
                            exp
                        }
                    }
                };
                tracing::warn!(
                    %status,
                    attempt,
                    max_retries,
                    backoff_ms = delay.as_millis() as u64,
                    message = %message,
                    "http.retrying"
                );
                sleep(delay).await;
                continue;
            }

            tracing::warn!(
                %status,
                message = %message,
                body_snippet = %snippet,
                "http.error"
            );
            return Err(HttpError::Api { status, message });
        }
    }
}

fn backoff_delay(attempt: usize) -> Duration {
    Duration::from_millis(200u64.saturating_mul(1 << (attempt - 1)))
}

fn auth_kind(auth: Option<&Auth<'_>>) -> &'static str {
    match auth {
        Some(Auth::Bearer(_)) => "bearer",
        Some(Auth::Query { .. }) => "query",
        Some(Auth::None) | None => "none",
    }
}

fn is_secret_param(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "access_token" | "authorization" | "auth" | "key" | "api_key" | "token" | "secret"
            | "client_secret" | "bearer"
    )
}

fn redact_query(query: Option<&[(&str, Cow<'_, str>)]>) -> Vec<(String, String)> {
    query
        .map(|q| {
            q.iter()
                .map(|(k, v)| {
                    let value = if is_secret_param(k) {
                        "<redacted>".to_string()
                    } else {
                        v.as_ref().to_string()
                    };
                    ((*k).to_string(), value)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Pull a human-readable message out of a JSON error body.
///
/// Google-style envelopes (`{"error":{"message":...}}`) come first since
/// both the search and generation APIs use them; generic single-field
/// shapes are the fallback.
fn extract_error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct GoogleEnv {
        error: GoogleDetail,
    }
    #[derive(Deserialize)]
    struct GoogleDetail {
        message: String,
    }

    #[derive(Deserialize)]
    struct Flat {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(env) = serde_json::from_slice::<GoogleEnv>(body) {
        return env.error.message;
    }
    if let Ok(m) = serde_json::from_slice::<Flat>(body) {
        if !m.message.is_empty() {
            return m.message;
        }
        if !m.detail.is_empty() {
            return m.detail;
        }
        if !m.error.is_empty() {
            return m.error;
        }
    }
    snip_body(body)
}

fn retry_after_secs(h: &reqwest::header::HeaderMap) -> Option<u64> {
    h.get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?
        .parse()
        .ok()
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        snip.truncate(500);
        snip.push_str("...");
    }
    snip
}

/// Trim quoting and whitespace out of an API key and refuse control bytes,
/// so a malformed env var fails loudly instead of producing a broken
/// Authorization header.
fn sanitize_api_key(raw: &str) -> Result<String, HttpError> {
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    s.retain(|ch| !ch.is_ascii_whitespace());

    if !s.is_ascii() {
        return Err(HttpError::Build("API key contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build(
            "API key contains control characters".into(),
        ));
    }

    HeaderValue::from_str(&format!("Bearer {}", s))
        .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_quotes_and_whitespace() {
        assert_eq!(sanitize_api_key(" \"abc def\" ").unwrap(), "abcdef");
        assert_eq!(sanitize_api_key("tok\nen").unwrap(), "token");
        assert!(sanitize_api_key("bad\u{7F}key").is_err());
    }

    #[test]
    fn secret_query_params_are_redacted() {
        let q: Vec<(&str, Cow<'_, str>)> = vec![
            ("q", "rice".into()),
            ("key", "supersecret".into()),
        ];
        let redacted = redact_query(Some(&q));
        assert_eq!(redacted[0].1, "rice");
        assert_eq!(redacted[1].1, "<redacted>");
    }

    #[test]
    fn error_message_prefers_google_envelope() {
        let body = br#"{"error":{"message":"quota exceeded","code":429}}"#;
        assert_eq!(extract_error_message(body), "quota exceeded");

        let body = br#"{"detail":"something else"}"#;
        assert_eq!(extract_error_message(body), "something else");
    }
}
