//! HTTP transport for the GitHub REST API.
//!
//! Handles authentication headers, JSON (de)serialization, `Link` header
//! pagination and mapping of error responses into typed `ApiError`s.
//! Requests are never retried here.

use std::time::Duration;

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, Error};

/// Page size requested from list endpoints.
pub const PER_PAGE: &str = "100";

const USER_AGENT_VALUE: &str = concat!("release-bot/", env!("CARGO_PKG_VERSION"));

/// Authenticated HTTP transport.
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for API requests (e.g., "<https://api.github.com>")
    /// * `token` - Token sent in the `Authorization` header
    /// * `timeout` - Request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the HTTP
    /// client cannot be created.
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("token {token}"))
            .map_err(|_| Error::Configuration("token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Make a request and parse the JSON response.
    ///
    /// An empty success body is parsed as JSON `null`, so `()` and
    /// `serde_json::Value` are valid targets for endpoints that answer
    /// `204 No Content`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Api` for non-2xx responses and `Error::Http` for
    /// transport failures.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        params: Option<&[(&str, &str)]>,
        body: Option<&impl Serialize>,
    ) -> Result<T, Error> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.builder(method, &url);

        if let Some(p) = params {
            request = request.query(p);
        }

        if let Some(b) = body {
            request = request.json(b);
        }

        debug!(method, path, "sending request");
        let response = self.send(request).await?;
        Self::parse_body(response).await
    }

    /// GET a list endpoint, following `Link: rel="next"` until exhausted.
    ///
    /// An empty page body counts as an empty page.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered on any page.
    pub async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, Error> {
        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("per_page", PER_PAGE));

        let url = format!("{}{}", self.base_url, path);
        debug!(method = "GET", path, "sending paginated request");
        let mut response = self.send(self.client.get(&url).query(&query)).await?;
        let mut items = Vec::new();

        loop {
            let next = next_link(response.headers());
            let page: Option<Vec<T>> = Self::parse_body(response).await?;
            items.extend(page.unwrap_or_default());

            match next {
                Some(next_url) => {
                    debug!(url = %next_url, "following pagination link");
                    response = self.send(self.client.get(&next_url)).await?;
                }
                None => return Ok(items),
            }
        }
    }

    fn builder(&self, method: &str, url: &str) -> RequestBuilder {
        match method.to_uppercase().as_str() {
            "POST" => self.client.post(url),
            "PUT" => self.client.put(url),
            "DELETE" => self.client.delete(url),
            "PATCH" => self.client.patch(url),
            _ => self.client.get(url),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, Error> {
        let response = request.send().await.map_err(|e| Error::Http(e.to_string()))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Error::Api(Self::parse_error_response(response).await))
        }
    }

    async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Http(format!("Failed to read response: {e}")))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_value(Value::Null).map_err(Error::from);
        }

        serde_json::from_slice(&bytes).map_err(Error::from)
    }

    /// Parse an error response into a typed error.
    async fn parse_error_response(response: Response) -> ApiError {
        let status = response.status();
        let headers = response.headers().clone();

        let request_id = header_str(&headers, "x-github-request-id").map(String::from);
        let remaining = header_str(&headers, "x-ratelimit-remaining");

        let data: Value = response.json().await.unwrap_or_else(|_| serde_json::json!({}));
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| format!("HTTP {}", status.as_u16()), String::from);
        let already_exists = data
            .get("errors")
            .and_then(Value::as_array)
            .is_some_and(|errors| {
                errors
                    .iter()
                    .any(|e| e.get("code").and_then(Value::as_str) == Some("already_exists"))
            });

        match status {
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited {
                message,
                retry_after: retry_after_secs(&headers),
                request_id,
            },
            StatusCode::FORBIDDEN if remaining == Some("0") => ApiError::RateLimited {
                message,
                retry_after: retry_after_secs(&headers),
                request_id,
            },
            StatusCode::UNAUTHORIZED => ApiError::Authentication { message, request_id },
            StatusCode::FORBIDDEN => ApiError::Authorization { message, request_id },
            StatusCode::NOT_FOUND => ApiError::NotFound { message, request_id },
            StatusCode::CONFLICT => ApiError::Conflict { message, request_id },
            StatusCode::UNPROCESSABLE_ENTITY if already_exists => {
                ApiError::Conflict { message, request_id }
            }
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::Unprocessable { message, request_id },
            s if s.is_server_error() => ApiError::Server { message, request_id },
            s => ApiError::Other {
                status: s.as_u16(),
                message,
                request_id,
            },
        }
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Seconds to wait before the quota resets, from `Retry-After` or
/// `X-RateLimit-Reset` (epoch seconds). Defaults to 60.
fn retry_after_secs(headers: &HeaderMap) -> u64 {
    if let Some(secs) = header_str(headers, "retry-after").and_then(|s| s.parse().ok()) {
        return secs;
    }

    header_str(headers, "x-ratelimit-reset")
        .and_then(|s| s.parse::<i64>().ok())
        .map_or(60, |reset| {
            u64::try_from(reset - Utc::now().timestamp()).unwrap_or(0)
        })
}

/// Extract the `rel="next"` target from a `Link` header.
fn next_link(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;

    link.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|p| p.trim() == "rel=\"next\"");
        if is_next && target.starts_with('<') && target.ends_with('>') {
            Some(target[1..target.len() - 1].to_string())
        } else {
            None
        }
    })
}

/// Escape a value for use as a single path segment (`/` becomes `%2F`).
#[must_use]
pub fn encode_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
