//! Profile lookup and classification.
//!
//! This module issues a single HTTP GET per username against the
//! profile-lookup endpoint and maps the response to a [`Category`].
//! Classification is a pure function of the single response: all
//! ambiguity (unexpected status codes, malformed bodies, transport
//! faults, timeouts) collapses to `Category::Error` rather than
//! propagating, so callers never need error handling on this path.

use crate::error::UsernameCheckError;
use crate::types::{Category, CheckConfig};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;

/// Classification seam for the dispatcher.
///
/// The production implementation is [`ProfileClient`]; tests drive the
/// worker pool with simulated lookups instead.
pub trait Lookup {
    /// Classify one username. Never fails; exactly one outbound
    /// request per invocation for network-backed implementations.
    fn classify(&self, username: &str) -> impl Future<Output = Category> + Send;
}

/// HTTP client for the profile-lookup API.
///
/// Holds a `reqwest::Client` configured once with the fixed header set
/// (browser-identifying user-agent plus the API-version token) and the
/// endpoint template. Cloning is cheap; the underlying connection pool
/// is shared.
#[derive(Clone)]
pub struct ProfileClient {
    /// HTTP client for lookup requests
    http_client: reqwest::Client,
    /// Endpoint template; `{}` is replaced by the username
    url_template: String,
    /// Timeout for a single lookup
    timeout: Duration,
}

/// Fixed header set sent with every lookup request.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("accept", HeaderValue::from_static("*/*"));
    headers.insert(
        "accept-language",
        HeaderValue::from_static("en-US,en;q=0.9,en-AU;q=0.8"),
    );
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers.insert("priority", HeaderValue::from_static("u=1, i"));
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            "\"Microsoft Edge\";v=\"129\", \"Not=A?Brand\";v=\"8\", \"Chromium\";v=\"129\"",
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("empty"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("cors"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert(
        "user-agent",
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
             Chrome/129.0.0.0 Safari/537.36 Edg/129.0.0.0",
        ),
    );
    headers.insert("x-phantom-version", HeaderValue::from_static("24.19.0"));
    headers
}

impl ProfileClient {
    /// Create a new client with the default endpoint and a 10 second timeout.
    pub fn new() -> Result<Self, UsernameCheckError> {
        Self::with_config(
            crate::types::DEFAULT_API_URL_TEMPLATE,
            Duration::from_secs(10),
        )
    }

    /// Create a new client with a custom endpoint template and timeout.
    pub fn with_config<S: Into<String>>(
        url_template: S,
        timeout: Duration,
    ) -> Result<Self, UsernameCheckError> {
        let http_client = reqwest::Client::builder()
            .default_headers(default_headers())
            .timeout(timeout + Duration::from_secs(2)) // Add buffer for HTTP timeout
            .build()
            .map_err(|e| {
                UsernameCheckError::network_with_source(
                    "Failed to create lookup HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            url_template: url_template.into(),
            timeout,
        })
    }

    /// Create a client from a [`CheckConfig`].
    pub fn from_config(config: &CheckConfig) -> Result<Self, UsernameCheckError> {
        Self::with_config(config.api_url_template.clone(), config.timeout)
    }

    /// Build the lookup URL for a username.
    fn lookup_url(&self, username: &str) -> String {
        self.url_template.replacen("{}", username, 1)
    }

    /// Issue the lookup request and return the status plus parsed body.
    ///
    /// The body is `None` unless the server returned 200 with valid JSON.
    async fn fetch(&self, url: &str) -> Result<(StatusCode, Option<serde_json::Value>), UsernameCheckError> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::OK {
            // A 200 with an unparseable body classifies as Error below.
            let body = response.json::<serde_json::Value>().await.ok();
            Ok((status, body))
        } else {
            Ok((status, None))
        }
    }
}

impl Lookup for ProfileClient {
    async fn classify(&self, username: &str) -> Category {
        let url = self.lookup_url(username);

        let result = tokio::time::timeout(self.timeout, self.fetch(&url)).await;

        match result {
            Ok(Ok((status, body))) => categorize(status, body.as_ref()),
            Ok(Err(e)) => {
                tracing::debug!(username, error = %e, "lookup request failed");
                Category::Error
            }
            Err(_) => {
                tracing::debug!(username, timeout = ?self.timeout, "lookup timed out");
                Category::Error
            }
        }
    }
}

/// Map a lookup response to a category.
///
/// - 404 means nobody owns the name
/// - 403 means the service blocks the name
/// - 200 is Taken only when the body carries the `username` identity
///   field; a 200 without it (or without a parseable body) is Error
/// - everything else is Error
pub fn categorize(status: StatusCode, body: Option<&serde_json::Value>) -> Category {
    match status {
        StatusCode::NOT_FOUND => Category::Available,
        StatusCode::FORBIDDEN => Category::Blacklisted,
        StatusCode::OK => match body {
            Some(json) if json.get("username").is_some() => Category::Taken,
            _ => Category::Error,
        },
        _ => Category::Error,
    }
}
