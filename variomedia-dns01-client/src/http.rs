//! Shared HTTP exchange discipline.
//!
//! Every request to the API carries the same three headers: a token-style
//! `Authorization`, the JSON:API content type, and an `Accept` header
//! declaring the API version this client understands. Responses are
//! classified here so the record operations can branch purely on status:
//! only 200/202 have their body read and decoded, and HTTP 429 is turned
//! into [`ClientError::RateLimited`] before any caller sees it.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};

use crate::error::{ClientError, Result};

/// Default connect timeout (seconds).
const CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds), independent of the job poll loop's
/// own timing.
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub(crate) const CONTENT_TYPE: &str = "application/vnd.api+json";
pub(crate) const ACCEPT: &str = "application/vnd.variomedia.v1+json";

/// Creates the HTTP client with timeout configuration.
pub(crate) fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// Performs one authenticated exchange against the API.
///
/// # Returns
/// * `Ok((status, Some(body)))` — 200/202 responses, body read
/// * `Ok((status, None))` — any other status, body not read
/// * `Err(ClientError::RateLimited)` — HTTP 429
/// * `Err(ClientError::Timeout | ClientError::NetworkError)` — transport failure
pub(crate) async fn execute(
    request: RequestBuilder,
    api_key: &str,
    method: &str,
    url: &str,
) -> Result<(u16, Option<String>)> {
    log::debug!("[variomedia] {method} {url}");

    let response = request
        .header("Authorization", format!("token {api_key}"))
        .header("Content-Type", CONTENT_TYPE)
        .header("Accept", ACCEPT)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                ClientError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

    let status = response.status();
    log::debug!("[variomedia] Response Status: {status}");

    // Extract Retry-After before consuming the response body
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if status == StatusCode::TOO_MANY_REQUESTS {
        let body = response.text().await.unwrap_or_default();
        log::warn!("[variomedia] Rate limited (HTTP 429), retry_after={retry_after:?}");
        return Err(ClientError::RateLimited {
            retry_after,
            raw_message: (!body.is_empty()).then_some(body),
        });
    }

    if matches!(status.as_u16(), 200 | 202) {
        let body = response.text().await.map_err(|e| ClientError::NetworkError {
            detail: format!("Failed to read response body: {e}"),
        })?;
        log::debug!("[variomedia] Response Body: {body}");
        return Ok((status.as_u16(), Some(body)));
    }

    Ok((status.as_u16(), None))
}
