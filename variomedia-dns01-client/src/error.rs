use serde::{Deserialize, Serialize};

/// Unified error type for all Variomedia API operations.
///
/// All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on
/// a later attempt:
/// - [`NetworkError`](Self::NetworkError) — network connectivity issues
/// - [`Timeout`](Self::Timeout) — request timed out
/// - [`RateLimited`](Self::RateLimited) — API rate limit exceeded
///
/// This client never retries internally beyond the bounded job-poll loop;
/// retry policy belongs to the caller (for an ACME solver, the host
/// framework re-invokes Present/CleanUp on its own schedule).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ClientError {
    /// A network-level error occurred (DNS resolution failure, connection
    /// refused, truncated response body, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out (30 s client-side budget, independent of
    /// the job poll loop's own timing).
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    ///
    /// Terminal for the current call; the request should succeed after
    /// waiting.
    RateLimited {
        /// Suggested wait time in seconds before retrying, if the API
        /// provided a `Retry-After` header.
        retry_after: Option<u64>,
        /// Original response body, if available.
        raw_message: Option<String>,
    },

    /// The API answered a mutation or poll with a status code outside the
    /// accepted set.
    Rejected {
        /// HTTP status code reported by the API.
        status: u16,
    },

    /// The queue job did not reach `done` within the poll budget.
    JobTimedOut {
        /// Most recently observed job status.
        last_status: String,
    },

    /// Failed to decode the API's response envelope.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ClientError {
    /// Whether a later, identical call could plausibly succeed.
    ///
    /// Rate limits and transport failures clear on their own; a rejected
    /// mutation or a malformed envelope will not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => {
                write!(f, "[variomedia] Network error: {detail}")
            }
            Self::Timeout { detail } => {
                write!(f, "[variomedia] Request timeout: {detail}")
            }
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "[variomedia] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[variomedia] Rate limited")
                }
            }
            Self::Rejected { status } => {
                write!(f, "[variomedia] Server rejected the request (HTTP {status})")
            }
            Self::JobTimedOut { last_status } => {
                write!(
                    f,
                    "[variomedia] DNS job timed out with most recent status '{last_status}'"
                )
            }
            Self::ParseError { detail } => {
                write!(f, "[variomedia] Parse error: {detail}")
            }
            Self::SerializationError { detail } => {
                write!(f, "[variomedia] Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
