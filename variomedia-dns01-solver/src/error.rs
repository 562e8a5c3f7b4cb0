//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use variomedia_dns01_client::ClientError;

/// Solver layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum SolverError {
    /// The per-issuer configuration blob failed to decode
    #[error("Error decoding solver config: {0}")]
    ConfigInvalid(String),

    /// The referenced secret does not exist
    #[error("Secret \"{namespace}/{name}\" not found")]
    SecretNotFound { namespace: String, name: String },

    /// The secret exists but lacks the expected field
    #[error("Key \"{field}\" not found in secret \"{namespace}/{name}\"")]
    SecretFieldMissing {
        namespace: String,
        name: String,
        field: String,
    },

    /// The challenge's domain has no API key configured
    #[error("Domain '{0}' not found in config")]
    DomainNotConfigured(String),

    /// Secret store access failed
    #[error("Secret store error: {0}")]
    SecretStoreError(String),

    /// API client error (converted from the client library)
    #[error("{0}")]
    Client(#[from] ClientError),

    /// Any solver error, wrapped with the zone it occurred in
    #[error("zone '{zone}': {source}")]
    Zone {
        zone: String,
        #[source]
        source: Box<SolverError>,
    },
}

impl SolverError {
    /// Wraps `source` with the zone the operation was working on.
    ///
    /// The trailing dot of a resolved zone is dropped so the message names
    /// the domain the way the credential table does.
    #[must_use]
    pub fn in_zone(zone: &str, source: SolverError) -> Self {
        Self::Zone {
            zone: zone.trim_end_matches('.').to_string(),
            source: Box::new(source),
        }
    }

    /// Whether it is expected behavior (bad configuration, resource does
    /// not exist, etc.), used for log level selection.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ConfigInvalid(_)
            | Self::SecretNotFound { .. }
            | Self::SecretFieldMissing { .. }
            | Self::DomainNotConfigured(_) => true,
            Self::Zone { source, .. } => source.is_expected(),
            Self::SecretStoreError(_) | Self::Client(_) => false,
        }
    }
}

/// Solver layer Result type alias
pub type SolverResult<T> = std::result::Result<T, SolverError>;
