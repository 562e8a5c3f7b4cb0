//! Solver-facing types.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{SolverError, SolverResult};

/// Secret payload: field name → raw bytes.
pub type SecretData = HashMap<String, Vec<u8>>;

/// Per-issuer solver configuration: domain → name of the secret holding
/// that domain's API key.
pub type SolverConfig = HashMap<String, String>;

/// Resolved credential table: domain (no trailing dot) → API key.
///
/// Built once per operation and immutable afterwards. Values are secrets;
/// keep them out of logs.
pub type CredentialTable = HashMap<String, String>;

/// Field of the referenced secret that holds the API key.
pub const API_TOKEN_FIELD: &str = "api-token";

/// A DNS-01 challenge as handed over by the host framework.
///
/// The framework guarantees `resolved_fqdn` and `resolved_zone` are
/// dot-terminated, and that `resolved_zone` is a suffix of `resolved_fqdn`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeRequest {
    /// Fully-qualified record name, dot-terminated.
    pub resolved_fqdn: String,
    /// Resolved zone, dot-terminated.
    pub resolved_zone: String,
    /// Challenge key: the desired TXT value, and at the same time the
    /// discriminator between concurrent validations for the same name.
    pub key: String,
    /// Per-issuer configuration blob; decodes to a [`SolverConfig`].
    pub config: Option<serde_json::Value>,
    /// Namespace the referenced secrets live in.
    pub resource_namespace: String,
}

/// Decodes the per-issuer configuration blob.
///
/// An absent blob is valid and yields an empty mapping (the base case:
/// no domains configured).
pub fn decode_config(raw: Option<&serde_json::Value>) -> SolverResult<SolverConfig> {
    match raw {
        None => Ok(SolverConfig::new()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| SolverError::ConfigInvalid(e.to_string())),
    }
}
