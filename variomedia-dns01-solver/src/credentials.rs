//! Credential resolution: secret references → literal API keys.

use crate::error::{SolverError, SolverResult};
use crate::traits::SecretStore;
use crate::types::{API_TOKEN_FIELD, CredentialTable, SolverConfig};

/// Resolves every configured secret reference to a literal API key.
///
/// All or nothing: the first domain whose secret fails to resolve fails
/// the whole resolution, and no partial table escapes.
pub async fn resolve_credentials(
    store: &dyn SecretStore,
    config: &SolverConfig,
    namespace: &str,
) -> SolverResult<CredentialTable> {
    let mut table = CredentialTable::new();

    for (domain, secret_name) in config {
        log::debug!("loading secret '{namespace}/{secret_name}' for domain '{domain}'");

        let secret = store.get(namespace, secret_name).await?.ok_or_else(|| {
            SolverError::SecretNotFound {
                namespace: namespace.to_string(),
                name: secret_name.clone(),
            }
        })?;

        let raw = secret.get(API_TOKEN_FIELD).ok_or_else(|| {
            SolverError::SecretFieldMissing {
                namespace: namespace.to_string(),
                name: secret_name.clone(),
                field: API_TOKEN_FIELD.to_string(),
            }
        })?;

        // The API rejects keys carrying incidental trailing whitespace,
        // which secrets pasted from a terminal often do.
        let api_key = String::from_utf8_lossy(raw)
            .trim_end_matches(['\r', '\n', ' '])
            .to_string();
        table.insert(domain.clone(), api_key);
    }

    Ok(table)
}
