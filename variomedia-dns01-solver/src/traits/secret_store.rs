//! Secret lookup abstraction

use async_trait::async_trait;

use crate::error::SolverResult;
use crate::types::SecretData;

/// Read access to named secrets, addressed by namespace and name.
///
/// The host environment implements this against whatever holds its
/// credentials (a Kubernetes secret store, a vault, a file). The solver
/// only ever reads.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetches a secret's payload.
    ///
    /// # Returns
    /// * `Ok(Some(data))` - the secret exists
    /// * `Ok(None)` - no secret under this name in this namespace
    async fn get(&self, namespace: &str, name: &str) -> SolverResult<Option<SecretData>>;
}
