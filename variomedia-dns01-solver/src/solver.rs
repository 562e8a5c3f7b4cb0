//! The Present/CleanUp facade.

use std::sync::Arc;

use async_trait::async_trait;

use variomedia_dns01_client::{MIN_TTL, TxtRecordRequest};

use crate::cache::{EntryCache, EntryKey};
use crate::credentials::resolve_credentials;
use crate::error::{SolverError, SolverResult};
use crate::mapping::{ChallengeTarget, map_challenge};
use crate::traits::{ChallengeSolver, SecretStore, TxtClientFactory, VariomediaClientFactory};
use crate::types::{ChallengeRequest, decode_config};

/// DNS-01 solver backed by the Variomedia DNS API.
///
/// Owns the only state that survives across operations: the record
/// location cache. A single instance is shared by all concurrent
/// Present/CleanUp calls for the lifetime of the process.
pub struct Dns01Solver {
    secret_store: Arc<dyn SecretStore>,
    clients: Arc<dyn TxtClientFactory>,
    cache: EntryCache,
    ttl: u32,
}

impl Dns01Solver {
    /// Creates a solver resolving secrets from `secret_store` and talking
    /// to the live API.
    #[must_use]
    pub fn new(secret_store: Arc<dyn SecretStore>) -> Self {
        Self::with_client_factory(secret_store, Arc::new(VariomediaClientFactory))
    }

    /// Creates a solver with a custom client factory (tests, staging).
    #[must_use]
    pub fn with_client_factory(
        secret_store: Arc<dyn SecretStore>,
        clients: Arc<dyn TxtClientFactory>,
    ) -> Self {
        Self {
            secret_store,
            clients,
            cache: EntryCache::new(),
            ttl: MIN_TTL,
        }
    }

    /// Overrides the record TTL. The API itself rejects values below
    /// [`MIN_TTL`]; passing a compliant value is the caller's job.
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Decodes the challenge's configuration, resolves its secrets and
    /// maps the challenge onto concrete record coordinates.
    async fn resolve_target(&self, ch: &ChallengeRequest) -> SolverResult<ChallengeTarget> {
        let config = decode_config(ch.config.as_ref())?;
        let credentials =
            resolve_credentials(self.secret_store.as_ref(), &config, &ch.resource_namespace)
                .await?;
        map_challenge(&ch.resolved_fqdn, &ch.resolved_zone, &credentials)
    }

    fn entry_key(target: &ChallengeTarget, ch: &ChallengeRequest) -> EntryKey {
        EntryKey {
            domain: target.domain.clone(),
            host: target.host.clone(),
            challenge_key: ch.key.clone(),
        }
    }

    async fn present_inner(&self, ch: &ChallengeRequest) -> SolverResult<()> {
        let target = self.resolve_target(ch).await?;
        let client = self.clients.client_for(&target.api_key);

        let record_url = client
            .create_or_update_txt_record(&TxtRecordRequest {
                domain: target.domain.clone(),
                host: target.host.clone(),
                value: ch.key.clone(),
                ttl: self.ttl,
            })
            .await?;

        self.cache
            .insert(Self::entry_key(&target, ch), record_url)
            .await;
        log::info!(
            "presented TXT record '{}' in zone '{}'",
            ch.resolved_fqdn,
            ch.resolved_zone
        );
        Ok(())
    }

    async fn cleanup_inner(&self, ch: &ChallengeRequest) -> SolverResult<()> {
        let target = self.resolve_target(ch).await?;
        let key = Self::entry_key(&target, ch);

        let Some(record_url) = self.cache.get(&key).await else {
            // Nothing cached: never presented from this process, or
            // already cleaned up. Both mean the record is not ours to
            // delete, which is an acceptable final state.
            log::info!(
                "no cached record URL for '{}', nothing to clean up",
                ch.resolved_fqdn
            );
            return Ok(());
        };

        let client = self.clients.client_for(&target.api_key);
        client.delete_txt_record(&record_url).await?;

        // The record is gone; only now does the cache entry go too.
        self.cache.remove(&key).await;
        log::info!(
            "cleaned up TXT record '{}' in zone '{}'",
            ch.resolved_fqdn,
            ch.resolved_zone
        );
        Ok(())
    }

    /// Wraps a failed operation with its zone and logs it at the level
    /// [`SolverError::is_expected`] asks for.
    fn surface(zone: &str, result: SolverResult<()>) -> SolverResult<()> {
        result.map_err(|e| {
            let e = SolverError::in_zone(zone, e);
            if e.is_expected() {
                log::warn!("{e}");
            } else {
                log::error!("{e}");
            }
            e
        })
    }
}

#[async_trait]
impl ChallengeSolver for Dns01Solver {
    fn name(&self) -> &'static str {
        "variomedia"
    }

    async fn present(&self, ch: &ChallengeRequest) -> SolverResult<()> {
        log::debug!(
            "present: fqdn '{}', zone '{}'",
            ch.resolved_fqdn,
            ch.resolved_zone
        );
        Self::surface(&ch.resolved_zone, self.present_inner(ch).await)
    }

    async fn cleanup(&self, ch: &ChallengeRequest) -> SolverResult<()> {
        log::debug!(
            "cleanup: fqdn '{}', zone '{}'",
            ch.resolved_fqdn,
            ch.resolved_zone
        );
        Self::surface(&ch.resolved_zone, self.cleanup_inner(ch).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::test_utils::{MockClientFactory, MockSecretStore};
    use crate::types::API_TOKEN_FIELD;

    fn challenge(fqdn: &str, zone: &str, key: &str) -> ChallengeRequest {
        ChallengeRequest {
            resolved_fqdn: fqdn.to_string(),
            resolved_zone: zone.to_string(),
            key: key.to_string(),
            config: Some(serde_json::json!({ "example.com": "vario-key" })),
            resource_namespace: "certs".to_string(),
        }
    }

    async fn test_solver() -> (Dns01Solver, Arc<MockClientFactory>) {
        let store = Arc::new(MockSecretStore::new());
        store
            .put("certs", "vario-key", API_TOKEN_FIELD, b"the-api-key\r\n")
            .await;
        let factory = Arc::new(MockClientFactory::new());
        let solver = Dns01Solver::with_client_factory(store, factory.clone());
        (solver, factory)
    }

    #[tokio::test]
    async fn present_creates_the_record_and_caches_its_url() {
        let (solver, factory) = test_solver().await;
        let ch = challenge("_acme-challenge.foo.example.com.", "example.com.", "token-1");

        solver.present(&ch).await.unwrap();

        let created = factory.client.created.read().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].domain, "example.com");
        assert_eq!(created[0].host, "_acme-challenge.foo");
        assert_eq!(created[0].value, "token-1");
        assert_eq!(created[0].ttl, variomedia_dns01_client::MIN_TTL);

        // Secrets resolve through trimming before they reach the factory.
        assert_eq!(factory.keys_seen(), vec!["the-api-key".to_string()]);
        assert_eq!(solver.cache.len().await, 1);
    }

    #[tokio::test]
    async fn present_then_cleanup_round_trip_leaves_no_cache_entry() {
        let (solver, factory) = test_solver().await;
        let ch = challenge("_acme-challenge.example.com.", "example.com.", "token-1");

        solver.present(&ch).await.unwrap();
        solver.cleanup(&ch).await.unwrap();

        let created = factory.client.created.read().await;
        let deleted = factory.client.deleted.read().await;
        assert_eq!(created.len(), 1);
        assert_eq!(deleted.len(), 1);
        assert!(
            deleted[0].starts_with("https://"),
            "delete must address the URL returned by create, got {}",
            deleted[0]
        );
        assert_eq!(solver.cache.len().await, 0);
    }

    #[tokio::test]
    async fn apex_challenges_are_supported() {
        let (solver, factory) = test_solver().await;
        let ch = challenge("example.com.", "example.com.", "token-1");

        solver.present(&ch).await.unwrap();
        solver.cleanup(&ch).await.unwrap();

        let created = factory.client.created.read().await;
        assert_eq!(created[0].host, "");
        assert_eq!(solver.cache.len().await, 0);
    }

    #[tokio::test]
    async fn cleanup_without_present_is_a_success() {
        let (solver, factory) = test_solver().await;
        let ch = challenge("_acme-challenge.example.com.", "example.com.", "token-1");

        solver.cleanup(&ch).await.unwrap();

        assert!(factory.client.deleted.read().await.is_empty());
    }

    #[tokio::test]
    async fn cleanup_twice_is_idempotent() {
        let (solver, factory) = test_solver().await;
        let ch = challenge("_acme-challenge.example.com.", "example.com.", "token-1");

        solver.present(&ch).await.unwrap();
        solver.cleanup(&ch).await.unwrap();
        solver.cleanup(&ch).await.unwrap();

        assert_eq!(factory.client.deleted.read().await.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_validations_for_the_same_name_stay_separate() {
        let (solver, factory) = test_solver().await;
        let first = challenge("_acme-challenge.example.com.", "example.com.", "token-1");
        let second = challenge("_acme-challenge.example.com.", "example.com.", "token-2");

        solver.present(&first).await.unwrap();
        solver.present(&second).await.unwrap();
        assert_eq!(solver.cache.len().await, 2);

        solver.cleanup(&first).await.unwrap();
        assert_eq!(solver.cache.len().await, 1, "only token-1's entry is gone");

        solver.cleanup(&second).await.unwrap();
        assert_eq!(solver.cache.len().await, 0);
        assert_eq!(factory.client.deleted.read().await.len(), 2);
    }

    #[tokio::test]
    async fn present_fails_for_an_unconfigured_domain() {
        let (solver, factory) = test_solver().await;
        let ch = challenge("_acme-challenge.example.org.", "example.org.", "token-1");

        let err = solver.present(&ch).await.unwrap_err();
        assert!(
            matches!(
                &err,
                SolverError::Zone { zone, source }
                    if zone == "example.org"
                        && matches!(source.as_ref(), SolverError::DomainNotConfigured(d) if d == "example.org")
            ),
            "unexpected error: {err:?}"
        );
        assert!(factory.client.created.read().await.is_empty());
    }

    #[tokio::test]
    async fn present_rejects_a_malformed_config_blob() {
        let (solver, _factory) = test_solver().await;
        let mut ch = challenge("_acme-challenge.example.com.", "example.com.", "token-1");
        ch.config = Some(serde_json::json!(["not", "a", "map"]));

        let err = solver.present(&ch).await.unwrap_err();
        assert!(
            matches!(
                &err,
                SolverError::Zone { source, .. }
                    if matches!(source.as_ref(), SolverError::ConfigInvalid(_))
            ),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn present_surfaces_rate_limiting_without_caching() {
        let (solver, factory) = test_solver().await;
        factory
            .fail_next_create(ClientError::RateLimited {
                retry_after: Some(30),
                raw_message: None,
            })
            .await;
        let ch = challenge("_acme-challenge.example.com.", "example.com.", "token-1");

        let err = solver.present(&ch).await.unwrap_err();
        assert!(
            matches!(
                &err,
                SolverError::Zone { source, .. }
                    if matches!(source.as_ref(), SolverError::Client(ClientError::RateLimited { .. }))
            ),
            "unexpected error: {err:?}"
        );
        assert_eq!(solver.cache.len().await, 0, "nothing to clean up later");
    }

    #[tokio::test]
    async fn failed_cleanup_keeps_the_cache_entry_for_a_retry() {
        let (solver, factory) = test_solver().await;
        let ch = challenge("_acme-challenge.example.com.", "example.com.", "token-1");

        solver.present(&ch).await.unwrap();
        factory
            .fail_next_delete(ClientError::Rejected { status: 500 })
            .await;

        solver.cleanup(&ch).await.unwrap_err();
        assert_eq!(solver.cache.len().await, 1, "entry survives the failure");

        // The host framework retries; this time the delete goes through.
        solver.cleanup(&ch).await.unwrap();
        assert_eq!(solver.cache.len().await, 0);
    }

    #[tokio::test]
    async fn solver_identifies_itself_to_the_host() {
        let (solver, _factory) = test_solver().await;
        assert_eq!(solver.name(), "variomedia");
    }
}
