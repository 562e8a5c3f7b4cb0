//! Inbound solver surface

use async_trait::async_trait;

use crate::error::SolverResult;
use crate::types::ChallengeRequest;

/// The two operations the host framework drives a DNS-01 solver with.
///
/// The framework may retry either operation and may run them concurrently
/// for distinct challenges, so both must be idempotent and safe to call
/// on a shared instance.
#[async_trait]
pub trait ChallengeSolver: Send + Sync {
    /// Identifier the host uses to route challenges to this solver.
    fn name(&self) -> &'static str;

    /// Ensures the challenge TXT record exists at the DNS provider.
    async fn present(&self, ch: &ChallengeRequest) -> SolverResult<()>;

    /// Removes the challenge TXT record. Only the record matching the
    /// challenge's `key` is affected; a record that is already gone is a
    /// success.
    async fn cleanup(&self, ch: &ChallengeRequest) -> SolverResult<()>;
}
