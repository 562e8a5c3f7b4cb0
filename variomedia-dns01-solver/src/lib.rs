//! # variomedia-dns01-solver
//!
//! ACME DNS-01 challenge solver for zones hosted at
//! [Variomedia](https://www.variomedia.de/), built on
//! [`variomedia-dns01-client`](variomedia_dns01_client).
//!
//! The host framework hands over a [`ChallengeRequest`] — a resolved
//! record name and zone, the challenge key, and a per-issuer
//! configuration mapping each domain to the name of a secret holding
//! that domain's API key. [`Dns01Solver`] then drives the two halves of
//! a DNS-01 validation:
//!
//! - **Present**: resolve the secrets, map the challenge onto a
//!   (host, domain, API key) triple, create the TXT record, and remember
//!   the record URL the API assigned.
//! - **CleanUp**: the same resolution, then delete the record by its
//!   remembered URL. A missing cache entry or an already-deleted record
//!   are successes — clean-up is idempotent, and the host may retry it.
//!
//! The solver is platform-independent: secret storage sits behind the
//! [`SecretStore`] trait, and client construction behind
//! [`TxtClientFactory`], so hosts inject whatever backs their
//! credentials.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use variomedia_dns01_solver::{ChallengeSolver, Dns01Solver, SecretStore};
//!
//! # async fn example(secret_store: Arc<dyn SecretStore>,
//! #                  challenge: variomedia_dns01_solver::ChallengeRequest)
//! #                  -> variomedia_dns01_solver::SolverResult<()> {
//! let solver = Dns01Solver::new(secret_store);
//!
//! solver.present(&challenge).await?;
//! // ... the ACME server validates the challenge ...
//! solver.cleanup(&challenge).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod credentials;
pub mod error;
pub mod mapping;
pub mod solver;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{SolverError, SolverResult};
pub use solver::Dns01Solver;
pub use traits::{ChallengeSolver, SecretStore, TxtClientFactory, VariomediaClientFactory};
pub use types::{ChallengeRequest, CredentialTable, SecretData, SolverConfig};

// Re-export the client crate for hosts that want direct API access
pub use variomedia_dns01_client as client;
