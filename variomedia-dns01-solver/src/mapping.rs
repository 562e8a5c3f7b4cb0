//! Challenge-to-record resolution.

use crate::error::{SolverError, SolverResult};
use crate::types::CredentialTable;

/// A challenge resolved against the credential table: concrete record
/// coordinates plus the API key authorized to mutate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeTarget {
    /// Host label relative to `domain`; empty for a record at the apex.
    pub host: String,
    /// Registrable domain, without trailing dot.
    pub domain: String,
    /// API key for `domain`. Secret: keep out of logs.
    pub api_key: String,
}

/// Computes the (host, domain, API key) triple for a challenge.
///
/// Both `fqdn` and `zone` arrive dot-terminated from the host framework,
/// with `zone` a suffix of `fqdn`. `fqdn == zone` yields an empty host
/// label — a TXT record at the zone apex, which is valid.
///
/// Pure and side-effect-free; no network or credential calls are made.
pub fn map_challenge(
    fqdn: &str,
    zone: &str,
    credentials: &CredentialTable,
) -> SolverResult<ChallengeTarget> {
    let host = fqdn.strip_suffix(zone).unwrap_or(fqdn);
    let host = host.strip_suffix('.').unwrap_or(host);
    let domain = zone.strip_suffix('.').unwrap_or(zone);

    let api_key = credentials
        .get(domain)
        .ok_or_else(|| SolverError::DomainNotConfigured(domain.to_string()))?
        .clone();

    Ok(ChallengeTarget {
        host: host.to_string(),
        domain: domain.to_string(),
        api_key,
    })
}
