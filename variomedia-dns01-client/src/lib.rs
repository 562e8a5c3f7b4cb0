//! # variomedia-dns01-client
//!
//! Client for the [Variomedia DNS API](https://api.variomedia.de/docs/),
//! reduced to what an ACME DNS-01 solver needs: create-or-update and
//! delete of TXT records.
//!
//! The API is asynchronous — a mutation answers with a *queue job* that
//! must be polled until it reaches a terminal status. This crate hides
//! that behind two blocking operations with a bounded poll budget (five
//! re-polls, two seconds apart), so a caller gets exactly one of: the
//! record URL, or a structured error.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use variomedia_dns01_client::{TxtRecordClient, TxtRecordRequest, VariomediaClient, MIN_TTL};
//!
//! # async fn example() -> variomedia_dns01_client::Result<()> {
//! let client = VariomediaClient::new("api-key");
//!
//! let record_url = client
//!     .create_or_update_txt_record(&TxtRecordRequest {
//!         domain: "example.com".to_string(),
//!         host: "_acme-challenge".to_string(),
//!         value: "challenge-token".to_string(),
//!         ttl: MIN_TTL,
//!     })
//!     .await?;
//!
//! // ... the ACME server validates the challenge ...
//!
//! client.delete_txt_record(&record_url).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ClientError>`](ClientError). Rate
//! limiting (HTTP 429) and poll-budget exhaustion are terminal for a
//! single call — this client never retries a mutation on its own, the
//! caller owns retry policy. For deletes, not-found is a success, not an
//! error.

mod client;
mod error;
mod http;
mod poll;
mod types;

// Re-export error types
pub use error::{ClientError, Result};

// Re-export the client and its trait seam
pub use client::{TxtRecordClient, VariomediaClient};

// Re-export wire-level types callers interact with
pub use types::{API_BASE_URL, JobStatus, MIN_TTL, TxtRecordRequest};
