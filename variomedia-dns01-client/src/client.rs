//! TXT record mutations over the asynchronous job queue.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ClientError, Result};
use crate::http;
use crate::poll::{PollOutcome, poll_until};
use crate::types::{API_BASE_URL, ApiRequest, JobEnvelope, JobStatus, RecordPayload, TxtRecordRequest};

/// Delay between two job status polls.
const STATUS_POLL_DELAY: Duration = Duration::from_secs(2);
/// Maximum number of status re-polls after the initial response.
const MAX_POLL_ATTEMPTS: u32 = 5;

/// The record mutation primitive a DNS-01 solver programs against.
///
/// Both operations are blocking from the caller's point of view even
/// though the API is asynchronous: they submit the mutation, then drive
/// the resulting queue job to a terminal state before returning.
#[async_trait]
pub trait TxtRecordClient: Send + Sync {
    /// Creates or updates a TXT record.
    ///
    /// Returns the URL of the resulting DNS record; deletes address the
    /// record by this URL, so the caller must keep it until clean-up.
    async fn create_or_update_txt_record(&self, req: &TxtRecordRequest) -> Result<String>;

    /// Deletes the record at `record_url`.
    ///
    /// An empty URL and an HTTP not-found at any step both count as
    /// success: either way the record does not exist afterwards.
    async fn delete_txt_record(&self, record_url: &str) -> Result<()>;
}

/// Poll state for deletes. The record (or its job) may come back 404 at
/// any step, which is a terminal success rather than an error.
#[derive(Debug)]
enum JobProbe {
    Job(JobEnvelope),
    Gone,
}

/// Client for the Variomedia DNS API.
pub struct VariomediaClient {
    client: Client,
    api_key: String,
    base_url: String,
    poll_delay: Duration,
}

impl VariomediaClient {
    /// Creates a client authenticating with `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: http::create_http_client(),
            api_key: api_key.into(),
            base_url: API_BASE_URL.to_string(),
            poll_delay: STATUS_POLL_DELAY,
        }
    }

    /// Points the client at a different endpoint (staging, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the delay between job status polls.
    #[must_use]
    pub fn with_poll_delay(mut self, poll_delay: Duration) -> Self {
        self.poll_delay = poll_delay;
        self
    }

    /// Decodes a mutation or poll response into a job envelope.
    ///
    /// Rate limiting has already been handled in [`http::execute`]; any
    /// status outside the accepted set fails with [`ClientError::Rejected`].
    fn decode_envelope(status: u16, body: Option<String>) -> Result<JobEnvelope> {
        if !matches!(status, 200 | 201 | 202) {
            return Err(ClientError::Rejected { status });
        }
        let body = body.ok_or_else(|| ClientError::ParseError {
            detail: format!("no response body to decode (HTTP {status})"),
        })?;
        serde_json::from_str(&body).map_err(|e| ClientError::ParseError {
            detail: e.to_string(),
        })
    }

    /// One status re-fetch via the job's `queue-job` link.
    async fn refetch_job(&self, job: &JobEnvelope) -> Result<(u16, Option<String>)> {
        let url = job
            .poll_link()
            .ok_or_else(|| ClientError::ParseError {
                detail: "job is missing the queue-job link".to_string(),
            })?
            .to_owned();
        log::debug!("[variomedia] DNS job still pending");
        http::execute(self.client.get(&url), &self.api_key, "GET", &url).await
    }
}

#[async_trait]
impl TxtRecordClient for VariomediaClient {
    async fn create_or_update_txt_record(&self, req: &TxtRecordRequest) -> Result<String> {
        log::debug!(
            "[variomedia] Creating TXT record for host '{}' in domain '{}' (ttl {})",
            req.host,
            req.domain,
            req.ttl
        );

        let url = format!("{}/dns-records", self.base_url);
        let payload = serde_json::to_string(&ApiRequest {
            data: RecordPayload::txt(req),
        })
        .map_err(|e| ClientError::SerializationError {
            detail: e.to_string(),
        })?;

        let (status, body) = http::execute(
            self.client.post(&url).body(payload),
            &self.api_key,
            "POST",
            &url,
        )
        .await?;
        let job = Self::decode_envelope(status, body)?;

        let outcome = poll_until(
            MAX_POLL_ATTEMPTS,
            self.poll_delay,
            job,
            |job: &JobEnvelope| job.status() == JobStatus::Pending,
            |job| async move {
                let (status, body) = self.refetch_job(&job).await?;
                Self::decode_envelope(status, body)
            },
        )
        .await?;

        let job = match outcome {
            PollOutcome::Settled(job) if job.status() == JobStatus::Done => job,
            PollOutcome::Settled(job) | PollOutcome::Exhausted(job) => {
                return Err(ClientError::JobTimedOut {
                    last_status: job.status().to_string(),
                });
            }
        };

        let record_url = job
            .record_link()
            .ok_or_else(|| ClientError::ParseError {
                detail: "job is missing the dns-record link".to_string(),
            })?
            .to_owned();
        log::debug!("[variomedia] DNS job finished, record at {record_url}");
        Ok(record_url)
    }

    async fn delete_txt_record(&self, record_url: &str) -> Result<()> {
        if record_url.is_empty() {
            // Nothing to address: the record was never created here, or
            // another process already cleaned it up.
            log::info!("[variomedia] no record URL to delete, treating record as already gone");
            return Ok(());
        }

        log::debug!("[variomedia] Deleting DNS record at {record_url}");

        let (status, body) = http::execute(
            self.client.delete(record_url),
            &self.api_key,
            "DELETE",
            record_url,
        )
        .await?;
        if status == 404 {
            log::debug!("[variomedia] DNS record is already gone");
            return Ok(());
        }
        let job = Self::decode_envelope(status, body)?;

        let outcome = poll_until(
            MAX_POLL_ATTEMPTS,
            self.poll_delay,
            JobProbe::Job(job),
            |probe: &JobProbe| matches!(probe, JobProbe::Job(job) if job.status() == JobStatus::Pending),
            |probe| async move {
                let JobProbe::Job(job) = probe else {
                    return Ok(JobProbe::Gone);
                };
                let (status, body) = self.refetch_job(&job).await?;
                if status == 404 {
                    log::debug!("[variomedia] DNS record is already gone");
                    return Ok(JobProbe::Gone);
                }
                Self::decode_envelope(status, body).map(JobProbe::Job)
            },
        )
        .await?;

        match outcome {
            PollOutcome::Settled(JobProbe::Gone) | PollOutcome::Exhausted(JobProbe::Gone) => Ok(()),
            PollOutcome::Settled(JobProbe::Job(job)) if job.status() == JobStatus::Done => {
                log::debug!("[variomedia] DNS job finished");
                Ok(())
            }
            PollOutcome::Settled(JobProbe::Job(job)) | PollOutcome::Exhausted(JobProbe::Job(job)) => {
                Err(ClientError::JobTimedOut {
                    last_status: job.status().to_string(),
                })
            }
        }
    }
}
