//! Wire types for the Variomedia DNS API (2019+ dialect).
//!
//! The API speaks a JSON:API-flavored envelope: mutations POST a
//! `{"data": {...}}` payload and receive a queue job back, whose `links`
//! carry the poll URL (`queue-job`) and, once resolved, the URL of the
//! affected record (`dns-record`).

use serde::{Deserialize, Serialize};

/// Live API endpoint.
pub const API_BASE_URL: &str = "https://api.variomedia.de";

/// Variomedia reports an error for TTL values below this floor.
pub const MIN_TTL: u32 = 300;

/// A TXT record mutation, as accepted by
/// [`TxtRecordClient::create_or_update_txt_record`](crate::TxtRecordClient::create_or_update_txt_record).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxtRecordRequest {
    /// Registrable domain the record lives under, without trailing dot.
    pub domain: String,
    /// Host label relative to `domain`; empty for a record at the apex.
    pub host: String,
    /// TXT record data.
    pub value: String,
    /// Record TTL in seconds; must be at least [`MIN_TTL`].
    pub ttl: u32,
}

// ============ Request envelope ============

#[derive(Debug, Serialize)]
pub(crate) struct ApiRequest<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecordPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: RecordAttributes,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecordAttributes {
    pub record_type: &'static str,
    pub name: String,
    pub domain: String,
    pub data: String,
    pub ttl: u32,
}

impl RecordPayload {
    pub(crate) fn txt(req: &TxtRecordRequest) -> Self {
        Self {
            kind: "dns-record",
            attributes: RecordAttributes {
                record_type: "TXT",
                name: req.host.clone(),
                domain: req.domain.clone(),
                data: req.value.clone(),
                ttl: req.ttl,
            },
        }
    }
}

// ============ Response envelope ============

/// Status reported in a queue job's `attributes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum JobStatus {
    /// The mutation has been queued but not applied yet.
    Pending,
    /// The mutation has been applied.
    Done,
    /// Any status string this client does not recognize.
    Other(String),
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "done" => Self::Done,
            _ => Self::Other(s),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Done => f.write_str("done"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// Response envelope shared by mutations and job status polls.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JobEnvelope {
    pub data: JobData,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JobData {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub attributes: JobAttributes,
    #[serde(default)]
    pub links: JobLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct JobAttributes {
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct JobLinks {
    #[serde(rename = "queue-job")]
    pub queue_job: Option<String>,
    #[serde(rename = "dns-record")]
    pub dns_record: Option<String>,
}

impl JobEnvelope {
    /// Job status; a missing `status` attribute maps to an empty
    /// [`JobStatus::Other`], which no state machine treats as success.
    pub(crate) fn status(&self) -> JobStatus {
        self.data
            .attributes
            .status
            .clone()
            .unwrap_or_else(|| JobStatus::Other(String::new()))
    }

    /// URL to re-fetch this job's status from.
    pub(crate) fn poll_link(&self) -> Option<&str> {
        self.data.links.queue_job.as_deref()
    }

    /// URL of the DNS record this job created or touched.
    pub(crate) fn record_link(&self) -> Option<&str> {
        self.data.links.dns_record.as_deref()
    }
}
