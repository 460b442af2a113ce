//! Queue job types.
//!
//! Jobs are the unit of work exchanged between the crawler (producer) and the
//! worker (consumer). A job carries a kind tag and a kind-specific payload.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a queued job. Each kind has exactly one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobKind {
    SyncHotel,
    SyncAll,
    DeleteHotel,
    IndexHotel,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::SyncHotel => "syncHotel",
            JobKind::SyncAll => "syncAll",
            JobKind::DeleteHotel => "deleteHotel",
            JobKind::IndexHotel => "indexHotel",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload handed to a job handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_address: Option<String>,
}

impl JobPayload {
    pub fn for_hotel(hotel_address: impl Into<String>) -> Self {
        Self {
            hotel_address: Some(hotel_address.into()),
        }
    }
}

/// A queued unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "type")]
    pub kind: JobKind,
    #[serde(default)]
    pub payload: JobPayload,
    /// Number of previous failed deliveries of this job.
    #[serde(default)]
    pub attempt: u32,
}

impl Job {
    pub fn new(kind: JobKind, payload: JobPayload) -> Self {
        Self {
            kind,
            payload,
            attempt: 0,
        }
    }

    pub fn sync_hotel(hotel_address: impl Into<String>) -> Self {
        Self::new(JobKind::SyncHotel, JobPayload::for_hotel(hotel_address))
    }

    pub fn sync_all() -> Self {
        Self::new(JobKind::SyncAll, JobPayload::default())
    }

    pub fn delete_hotel(hotel_address: impl Into<String>) -> Self {
        Self::new(JobKind::DeleteHotel, JobPayload::for_hotel(hotel_address))
    }

    pub fn index_hotel(hotel_address: impl Into<String>) -> Self {
        Self::new(JobKind::IndexHotel, JobPayload::for_hotel(hotel_address))
    }

    /// The same job, scheduled for its next delivery.
    pub fn redelivery(&self) -> Self {
        Self {
            attempt: self.attempt + 1,
            ..self.clone()
        }
    }
}
