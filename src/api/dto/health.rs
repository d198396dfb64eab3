//! Health check payload.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub storage: StorageProbe,
}

/// Result of counting links against the configured store.
#[derive(Debug, Serialize)]
pub struct StorageProbe {
    pub status: ProbeStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StorageProbe {
    pub fn reachable(links: i64) -> Self {
        Self {
            status: ProbeStatus::Ok,
            links: Some(links),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Error,
            links: None,
            error: Some(error.into()),
        }
    }
}
