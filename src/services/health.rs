//! API health and auth checks.

use std::sync::Arc;

use serde::Deserialize;

use crate::errors::LettrResult;
use crate::transport::Transporter;
use crate::value_objects::Timestamp;

const HEALTH_ENDPOINT: &str = "health";
const AUTH_CHECK_ENDPOINT: &str = "auth/check";

/// Response from the health endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: Timestamp,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "ok"
    }
}

/// Response from the auth check endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthStatus {
    /// The team the presented API key belongs to
    pub team_id: u64,
    pub timestamp: Timestamp,
}

/// Service for health and authentication checks.
pub struct HealthService {
    transporter: Arc<dyn Transporter>,
}

impl HealthService {
    pub(crate) fn new(transporter: Arc<dyn Transporter>) -> Self {
        Self { transporter }
    }

    /// Checks whether the API is up.
    pub async fn check(&self) -> LettrResult<HealthStatus> {
        let value = self.transporter.get(HEALTH_ENDPOINT).await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Validates the API key and reports the owning team.
    pub async fn auth_check(&self) -> LettrResult<AuthStatus> {
        let value = self.transporter.get(AUTH_CHECK_ENDPOINT).await?;

        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn healthy_only_when_status_is_ok() {
        let healthy: HealthStatus = serde_json::from_value(json!({
            "status": "ok",
            "timestamp": "2026-01-15T10:00:00Z"
        }))
        .unwrap();
        let degraded: HealthStatus = serde_json::from_value(json!({
            "status": "degraded",
            "timestamp": "2026-01-15T10:00:00Z"
        }))
        .unwrap();

        assert!(healthy.is_healthy());
        assert!(!degraded.is_healthy());
    }

    #[test]
    fn auth_status_carries_team_id() {
        let status: AuthStatus = serde_json::from_value(json!({
            "team_id": 42,
            "timestamp": "2026-01-15T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(status.team_id, 42);
    }
}
