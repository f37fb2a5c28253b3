//! Webhook configuration and delivery health.

use std::sync::Arc;

use serde::Deserialize;

use crate::collections::{EventTypeCollection, WebhookCollection};
use crate::errors::LettrResult;
use crate::transport::Transporter;
use crate::types::{EventType, WebhookAuthType, WebhookStatus};
use crate::value_objects::{Timestamp, WebhookId};

const WEBHOOKS_ENDPOINT: &str = "webhooks";

/// A configured webhook endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Webhook {
    pub id: WebhookId,
    pub name: String,
    pub url: String,
    pub enabled: bool,
    pub auth_type: WebhookAuthType,
    pub event_types: EventTypeCollection,
    pub created_at: Timestamp,
    #[serde(default)]
    pub last_status: Option<WebhookStatus>,
    #[serde(default)]
    pub last_triggered_at: Option<Timestamp>,
    #[serde(default)]
    pub last_error: Option<String>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Webhook {
    /// Enabled and not known to be failing. A webhook that has never
    /// fired counts as healthy.
    pub fn is_healthy(&self) -> bool {
        self.enabled && self.last_status != Some(WebhookStatus::Failure)
    }

    /// The most recent delivery attempt failed.
    pub fn is_failing(&self) -> bool {
        self.last_status == Some(WebhookStatus::Failure)
    }

    /// Whether this webhook subscribes to the given event type.
    pub fn listens_to(&self, event_type: EventType) -> bool {
        self.event_types.contains(event_type)
    }
}

#[derive(Debug, Deserialize)]
struct ListWebhooksWire {
    webhooks: WebhookCollection,
}

/// Service for inspecting webhooks.
pub struct WebhookService {
    transporter: Arc<dyn Transporter>,
}

impl WebhookService {
    pub(crate) fn new(transporter: Arc<dyn Transporter>) -> Self {
        Self { transporter }
    }

    /// Lists all webhooks on the team.
    pub async fn list(&self) -> LettrResult<WebhookCollection> {
        let value = self.transporter.get(WEBHOOKS_ENDPOINT).await?;
        let wire: ListWebhooksWire = serde_json::from_value(value)?;

        Ok(wire.webhooks)
    }

    /// Fetches a single webhook.
    pub async fn get(&self, webhook_id: &WebhookId) -> LettrResult<Webhook> {
        let path = format!("{WEBHOOKS_ENDPOINT}/{}", webhook_id.as_str());
        let value = self.transporter.get(&path).await?;

        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn webhook(value: serde_json::Value) -> Webhook {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn webhook_deserializes_with_optional_fields_absent() {
        let hook = webhook(json!({
            "id": "wh_1",
            "name": "events",
            "url": "https://example.com/hooks",
            "enabled": true,
            "auth_type": "none",
            "event_types": ["delivery", "bounce"],
            "created_at": "2026-01-15T10:00:00Z"
        }));

        assert!(hook.is_healthy());
        assert!(!hook.is_failing());
        assert!(hook.listens_to(EventType::Bounce));
        assert!(!hook.listens_to(EventType::Click));
    }

    #[test]
    fn failing_webhook_is_not_healthy() {
        let hook = webhook(json!({
            "id": "wh_1",
            "name": "events",
            "url": "https://example.com/hooks",
            "enabled": true,
            "auth_type": "basic",
            "event_types": ["delivery"],
            "last_status": "failure",
            "last_error": "connect timeout",
            "created_at": "2026-01-15T10:00:00Z"
        }));

        assert!(hook.is_failing());
        assert!(!hook.is_healthy());
        assert_eq!(hook.last_error.as_deref(), Some("connect timeout"));
    }

    #[test]
    fn disabled_webhook_is_not_healthy_even_when_succeeding() {
        let hook = webhook(json!({
            "id": "wh_1",
            "name": "events",
            "url": "https://example.com/hooks",
            "enabled": false,
            "auth_type": "oauth2",
            "event_types": ["delivery"],
            "last_status": "success",
            "created_at": "2026-01-15T10:00:00Z"
        }));

        assert!(!hook.is_healthy());
        assert!(!hook.is_failing());
    }
}
