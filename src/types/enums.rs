//! Wire-level enums shared across resources.

use serde::{Deserialize, Serialize};

/// Email event types reported by the events endpoints and consumed by
/// webhook subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Message accepted for delivery
    Injection,
    /// Message delivered to the recipient server
    Delivery,
    /// Message bounced
    Bounce,
    /// Delivery delayed, will be retried
    Delay,
    /// Message rejected by sending policy
    PolicyRejection,
    /// Out-of-band bounce received after delivery
    OutOfBand,
    /// Message opened
    Open,
    /// First open for a message
    InitialOpen,
    /// Link clicked
    Click,
    /// Template rendering failed
    GenerationFailure,
    /// Template rendering rejected
    GenerationRejection,
    /// Recipient marked the message as spam
    SpamComplaint,
    /// Unsubscribed via the List-Unsubscribe header
    ListUnsubscribe,
    /// Unsubscribed via a link in the message
    LinkUnsubscribe,
}

impl EventType {
    /// All known event types, in wire order.
    pub const ALL: [EventType; 14] = [
        EventType::Injection,
        EventType::Delivery,
        EventType::Bounce,
        EventType::Delay,
        EventType::PolicyRejection,
        EventType::OutOfBand,
        EventType::Open,
        EventType::InitialOpen,
        EventType::Click,
        EventType::GenerationFailure,
        EventType::GenerationRejection,
        EventType::SpamComplaint,
        EventType::ListUnsubscribe,
        EventType::LinkUnsubscribe,
    ];

    /// The wire value (snake_case).
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Injection => "injection",
            EventType::Delivery => "delivery",
            EventType::Bounce => "bounce",
            EventType::Delay => "delay",
            EventType::PolicyRejection => "policy_rejection",
            EventType::OutOfBand => "out_of_band",
            EventType::Open => "open",
            EventType::InitialOpen => "initial_open",
            EventType::Click => "click",
            EventType::GenerationFailure => "generation_failure",
            EventType::GenerationRejection => "generation_rejection",
            EventType::SpamComplaint => "spam_complaint",
            EventType::ListUnsubscribe => "list_unsubscribe",
            EventType::LinkUnsubscribe => "link_unsubscribe",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Injection => "Injection",
            EventType::Delivery => "Delivery",
            EventType::Bounce => "Bounce",
            EventType::Delay => "Delay",
            EventType::PolicyRejection => "Policy Rejection",
            EventType::OutOfBand => "Out of Band",
            EventType::Open => "Open",
            EventType::InitialOpen => "Initial Open",
            EventType::Click => "Click",
            EventType::GenerationFailure => "Generation Failure",
            EventType::GenerationRejection => "Generation Rejection",
            EventType::SpamComplaint => "Spam Complaint",
            EventType::ListUnsubscribe => "List Unsubscribe",
            EventType::LinkUnsubscribe => "Link Unsubscribe",
        }
    }

    /// Whether the event reports successful handling.
    pub fn is_success(&self) -> bool {
        matches!(self, EventType::Injection | EventType::Delivery)
    }

    /// Whether the event reports a delivery failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            EventType::Bounce
                | EventType::PolicyRejection
                | EventType::GenerationFailure
                | EventType::GenerationRejection
        )
    }

    /// Whether the event reports recipient engagement.
    pub fn is_engagement(&self) -> bool {
        matches!(
            self,
            EventType::Open | EventType::InitialOpen | EventType::Click
        )
    }

    /// Whether the event reports an unsubscribe.
    pub fn is_unsubscribe(&self) -> bool {
        matches!(
            self,
            EventType::ListUnsubscribe | EventType::LinkUnsubscribe
        )
    }
}

/// Domain approval status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    /// Awaiting approval
    Pending,
    /// Approved for sending
    Approved,
    /// Blocked from sending
    Blocked,
}

impl DomainStatus {
    /// Whether this status permits sending.
    pub fn can_send(&self) -> bool {
        matches!(self, DomainStatus::Approved)
    }
}

/// DNS record verification status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DnsStatus {
    /// Record resolves and matches
    Valid,
    /// Record has not been checked yet
    Unverified,
    /// Record resolves but does not match
    Invalid,
    /// No check has been attempted
    #[default]
    Pending,
}

impl DnsStatus {
    /// Whether the record is properly configured.
    pub fn is_configured(&self) -> bool {
        matches!(self, DnsStatus::Valid)
    }
}

/// Outcome of the most recent webhook delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookStatus {
    /// Last delivery succeeded
    Success,
    /// Last delivery failed
    Failure,
}

impl WebhookStatus {
    /// Whether the last delivery succeeded.
    pub fn is_successful(&self) -> bool {
        matches!(self, WebhookStatus::Success)
    }
}

/// Authentication scheme a webhook endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookAuthType {
    /// No authentication
    None,
    /// HTTP basic authentication
    Basic,
    /// OAuth 2.0 bearer token
    #[serde(rename = "oauth2")]
    OAuth2,
}

impl WebhookAuthType {
    /// Whether any authentication is configured.
    pub fn has_auth(&self) -> bool {
        !matches!(self, WebhookAuthType::None)
    }
}

/// Machine-readable error codes carried in API error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request contains invalid data
    ValidationError,
    /// The specified domain is invalid
    InvalidDomain,
    /// The specified domain was not found
    DomainNotFound,
    /// The domain has not been verified
    DomainNotVerified,
    /// The domain already exists
    DomainAlreadyExists,
    /// The specified webhook was not found
    WebhookNotFound,
    /// The API key is invalid
    InvalidApiKey,
    /// Per-second request throttle hit
    RateLimitExceeded,
    /// Monthly sending quota exhausted
    QuotaExceeded,
    /// Daily sending quota exhausted
    DailyQuotaExceeded,
    /// Internal server error
    InternalError,
    /// One or more recipients are invalid
    InvalidRecipient,
    /// Message exceeds the maximum size
    MessageTooLarge,
    /// An attachment exceeds the size limit
    AttachmentTooLarge,
}

impl ErrorCode {
    /// Whether this is a quota error (monthly or daily).
    pub fn is_quota_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::QuotaExceeded | ErrorCode::DailyQuotaExceeded
        )
    }

    /// Whether this is the per-second throttle.
    pub fn is_rate_limit_error(&self) -> bool {
        matches!(self, ErrorCode::RateLimitExceeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&EventType::PolicyRejection).unwrap(),
            "\"policy_rejection\""
        );
        let parsed: EventType = serde_json::from_str("\"initial_open\"").unwrap();
        assert_eq!(parsed, EventType::InitialOpen);
        assert_eq!(parsed.as_str(), "initial_open");
    }

    #[test]
    fn event_type_classification() {
        assert!(EventType::Delivery.is_success());
        assert!(EventType::Bounce.is_failure());
        assert!(EventType::Click.is_engagement());
        assert!(EventType::LinkUnsubscribe.is_unsubscribe());
        assert!(!EventType::Delay.is_failure());
    }

    #[test]
    fn webhook_auth_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&WebhookAuthType::OAuth2).unwrap(),
            "\"oauth2\""
        );
        assert!(WebhookAuthType::Basic.has_auth());
        assert!(!WebhookAuthType::None.has_auth());
    }

    #[test]
    fn dns_status_defaults_to_pending() {
        assert_eq!(DnsStatus::default(), DnsStatus::Pending);
        assert!(DnsStatus::Valid.is_configured());
        assert!(!DnsStatus::Unverified.is_configured());
    }

    #[test]
    fn error_code_quota_detection() {
        let code: ErrorCode = serde_json::from_str("\"daily_quota_exceeded\"").unwrap();
        assert!(code.is_quota_error());
        assert!(!code.is_rate_limit_error());
        assert!(ErrorCode::RateLimitExceeded.is_rate_limit_error());
    }
}
