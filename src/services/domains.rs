//! Sending domain management and DNS verification.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collections::DomainCollection;
use crate::errors::LettrResult;
use crate::transport::Transporter;
use crate::types::{DnsStatus, DomainStatus};
use crate::value_objects::{DomainName, Timestamp};

const DOMAINS_ENDPOINT: &str = "domains";

/// A sending domain as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Domain {
    pub domain: DomainName,
    pub status: DomainStatus,
    pub can_send: bool,
    #[serde(default)]
    pub dkim_status: DnsStatus,
    #[serde(default)]
    pub return_path_status: DnsStatus,
    pub created_at: Timestamp,
    #[serde(default)]
    pub verified_at: Option<Timestamp>,
}

impl Domain {
    /// Approved with both DNS records valid.
    pub fn is_verified(&self) -> bool {
        self.status == DomainStatus::Approved
            && self.dkim_status == DnsStatus::Valid
            && self.return_path_status == DnsStatus::Valid
    }

    /// At least one DNS record still needs attention.
    pub fn needs_dns_configuration(&self) -> bool {
        self.dkim_status != DnsStatus::Valid || self.return_path_status != DnsStatus::Valid
    }
}

/// DKIM record details for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DomainDkim {
    pub selector: String,
    // some API versions use "public" for the key material
    #[serde(alias = "public", default)]
    pub public_key: String,
    pub headers: String,
    #[serde(default)]
    pub signing_domain: Option<String>,
}

impl DomainDkim {
    /// The DNS record name to publish, e.g. `sel._domainkey.example.com`.
    pub fn record_name(&self, domain: &DomainName) -> String {
        format!("{}._domainkey.{}", self.selector, domain.as_str())
    }

    /// The TXT record value to publish.
    pub fn record_value(&self) -> String {
        format!("v=DKIM1; k=rsa; h={}; p={}", self.headers, self.public_key)
    }
}

/// DNS records to publish for a freshly created domain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DomainDns {
    pub return_path_host: String,
    pub return_path_value: String,
    #[serde(default)]
    pub dkim: Option<DomainDkim>,
}

/// Request payload for registering a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateDomainData {
    pub domain: DomainName,
}

impl CreateDomainData {
    pub fn new(domain: DomainName) -> Self {
        Self { domain }
    }
}

impl From<DomainName> for CreateDomainData {
    fn from(domain: DomainName) -> Self {
        Self::new(domain)
    }
}

/// Response from registering a domain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateDomainResponse {
    pub domain: DomainName,
    pub status: DomainStatus,
    pub created_at: Timestamp,
    pub dns: DomainDns,
    pub dkim_status: DnsStatus,
    pub return_path_status: DnsStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct DomainDetailDns {
    #[serde(default)]
    dkim: Option<DomainDkim>,
}

/// Full details for a single domain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DomainDetail {
    pub domain: DomainName,
    pub status: DomainStatus,
    pub can_send: bool,
    pub cname_status: DnsStatus,
    pub dkim_status: DnsStatus,
    pub dmarc_status: DnsStatus,
    pub created_at: Timestamp,
    #[serde(default)]
    pub verified_at: Option<Timestamp>,
    #[serde(default)]
    pub tracking_domain: Option<String>,
    #[serde(default)]
    dns: Option<DomainDetailDns>,
}

impl DomainDetail {
    /// Approved with DKIM and CNAME records valid.
    pub fn is_verified(&self) -> bool {
        self.status == DomainStatus::Approved
            && self.dkim_status == DnsStatus::Valid
            && self.cname_status == DnsStatus::Valid
    }

    /// The DKIM record details, when the API included them.
    pub fn dkim(&self) -> Option<&DomainDkim> {
        self.dns.as_ref().and_then(|dns| dns.dkim.as_ref())
    }
}

/// Records found (and errors hit) while verifying a domain's DNS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VerificationDns {
    #[serde(default)]
    pub dkim_record: Option<String>,
    #[serde(default)]
    pub cname_record: Option<String>,
    #[serde(default)]
    pub dmarc_record: Option<String>,
    #[serde(default)]
    pub spf_record: Option<String>,
    #[serde(default)]
    pub dkim_error: Option<String>,
    #[serde(default)]
    pub cname_error: Option<String>,
    #[serde(default)]
    pub dmarc_error: Option<String>,
    #[serde(default)]
    pub spf_error: Option<String>,
}

/// DMARC policy evaluation for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DmarcVerification {
    pub is_valid: bool,
    pub status: DnsStatus,
    #[serde(default)]
    pub found_at_domain: Option<String>,
    #[serde(default)]
    pub record: Option<String>,
    #[serde(default)]
    pub policy: Option<String>,
    #[serde(default)]
    pub subdomain_policy: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    pub covered_by_parent_policy: bool,
}

/// SPF record evaluation for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpfVerification {
    pub is_valid: bool,
    pub status: DnsStatus,
    #[serde(default)]
    pub record: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    pub includes_sparkpost: bool,
}

/// Result of a DNS verification run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DomainVerification {
    pub domain: DomainName,
    pub dkim_status: DnsStatus,
    pub cname_status: DnsStatus,
    pub dmarc_status: DnsStatus,
    pub spf_status: DnsStatus,
    #[serde(default)]
    pub ownership_verified: Option<bool>,
    pub is_primary_domain: bool,
    pub dkim_warning_level: u8,
    pub cname_warning_level: u8,
    pub dmarc_warning_level: u8,
    pub spf_warning_level: u8,
    #[serde(default)]
    pub dns: Option<VerificationDns>,
    #[serde(default)]
    pub dmarc: Option<DmarcVerification>,
    #[serde(default)]
    pub spf: Option<SpfVerification>,
}

impl DomainVerification {
    /// All four record types resolve to a configured state.
    pub fn is_fully_verified(&self) -> bool {
        self.dkim_status.is_configured()
            && self.cname_status.is_configured()
            && self.dmarc_status.is_configured()
            && self.spf_status.is_configured()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    /// Record-type to error-message pairs, in record order.
    pub fn errors(&self) -> Vec<(&'static str, &str)> {
        let Some(dns) = &self.dns else {
            return Vec::new();
        };

        let mut errors = Vec::new();
        if let Some(error) = &dns.dkim_error {
            errors.push(("dkim", error.as_str()));
        }
        if let Some(error) = &dns.cname_error {
            errors.push(("cname", error.as_str()));
        }
        if let Some(error) = &dns.dmarc_error {
            errors.push(("dmarc", error.as_str()));
        }
        if let Some(error) = &dns.spf_error {
            errors.push(("spf", error.as_str()));
        }
        errors
    }
}

#[derive(Debug, Deserialize)]
struct ListDomainsWire {
    domains: DomainCollection,
}

/// Service for managing sending domains.
pub struct DomainService {
    transporter: Arc<dyn Transporter>,
}

impl DomainService {
    pub(crate) fn new(transporter: Arc<dyn Transporter>) -> Self {
        Self { transporter }
    }

    /// Lists all domains on the team.
    pub async fn list(&self) -> LettrResult<DomainCollection> {
        let value = self.transporter.get(DOMAINS_ENDPOINT).await?;
        let wire: ListDomainsWire = serde_json::from_value(value)?;

        Ok(wire.domains)
    }

    /// Registers a new sending domain.
    pub async fn create(
        &self,
        domain: impl Into<CreateDomainData>,
    ) -> LettrResult<CreateDomainResponse> {
        let data = domain.into();
        let value = self
            .transporter
            .post(DOMAINS_ENDPOINT, serde_json::to_value(&data)?)
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Fetches full details for a domain.
    pub async fn get(&self, domain: &DomainName) -> LettrResult<DomainDetail> {
        let path = format!("{DOMAINS_ENDPOINT}/{}", domain.as_str());
        let value = self.transporter.get(&path).await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Removes a domain.
    pub async fn delete(&self, domain: &DomainName) -> LettrResult<()> {
        let path = format!("{DOMAINS_ENDPOINT}/{}", domain.as_str());
        self.transporter.delete(&path).await
    }

    /// Runs a DNS verification for the domain.
    pub async fn verify(&self, domain: &DomainName) -> LettrResult<DomainVerification> {
        let path = format!("{DOMAINS_ENDPOINT}/{}/verify", domain.as_str());
        let value = self.transporter.post(&path, serde_json::json!({})).await?;

        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn domain_deserializes_with_missing_dns_statuses() {
        let domain: Domain = serde_json::from_value(json!({
            "domain": "mail.example.com",
            "status": "approved",
            "can_send": true,
            "created_at": "2026-01-15T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(domain.dkim_status, DnsStatus::Pending);
        assert!(!domain.is_verified());
        assert!(domain.needs_dns_configuration());
    }

    #[test]
    fn verified_domain_requires_approved_and_valid_records() {
        let domain: Domain = serde_json::from_value(json!({
            "domain": "mail.example.com",
            "status": "approved",
            "can_send": true,
            "dkim_status": "valid",
            "return_path_status": "valid",
            "created_at": "2026-01-15T10:00:00Z",
            "verified_at": "2026-01-16T08:30:00Z"
        }))
        .unwrap();

        assert!(domain.is_verified());
        assert!(!domain.needs_dns_configuration());
    }

    #[test]
    fn dkim_record_name_and_value() {
        let dkim = DomainDkim {
            selector: "sel1".into(),
            public_key: "MIGf".into(),
            headers: "from:to:subject".into(),
            signing_domain: None,
        };
        let domain = DomainName::new("example.com").unwrap();

        assert_eq!(dkim.record_name(&domain), "sel1._domainkey.example.com");
        assert_eq!(dkim.record_value(), "v=DKIM1; k=rsa; h=from:to:subject; p=MIGf");
    }

    #[test]
    fn dkim_accepts_public_alias() {
        let dkim: DomainDkim = serde_json::from_value(json!({
            "selector": "sel1",
            "public": "MIGf",
            "headers": "from:to"
        }))
        .unwrap();

        assert_eq!(dkim.public_key, "MIGf");
    }

    #[test]
    fn verification_errors_collects_per_record_messages() {
        let verification: DomainVerification = serde_json::from_value(json!({
            "domain": "example.com",
            "dkim_status": "invalid",
            "cname_status": "valid",
            "dmarc_status": "valid",
            "spf_status": "valid",
            "ownership_verified": true,
            "is_primary_domain": true,
            "dkim_warning_level": 2,
            "cname_warning_level": 0,
            "dmarc_warning_level": 0,
            "spf_warning_level": 0,
            "dns": {"dkim_error": "record not found"}
        }))
        .unwrap();

        assert!(!verification.is_fully_verified());
        assert!(verification.has_errors());
        assert_eq!(verification.errors(), vec![("dkim", "record not found")]);
    }

    #[test]
    fn detail_exposes_nested_dkim() {
        let detail: DomainDetail = serde_json::from_value(json!({
            "domain": "example.com",
            "status": "approved",
            "can_send": true,
            "cname_status": "valid",
            "dkim_status": "valid",
            "dmarc_status": "unverified",
            "created_at": "2026-01-15T10:00:00Z",
            "dns": {"dkim": {"selector": "sel1", "public_key": "MIGf", "headers": "from"}}
        }))
        .unwrap();

        assert!(detail.is_verified());
        assert_eq!(detail.dkim().unwrap().selector, "sel1");
    }
}
