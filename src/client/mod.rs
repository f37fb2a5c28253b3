//! SDK entry point.

use std::sync::Arc;

use http::HeaderMap;

use crate::config::LettrConfig;
use crate::errors::LettrResult;
use crate::services::{
    DomainService, EmailService, HealthService, ProjectService, TemplateService, WebhookService,
};
use crate::transport::{HttpTransporter, Transporter};
use crate::types::{RateLimit, SendingQuota};

/// The Lettr API client.
///
/// Cheap to clone; clones share the underlying transporter and its
/// connection pool.
///
/// ```no_run
/// # async fn example() -> lettr::LettrResult<()> {
/// let client = lettr::Lettr::new("lettr-api-key")?;
///
/// let response = client
///     .emails()
///     .send_html(
///         "sender@example.com",
///         &["to@example.com"],
///         "Welcome",
///         "<p>Hello!</p>",
///         None,
///     )
///     .await?;
///
/// assert!(response.all_accepted());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Lettr {
    transporter: Arc<dyn Transporter>,
}

impl Lettr {
    /// Client with default configuration for the given API key.
    pub fn new(api_key: impl Into<String>) -> LettrResult<Self> {
        Self::with_config(LettrConfig::new(api_key)?)
    }

    /// Client over a custom configuration.
    pub fn with_config(config: LettrConfig) -> LettrResult<Self> {
        Ok(Self::with_transporter(Arc::new(HttpTransporter::new(
            &config,
        )?)))
    }

    /// Client over a custom transporter, e.g. a mock in tests.
    pub fn with_transporter(transporter: Arc<dyn Transporter>) -> Self {
        Self { transporter }
    }

    /// Email sending and event queries.
    pub fn emails(&self) -> EmailService {
        EmailService::new(self.transporter.clone())
    }

    /// Sending domain management.
    pub fn domains(&self) -> DomainService {
        DomainService::new(self.transporter.clone())
    }

    /// Webhook inspection.
    pub fn webhooks(&self) -> WebhookService {
        WebhookService::new(self.transporter.clone())
    }

    /// Template management.
    pub fn templates(&self) -> TemplateService {
        TemplateService::new(self.transporter.clone())
    }

    /// Project listing.
    pub fn projects(&self) -> ProjectService {
        ProjectService::new(self.transporter.clone())
    }

    /// Health and auth checks.
    pub fn health(&self) -> HealthService {
        HealthService::new(self.transporter.clone())
    }

    /// Rate-limit state from the most recent response, if it carried the
    /// rate-limit headers.
    pub fn last_rate_limit(&self) -> Option<RateLimit> {
        RateLimit::from_headers(&self.transporter.last_response_headers())
    }

    /// Sending-quota state from the most recent response, if it carried
    /// the quota headers.
    pub fn last_sending_quota(&self) -> Option<SendingQuota> {
        SendingQuota::from_headers(&self.transporter.last_response_headers())
    }

    /// Raw headers of the most recent response.
    pub fn last_response_headers(&self) -> HeaderMap {
        self.transporter.last_response_headers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct StaticTransporter {
        headers: HeaderMap,
    }

    #[async_trait]
    impl Transporter for StaticTransporter {
        async fn post(&self, _path: &str, _body: Value) -> LettrResult<Value> {
            Ok(json!({}))
        }

        async fn get(&self, _path: &str) -> LettrResult<Value> {
            Ok(json!({}))
        }

        async fn get_with_query(
            &self,
            _path: &str,
            _query: &[(String, String)],
        ) -> LettrResult<Value> {
            Ok(json!({}))
        }

        async fn delete(&self, _path: &str) -> LettrResult<()> {
            Ok(())
        }

        fn last_response_headers(&self) -> HeaderMap {
            self.headers.clone()
        }
    }

    #[test]
    fn last_rate_limit_reads_transporter_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("X-RateLimit-Limit", "100".parse().unwrap());
        headers.insert("X-RateLimit-Remaining", "97".parse().unwrap());
        headers.insert("X-RateLimit-Reset", "1700000000".parse().unwrap());

        let client = Lettr::with_transporter(Arc::new(StaticTransporter { headers }));

        let rate_limit = client.last_rate_limit().unwrap();
        assert_eq!(rate_limit.limit, 100);
        assert_eq!(rate_limit.remaining, 97);
        assert!(client.last_sending_quota().is_none());
    }

    #[test]
    fn empty_headers_give_no_rate_limit() {
        let client = Lettr::with_transporter(Arc::new(StaticTransporter {
            headers: HeaderMap::new(),
        }));

        assert!(client.last_rate_limit().is_none());
        assert!(client.last_response_headers().is_empty());
    }
}
