//! Email sending and event queries.
//!
//! The outbound payload is assembled by [`SendEmailData::to_payload`],
//! which omits every optional key that was never set; the API rejects
//! explicit nulls. [`SendEmailResponse`] also captures the sending quota
//! advertised in the response headers, when present.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builders::EmailBuilder;
use crate::collections::{AttachmentCollection, EmailAddressCollection, EmailEventCollection};
use crate::errors::{LettrError, LettrResult};
use crate::transport::Transporter;
use crate::types::{EventType, Pagination, SendingQuota};
use crate::value_objects::{
    Base64Data, CampaignId, Cursor, EmailAddress, IpAddress, MessageId, MimeType, RequestId,
    Subject, Tag, Timestamp,
};

const EMAILS_ENDPOINT: &str = "emails";

/// A file attached to an outgoing email.
///
/// The payload carries the content as standard base64 under the `data`
/// key and the MIME type under `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    name: String,
    #[serde(rename = "type")]
    mime_type: MimeType,
    data: Base64Data,
}

impl Attachment {
    /// Builds an attachment from already-encoded base64 content.
    pub fn from_base64(name: impl Into<String>, mime_type: MimeType, data: Base64Data) -> Self {
        Self {
            name: name.into(),
            mime_type,
            data,
        }
    }

    /// Builds an attachment from raw bytes, encoding them as base64.
    pub fn from_bytes(name: impl Into<String>, mime_type: MimeType, bytes: impl AsRef<[u8]>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            data: Base64Data::from_bytes(bytes),
        }
    }

    /// Reads a file from disk and attaches it.
    ///
    /// The attachment name defaults to the file name and the MIME type to
    /// `application/octet-stream` when not given.
    pub fn from_file(
        path: impl AsRef<Path>,
        name: Option<&str>,
        mime_type: Option<MimeType>,
    ) -> LettrResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read(path)
            .map_err(|e| LettrError::invalid_value(format!("failed to read {}: {e}", path.display())))?;

        let name = match name {
            Some(name) => name.to_string(),
            None => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    LettrError::invalid_value(format!("no file name in path {}", path.display()))
                })?,
        };

        let mime_type = match mime_type {
            Some(mime_type) => mime_type,
            None => MimeType::new(MimeType::APPLICATION_OCTET_STREAM)?,
        };

        Ok(Self::from_bytes(name, mime_type, contents))
    }

    /// The attachment file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attachment MIME type.
    pub fn mime_type(&self) -> &MimeType {
        &self.mime_type
    }

    /// The base64-encoded content.
    pub fn data(&self) -> &Base64Data {
        &self.data
    }
}

fn default_true() -> bool {
    true
}

/// Delivery options for an outgoing email.
///
/// All five flags are always serialized; the server applies no implicit
/// defaults once an `options` block is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailOptions {
    /// Rewrite links for click tracking
    #[serde(default = "default_true")]
    pub click_tracking: bool,
    /// Embed an open-tracking pixel
    #[serde(default = "default_true")]
    pub open_tracking: bool,
    /// Exclude the message from unsubscribe handling
    #[serde(default)]
    pub transactional: bool,
    /// Inline CSS into the HTML body
    #[serde(default = "default_true")]
    pub inline_css: bool,
    /// Apply substitution data to the content
    #[serde(default = "default_true")]
    pub perform_substitutions: bool,
}

impl Default for EmailOptions {
    fn default() -> Self {
        Self {
            click_tracking: true,
            open_tracking: true,
            transactional: false,
            inline_css: true,
            perform_substitutions: true,
        }
    }
}

impl EmailOptions {
    /// Default options with the transactional flag set.
    pub fn transactional() -> Self {
        Self {
            transactional: true,
            ..Self::default()
        }
    }

    pub fn with_click_tracking(self, enabled: bool) -> Self {
        Self {
            click_tracking: enabled,
            ..self
        }
    }

    pub fn with_open_tracking(self, enabled: bool) -> Self {
        Self {
            open_tracking: enabled,
            ..self
        }
    }

    pub fn as_transactional(self, transactional: bool) -> Self {
        Self {
            transactional,
            ..self
        }
    }
}

/// String key-value pairs attached to an email for later correlation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }

    /// Returns a new instance with the pair set.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut map = self.0.clone();
        map.insert(key.into(), value.into());
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Template variables substituted into content at send time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionData(BTreeMap<String, Value>);

impl SubstitutionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }

    /// Returns a new instance with the variable set.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = self.0.clone();
        map.insert(key.into(), value.into());
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns a new instance with `other`'s variables layered on top.
    pub fn merge(&self, other: &Self) -> Self {
        let mut map = self.0.clone();
        map.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// A fully validated outgoing email, ready to serialize.
///
/// Usually produced by [`EmailBuilder`]; constructing it directly is fine
/// when all parts are already validated value objects.
#[derive(Debug, Clone, PartialEq)]
pub struct SendEmailData {
    pub from: EmailAddress,
    pub to: EmailAddressCollection,
    pub subject: Subject,
    pub text: Option<String>,
    pub html: Option<String>,
    pub cc: Option<EmailAddressCollection>,
    pub bcc: Option<EmailAddressCollection>,
    pub reply_to: Option<EmailAddress>,
    pub attachments: Option<AttachmentCollection>,
    pub options: Option<EmailOptions>,
    pub metadata: Option<Metadata>,
    pub substitution_data: Option<SubstitutionData>,
    pub tag: Option<Tag>,
    pub project_id: Option<u64>,
    pub template_slug: Option<String>,
    pub template_version: Option<u32>,
}

impl SendEmailData {
    /// Serializes the email into the outbound JSON payload.
    ///
    /// Unset optional fields and empty collections are omitted entirely.
    pub fn to_payload(&self) -> Value {
        let mut payload = serde_json::Map::new();

        payload.insert("from".into(), self.from.address().into());
        payload.insert("to".into(), self.to.to_strings().into());
        payload.insert("subject".into(), self.subject.as_str().into());

        if let Some(name) = self.from.name() {
            payload.insert("from_name".into(), name.into());
        }
        if let Some(text) = &self.text {
            payload.insert("text".into(), text.as_str().into());
        }
        if let Some(html) = &self.html {
            payload.insert("html".into(), html.as_str().into());
        }
        if let Some(cc) = self.cc.as_ref().filter(|c| !c.is_empty()) {
            payload.insert("cc".into(), cc.to_strings().into());
        }
        if let Some(bcc) = self.bcc.as_ref().filter(|c| !c.is_empty()) {
            payload.insert("bcc".into(), bcc.to_strings().into());
        }
        if let Some(reply_to) = &self.reply_to {
            payload.insert("reply_to".into(), reply_to.address().into());
        }
        if let Some(attachments) = self.attachments.as_ref().filter(|a| !a.is_empty()) {
            // AttachmentCollection serializes to a plain array
            if let Ok(value) = serde_json::to_value(attachments) {
                payload.insert("attachments".into(), value);
            }
        }
        if let Some(options) = &self.options {
            if let Ok(value) = serde_json::to_value(options) {
                payload.insert("options".into(), value);
            }
        }
        if let Some(metadata) = self.metadata.as_ref().filter(|m| !m.is_empty()) {
            if let Ok(value) = serde_json::to_value(metadata) {
                payload.insert("metadata".into(), value);
            }
        }
        if let Some(data) = self.substitution_data.as_ref().filter(|d| !d.is_empty()) {
            if let Ok(value) = serde_json::to_value(data) {
                payload.insert("substitution_data".into(), value);
            }
        }
        if let Some(tag) = &self.tag {
            payload.insert("tag".into(), tag.as_str().into());
        }
        if let Some(project_id) = self.project_id {
            payload.insert("project_id".into(), project_id.into());
        }
        if let Some(slug) = &self.template_slug {
            payload.insert("template_slug".into(), slug.as_str().into());
        }
        if let Some(version) = self.template_version {
            payload.insert("template_version".into(), version.into());
        }

        Value::Object(payload)
    }
}

/// Anything `EmailService::send` accepts: a finished [`SendEmailData`] or
/// an [`EmailBuilder`] that still has to pass validation.
pub trait IntoSendEmailData {
    fn into_send_email_data(self) -> LettrResult<SendEmailData>;
}

impl IntoSendEmailData for SendEmailData {
    fn into_send_email_data(self) -> LettrResult<SendEmailData> {
        Ok(self)
    }
}

/// Acknowledgement of an accepted send request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendEmailResponse {
    /// Identifier for querying the delivery events of this send
    pub request_id: RequestId,
    /// Number of recipients accepted for delivery
    pub accepted: u32,
    /// Number of recipients rejected outright
    pub rejected: u32,
    /// Sending quota advertised in the response headers, if any
    #[serde(skip)]
    pub quota: Option<SendingQuota>,
}

impl SendEmailResponse {
    /// Parses the response body and picks the quota out of the headers.
    pub fn from_value(value: Value, headers: &http::HeaderMap) -> LettrResult<Self> {
        let mut response: Self = serde_json::from_value(value)?;
        response.quota = SendingQuota::from_headers(headers);
        Ok(response)
    }

    pub fn all_accepted(&self) -> bool {
        self.rejected == 0
    }

    pub fn has_rejections(&self) -> bool {
        self.rejected > 0
    }

    /// Total recipients in the request.
    pub fn total(&self) -> u32 {
        self.accepted + self.rejected
    }
}

/// One event in an email's delivery timeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmailEvent {
    pub request_id: RequestId,
    pub message_id: MessageId,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub timestamp: Timestamp,
    pub recipient: EmailAddress,
    pub from: EmailAddress,
    pub subject: String,
    #[serde(default)]
    pub campaign_id: Option<CampaignId>,
    #[serde(default)]
    pub ip_address: Option<IpAddress>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub click_url: Option<String>,
    #[serde(default)]
    pub bounce_class: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

impl EmailEvent {
    pub fn is_success(&self) -> bool {
        self.event_type.is_success()
    }

    pub fn is_failure(&self) -> bool {
        self.event_type.is_failure()
    }

    pub fn is_engagement(&self) -> bool {
        self.event_type.is_engagement()
    }
}

/// Query filters for the email event listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEmailsFilter {
    pub per_page: Option<u32>,
    pub cursor: Option<Cursor>,
    pub recipient: Option<EmailAddress>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

impl ListEmailsFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn per_page(self, per_page: u32) -> Self {
        Self {
            per_page: Some(per_page),
            ..self
        }
    }

    pub fn cursor(self, cursor: Cursor) -> Self {
        Self {
            cursor: Some(cursor),
            ..self
        }
    }

    pub fn recipient(self, recipient: EmailAddress) -> Self {
        Self {
            recipient: Some(recipient),
            ..self
        }
    }

    pub fn from_date(self, from: Timestamp) -> Self {
        Self {
            from: Some(from),
            ..self
        }
    }

    pub fn to_date(self, to: Timestamp) -> Self {
        Self {
            to: Some(to),
            ..self
        }
    }

    pub fn has_filters(&self) -> bool {
        self.per_page.is_some()
            || self.cursor.is_some()
            || self.recipient.is_some()
            || self.from.is_some()
            || self.to.is_some()
    }

    /// Query parameters in a stable order, set fields only.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();

        if let Some(per_page) = self.per_page {
            query.push(("per_page".into(), per_page.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            query.push(("cursor".into(), cursor.as_str().into()));
        }
        if let Some(recipient) = &self.recipient {
            query.push(("recipient".into(), recipient.address().into()));
        }
        if let Some(from) = &self.from {
            query.push(("from".into(), from.to_rfc3339()));
        }
        if let Some(to) = &self.to {
            query.push(("to".into(), to.to_rfc3339()));
        }

        query
    }
}

/// A page of email events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListEmailsResponse {
    pub events: EmailEventCollection,
    pub total_count: u64,
    pub pagination: Pagination,
}

impl ListEmailsResponse {
    pub fn has_more(&self) -> bool {
        self.pagination.has_next_page()
    }
}

/// All events recorded for a single send request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetEmailResponse {
    pub events: EmailEventCollection,
    pub total_count: u64,
}

/// Service for sending email and querying delivery events.
pub struct EmailService {
    transporter: Arc<dyn Transporter>,
}

impl EmailService {
    pub(crate) fn new(transporter: Arc<dyn Transporter>) -> Self {
        Self { transporter }
    }

    /// Starts a fluent builder for a new email.
    pub fn create(&self) -> EmailBuilder {
        EmailBuilder::new()
    }

    /// Sends an email.
    ///
    /// Accepts a finished [`SendEmailData`] or an [`EmailBuilder`], which
    /// is built (and validated) first.
    pub async fn send(&self, email: impl IntoSendEmailData) -> LettrResult<SendEmailResponse> {
        let data = email.into_send_email_data()?;
        let value = self.transporter.post(EMAILS_ENDPOINT, data.to_payload()).await?;

        SendEmailResponse::from_value(value, &self.transporter.last_response_headers())
    }

    /// Sends a simple HTML email.
    pub async fn send_html(
        &self,
        from: &str,
        to: &[&str],
        subject: &str,
        html: &str,
        substitution_data: Option<SubstitutionData>,
    ) -> LettrResult<SendEmailResponse> {
        let mut builder = self
            .create()
            .from(from)?
            .to(to.iter().copied())?
            .subject(subject)?
            .html(html);

        if let Some(data) = substitution_data {
            builder = builder.substitution_data(data);
        }

        self.send(builder).await
    }

    /// Sends a simple plain-text email.
    pub async fn send_text(
        &self,
        from: &str,
        to: &[&str],
        subject: &str,
        text: &str,
        substitution_data: Option<SubstitutionData>,
    ) -> LettrResult<SendEmailResponse> {
        let mut builder = self
            .create()
            .from(from)?
            .to(to.iter().copied())?
            .subject(subject)?
            .text(text);

        if let Some(data) = substitution_data {
            builder = builder.substitution_data(data);
        }

        self.send(builder).await
    }

    /// Sends an email rendered from a stored template.
    pub async fn send_template(
        &self,
        from: &str,
        to: &[&str],
        subject: &str,
        template_slug: &str,
        template_version: Option<u32>,
        project_id: Option<u64>,
        substitution_data: Option<SubstitutionData>,
    ) -> LettrResult<SendEmailResponse> {
        let mut builder = self
            .create()
            .from(from)?
            .to(to.iter().copied())?
            .subject(subject)?
            .use_template(template_slug, template_version, project_id);

        if let Some(data) = substitution_data {
            builder = builder.substitution_data(data);
        }

        self.send(builder).await
    }

    /// Lists email events, optionally filtered.
    pub async fn list(&self, filter: Option<&ListEmailsFilter>) -> LettrResult<ListEmailsResponse> {
        let query = filter.map(ListEmailsFilter::to_query).unwrap_or_default();
        let value = self.transporter.get_with_query(EMAILS_ENDPOINT, &query).await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Fetches all events recorded for a send request.
    pub async fn get(&self, request_id: &RequestId) -> LettrResult<GetEmailResponse> {
        let path = format!("{EMAILS_ENDPOINT}/{}", request_id.as_str());
        let value = self.transporter.get(&path).await?;

        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_data() -> SendEmailData {
        SendEmailData {
            from: EmailAddress::new("sender@example.com").unwrap(),
            to: EmailAddressCollection::for_recipients(["a@example.com"]).unwrap(),
            subject: Subject::new("Hello").unwrap(),
            text: None,
            html: None,
            cc: None,
            bcc: None,
            reply_to: None,
            attachments: None,
            options: None,
            metadata: None,
            substitution_data: None,
            tag: None,
            project_id: None,
            template_slug: None,
            template_version: None,
        }
    }

    #[test]
    fn payload_contains_only_set_fields() {
        let mut data = base_data();
        data.text = Some("body".into());

        let payload = data.to_payload();
        let object = payload.as_object().unwrap();

        assert_eq!(object["from"], json!("sender@example.com"));
        assert_eq!(object["to"], json!(["a@example.com"]));
        assert_eq!(object["subject"], json!("Hello"));
        assert_eq!(object["text"], json!("body"));
        assert!(!object.contains_key("html"));
        assert!(!object.contains_key("from_name"));
        assert!(!object.contains_key("cc"));
        assert!(!object.contains_key("options"));
        assert!(!object.contains_key("tag"));
    }

    #[test]
    fn payload_includes_from_name_and_options() {
        let mut data = base_data();
        data.from = EmailAddress::with_name("sender@example.com", "Sender").unwrap();
        data.html = Some("<p>hi</p>".into());
        data.options = Some(EmailOptions::transactional());

        let payload = data.to_payload();
        let object = payload.as_object().unwrap();

        assert_eq!(object["from_name"], json!("Sender"));
        assert_eq!(
            object["options"],
            json!({
                "click_tracking": true,
                "open_tracking": true,
                "transactional": true,
                "inline_css": true,
                "perform_substitutions": true,
            })
        );
    }

    #[test]
    fn payload_omits_empty_metadata() {
        let mut data = base_data();
        data.text = Some("body".into());
        data.metadata = Some(Metadata::new());

        let payload = data.to_payload();
        assert!(!payload.as_object().unwrap().contains_key("metadata"));
    }

    #[test]
    fn options_default_flags() {
        let options = EmailOptions::default();
        assert!(options.click_tracking);
        assert!(options.open_tracking);
        assert!(!options.transactional);
        assert!(options.inline_css);
        assert!(options.perform_substitutions);

        assert!(EmailOptions::transactional().transactional);
    }

    #[test]
    fn metadata_set_returns_new_instance() {
        let empty = Metadata::new();
        let with_key = empty.set("order", "1234");

        assert!(empty.is_empty());
        assert_eq!(with_key.get("order"), Some("1234"));
    }

    #[test]
    fn substitution_merge_prefers_other() {
        let base = SubstitutionData::new().set("name", "Ada").set("plan", "free");
        let layered = base.merge(&SubstitutionData::new().set("plan", "pro"));

        assert_eq!(layered.get("name"), Some(&json!("Ada")));
        assert_eq!(layered.get("plan"), Some(&json!("pro")));
    }

    #[test]
    fn send_response_reads_quota_from_headers() {
        let mut headers = http::HeaderMap::new();
        headers.insert("X-Monthly-Limit", "1000".parse().unwrap());
        headers.insert("X-Monthly-Remaining", "990".parse().unwrap());
        headers.insert("X-Monthly-Reset", "1700000000".parse().unwrap());

        let response = SendEmailResponse::from_value(
            json!({"request_id": "req_1", "accepted": 2, "rejected": 1}),
            &headers,
        )
        .unwrap();

        assert_eq!(response.request_id.as_str(), "req_1");
        assert_eq!(response.total(), 3);
        assert!(response.has_rejections());
        assert!(!response.all_accepted());
        assert_eq!(response.quota.unwrap().monthly_remaining, 990);
    }

    #[test]
    fn email_event_deserializes_wire_shape() {
        let event: EmailEvent = serde_json::from_value(json!({
            "request_id": "req_1",
            "message_id": "msg_1",
            "type": "bounce",
            "timestamp": "2026-01-15T10:00:00Z",
            "recipient": "to@example.com",
            "from": "from@example.com",
            "subject": "Hi",
            "bounce_class": "21",
            "reason": "mailbox full"
        }))
        .unwrap();

        assert_eq!(event.event_type, EventType::Bounce);
        assert!(event.is_failure());
        assert_eq!(event.bounce_class.as_deref(), Some("21"));
        assert_eq!(event.campaign_id, None);
    }

    #[test]
    fn filter_query_keeps_set_fields_in_order() {
        let filter = ListEmailsFilter::new()
            .per_page(25)
            .recipient(EmailAddress::new("to@example.com").unwrap());

        assert!(filter.has_filters());
        assert_eq!(
            filter.to_query(),
            vec![
                ("per_page".to_string(), "25".to_string()),
                ("recipient".to_string(), "to@example.com".to_string()),
            ]
        );
        assert!(!ListEmailsFilter::new().has_filters());
    }

    #[test]
    fn list_response_has_more_follows_cursor() {
        let response: ListEmailsResponse = serde_json::from_value(json!({
            "events": [],
            "total_count": 0,
            "pagination": {"per_page": 25}
        }))
        .unwrap();

        assert!(!response.has_more());
    }
}
