//! Fluent construction of outgoing emails.
//!
//! Raw-string setters validate eagerly, so an invalid address or subject
//! fails at the call site rather than at `build()`. The cross-field rules
//! (sender, recipients, subject, and content-or-template) are checked by
//! [`EmailBuilder::build`].

use std::path::Path;

use serde_json::Value;

use crate::collections::{AttachmentCollection, EmailAddressCollection};
use crate::errors::{LettrError, LettrResult};
use crate::services::emails::{
    Attachment, EmailOptions, IntoSendEmailData, Metadata, SendEmailData, SubstitutionData,
};
use crate::value_objects::{EmailAddress, MimeType, Subject, Tag};

/// Builder for [`SendEmailData`].
///
/// Setters consume and return the builder; `build` borrows, so one
/// configured builder can produce the same email more than once.
#[derive(Debug, Clone)]
pub struct EmailBuilder {
    from: Option<EmailAddress>,
    to: Option<EmailAddressCollection>,
    subject: Option<Subject>,
    text: Option<String>,
    html: Option<String>,
    cc: Option<EmailAddressCollection>,
    bcc: Option<EmailAddressCollection>,
    reply_to: Option<EmailAddress>,
    attachments: Option<AttachmentCollection>,
    click_tracking: bool,
    open_tracking: bool,
    transactional: bool,
    inline_css: bool,
    perform_substitutions: bool,
    metadata: Option<Metadata>,
    substitution_data: Option<SubstitutionData>,
    tag: Option<Tag>,
    project_id: Option<u64>,
    template_slug: Option<String>,
    template_version: Option<u32>,
}

impl Default for EmailBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailBuilder {
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            subject: None,
            text: None,
            html: None,
            cc: None,
            bcc: None,
            reply_to: None,
            attachments: None,
            click_tracking: true,
            open_tracking: true,
            transactional: false,
            inline_css: true,
            perform_substitutions: true,
            metadata: None,
            substitution_data: None,
            tag: None,
            project_id: None,
            template_slug: None,
            template_version: None,
        }
    }

    /// Sets the sender address.
    pub fn from(self, address: &str) -> LettrResult<Self> {
        Ok(Self {
            from: Some(EmailAddress::new(address)?),
            ..self
        })
    }

    /// Sets the sender address with a display name.
    pub fn from_with_name(self, address: &str, name: &str) -> LettrResult<Self> {
        Ok(Self {
            from: Some(EmailAddress::with_name(address, name)?),
            ..self
        })
    }

    /// Sets an already-validated sender.
    pub fn from_address(self, address: EmailAddress) -> Self {
        Self {
            from: Some(address),
            ..self
        }
    }

    /// Sets the recipients, replacing any set before. At most 50.
    pub fn to<I, S>(self, recipients: I) -> LettrResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            to: Some(EmailAddressCollection::for_recipients(recipients)?),
            ..self
        })
    }

    /// Sets already-validated recipients.
    pub fn to_addresses(self, recipients: EmailAddressCollection) -> Self {
        Self {
            to: Some(recipients),
            ..self
        }
    }

    /// Appends one recipient.
    pub fn add_to(self, address: &str) -> LettrResult<Self> {
        let address = EmailAddress::new(address)?;
        let to = match self.to {
            Some(to) => to.add(address),
            None => EmailAddressCollection::from_vec(vec![address]),
        };

        Ok(Self {
            to: Some(to),
            ..self
        })
    }

    /// Sets the CC recipients.
    pub fn cc<I, S>(self, recipients: I) -> LettrResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            cc: Some(EmailAddressCollection::from_raw(recipients)?),
            ..self
        })
    }

    /// Sets the BCC recipients.
    pub fn bcc<I, S>(self, recipients: I) -> LettrResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            bcc: Some(EmailAddressCollection::from_raw(recipients)?),
            ..self
        })
    }

    /// Sets the reply-to address.
    pub fn reply_to(self, address: &str) -> LettrResult<Self> {
        Ok(Self {
            reply_to: Some(EmailAddress::new(address)?),
            ..self
        })
    }

    /// Sets an already-validated reply-to address.
    pub fn reply_to_address(self, address: EmailAddress) -> Self {
        Self {
            reply_to: Some(address),
            ..self
        }
    }

    /// Sets the subject line.
    pub fn subject(self, subject: &str) -> LettrResult<Self> {
        Ok(Self {
            subject: Some(Subject::new(subject)?),
            ..self
        })
    }

    /// Sets the plain-text body.
    pub fn text(self, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..self
        }
    }

    /// Sets the HTML body.
    pub fn html(self, html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..self
        }
    }

    /// Appends an attachment.
    pub fn attach(self, attachment: Attachment) -> Self {
        let attachments = match self.attachments {
            Some(attachments) => attachments.add(attachment),
            None => AttachmentCollection::from_vec(vec![attachment]),
        };

        Self {
            attachments: Some(attachments),
            ..self
        }
    }

    /// Reads a file from disk and attaches it.
    pub fn attach_file(
        self,
        path: impl AsRef<Path>,
        name: Option<&str>,
        mime_type: Option<MimeType>,
    ) -> LettrResult<Self> {
        let attachment = Attachment::from_file(path, name, mime_type)?;
        Ok(self.attach(attachment))
    }

    /// Attaches raw bytes under the given name and MIME type.
    pub fn attach_bytes(
        self,
        name: impl Into<String>,
        mime_type: MimeType,
        bytes: impl AsRef<[u8]>,
    ) -> Self {
        self.attach(Attachment::from_bytes(name, mime_type, bytes))
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

    pub fn transactional(self, enabled: bool) -> Self {
        Self {
            transactional: enabled,
            ..self
        }
    }

    pub fn with_inline_css(self, enabled: bool) -> Self {
        Self {
            inline_css: enabled,
            ..self
        }
    }

    pub fn with_substitutions(self, enabled: bool) -> Self {
        Self {
            perform_substitutions: enabled,
            ..self
        }
    }

    /// Sets the metadata block, replacing any set before.
    pub fn metadata(self, metadata: Metadata) -> Self {
        Self {
            metadata: Some(metadata),
            ..self
        }
    }

    /// Adds one metadata pair.
    pub fn add_metadata(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let metadata = self.metadata.unwrap_or_default().set(key, value);

        Self {
            metadata: Some(metadata),
            ..self
        }
    }

    /// Sets the substitution data, replacing any set before.
    pub fn substitution_data(self, data: SubstitutionData) -> Self {
        Self {
            substitution_data: Some(data),
            ..self
        }
    }

    /// Adds one substitution variable.
    pub fn add_substitution(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let data = self.substitution_data.unwrap_or_default().set(key, value);

        Self {
            substitution_data: Some(data),
            ..self
        }
    }

    /// Tags the email for reporting.
    pub fn tag(self, tag: &str) -> LettrResult<Self> {
        Ok(Self {
            tag: Some(Tag::new(tag)?),
            ..self
        })
    }

    pub fn project_id(self, project_id: u64) -> Self {
        Self {
            project_id: Some(project_id),
            ..self
        }
    }

    pub fn template_slug(self, slug: impl Into<String>) -> Self {
        Self {
            template_slug: Some(slug.into()),
            ..self
        }
    }

    pub fn template_version(self, version: u32) -> Self {
        Self {
            template_version: Some(version),
            ..self
        }
    }

    /// Renders the email from a stored template.
    pub fn use_template(
        self,
        slug: impl Into<String>,
        version: Option<u32>,
        project_id: Option<u64>,
    ) -> Self {
        Self {
            template_slug: Some(slug.into()),
            template_version: version.or(self.template_version),
            project_id: project_id.or(self.project_id),
            ..self
        }
    }

    /// Validates the cross-field rules and produces the send data.
    ///
    /// Requires a sender, at least one recipient, a subject, and either
    /// body content or a template.
    pub fn build(&self) -> LettrResult<SendEmailData> {
        let from = self
            .from
            .clone()
            .ok_or_else(|| LettrError::invalid_value("from address is required"))?;

        let to = self
            .to
            .clone()
            .filter(|to| !to.is_empty())
            .ok_or_else(|| LettrError::invalid_value("at least one recipient is required"))?;

        let subject = self
            .subject
            .clone()
            .ok_or_else(|| LettrError::invalid_value("subject is required"))?;

        if self.text.is_none() && self.html.is_none() && self.template_slug.is_none() {
            return Err(LettrError::invalid_value(
                "either text, html content, or a template is required",
            ));
        }

        let options = EmailOptions {
            click_tracking: self.click_tracking,
            open_tracking: self.open_tracking,
            transactional: self.transactional,
            inline_css: self.inline_css,
            perform_substitutions: self.perform_substitutions,
        };

        Ok(SendEmailData {
            from,
            to,
            subject,
            text: self.text.clone(),
            html: self.html.clone(),
            cc: self.cc.clone(),
            bcc: self.bcc.clone(),
            reply_to: self.reply_to.clone(),
            attachments: self.attachments.clone(),
            options: Some(options),
            metadata: self.metadata.clone(),
            substitution_data: self.substitution_data.clone(),
            tag: self.tag.clone(),
            project_id: self.project_id,
            template_slug: self.template_slug.clone(),
            template_version: self.template_version,
        })
    }
}

impl IntoSendEmailData for EmailBuilder {
    fn into_send_email_data(self) -> LettrResult<SendEmailData> {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> EmailBuilder {
        EmailBuilder::new()
            .from("sender@example.com")
            .unwrap()
            .to(["to@example.com"])
            .unwrap()
            .subject("Hello")
            .unwrap()
    }

    #[test]
    fn build_requires_from() {
        let err = EmailBuilder::new()
            .to(["to@example.com"])
            .unwrap()
            .subject("Hello")
            .unwrap()
            .text("hi")
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("from address"));
    }

    #[test]
    fn build_requires_recipients() {
        let err = EmailBuilder::new()
            .from("sender@example.com")
            .unwrap()
            .subject("Hello")
            .unwrap()
            .text("hi")
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("recipient"));
    }

    #[test]
    fn build_requires_subject() {
        let err = EmailBuilder::new()
            .from("sender@example.com")
            .unwrap()
            .to(["to@example.com"])
            .unwrap()
            .text("hi")
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("subject"));
    }

    #[test]
    fn build_requires_content_or_template() {
        let err = minimal().build().unwrap_err();
        assert!(err.to_string().contains("text, html content, or a template"));
    }

    #[test]
    fn template_satisfies_content_requirement() {
        let data = minimal().use_template("welcome", Some(2), Some(7)).build().unwrap();

        assert_eq!(data.template_slug.as_deref(), Some("welcome"));
        assert_eq!(data.template_version, Some(2));
        assert_eq!(data.project_id, Some(7));
        assert!(data.text.is_none());
    }

    #[test]
    fn invalid_address_fails_at_the_setter() {
        assert!(EmailBuilder::new().from("not-an-address").is_err());
        assert!(EmailBuilder::new().to(["also bad"]).is_err());
    }

    #[test]
    fn default_carries_the_documented_tracking_flags() {
        let data = EmailBuilder::default()
            .from("sender@example.com")
            .unwrap()
            .to(["to@example.com"])
            .unwrap()
            .subject("Hello")
            .unwrap()
            .text("hi")
            .build()
            .unwrap();

        let options = data.options.unwrap();
        assert!(options.click_tracking);
        assert!(options.open_tracking);
        assert!(!options.transactional);
        assert!(options.inline_css);
        assert!(options.perform_substitutions);
    }

    #[test]
    fn build_is_repeatable() {
        let builder = minimal().text("hi");

        let first = builder.build().unwrap();
        let second = builder.build().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn add_to_accumulates_recipients() {
        let data = minimal()
            .add_to("second@example.com")
            .unwrap()
            .text("hi")
            .build()
            .unwrap();

        assert_eq!(data.to.len(), 2);
    }

    #[test]
    fn tracking_flags_flow_into_options() {
        let data = minimal()
            .text("hi")
            .with_click_tracking(false)
            .transactional(true)
            .build()
            .unwrap();

        let options = data.options.unwrap();
        assert!(!options.click_tracking);
        assert!(options.open_tracking);
        assert!(options.transactional);
    }

    #[test]
    fn add_substitution_and_metadata_accumulate() {
        let data = minimal()
            .text("hi")
            .add_metadata("order", "1234")
            .add_substitution("name", "Ada")
            .add_substitution("count", 3)
            .build()
            .unwrap();

        assert_eq!(data.metadata.unwrap().get("order"), Some("1234"));
        let subs = data.substitution_data.unwrap();
        assert_eq!(subs.get("name"), Some(&json!("Ada")));
        assert_eq!(subs.get("count"), Some(&json!(3)));
    }

    #[test]
    fn payload_from_builder_carries_options_block() {
        let data = minimal().html("<p>hi</p>").build().unwrap();
        let payload = data.to_payload();

        assert_eq!(
            payload["options"],
            json!({
                "click_tracking": true,
                "open_tracking": true,
                "transactional": false,
                "inline_css": true,
                "perform_substitutions": true,
            })
        );
    }
}
