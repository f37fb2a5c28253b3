//! Typed, order-preserving collections over value objects and resources.
//!
//! All collections are immutable: `add` and the filter methods return a new
//! collection and never mutate in place. Each deserializes from a plain JSON
//! array, so list envelopes can hold them directly.

mod attachments;
mod domains;
mod email_addresses;
mod email_events;
mod event_types;
mod projects;
mod templates;
mod webhooks;

pub use attachments::AttachmentCollection;
pub use domains::DomainCollection;
pub use email_addresses::EmailAddressCollection;
pub use email_events::EmailEventCollection;
pub use event_types::EventTypeCollection;
pub use projects::ProjectCollection;
pub use templates::TemplateCollection;
pub use webhooks::WebhookCollection;
