//! Validated scalar wrappers.
//!
//! Each value object wraps a single primitive, enforces its format or length
//! invariant at construction, and is immutable thereafter: once a value
//! exists, it is valid. All of them serialize as their string form and
//! validate when deserialized, so an API response containing a malformed
//! value fails at the parsing boundary rather than leaking inward.

mod base64_data;
mod domain_name;
mod email_address;
mod ids;
mod ip_address;
mod mime_type;
mod subject;
mod timestamp;

pub use base64_data::Base64Data;
pub use domain_name::DomainName;
pub use email_address::EmailAddress;
pub use ids::{CampaignId, Cursor, MessageId, RequestId, Tag, WebhookId};
pub use ip_address::IpAddress;
pub use mime_type::MimeType;
pub use subject::Subject;
pub use timestamp::Timestamp;
