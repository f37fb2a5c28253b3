//! Service façades for the Lettr API.
//!
//! Each service binds one resource's endpoint paths to DTO
//! (de)serialization and delegates the actual HTTP work to the
//! [`Transporter`](crate::transport::Transporter). Services hold no state
//! beyond the shared transporter, so they are cheap to construct and safe
//! to use from multiple tasks.
//!
//! - **emails**: send emails and query delivery events
//! - **domains**: manage sending domains and DNS verification
//! - **webhooks**: inspect webhook configuration and delivery health
//! - **templates**: manage templates and their merge tags
//! - **projects**: list projects
//! - **health**: API health and auth checks

pub mod domains;
pub mod emails;
pub mod health;
pub mod projects;
pub mod templates;
pub mod webhooks;

pub use domains::DomainService;
pub use emails::EmailService;
pub use health::HealthService;
pub use projects::ProjectService;
pub use templates::TemplateService;
pub use webhooks::WebhookService;
