//! Rust client for the [Lettr](https://lettr.com) transactional email API.
//!
//! The crate is organized in four layers:
//!
//! - **Value objects** ([`value_objects`]) validate and normalize scalar
//!   inputs (addresses, domains, subjects, ids) at construction, so
//!   invalid data never reaches the wire.
//! - **Collections** ([`collections`]) are immutable, order-preserving
//!   groups of value objects and resources with domain filters.
//! - **Services** ([`services`]) bind each API resource to its endpoints
//!   and DTOs; [`builders::EmailBuilder`] assembles outgoing email.
//! - **Transport** ([`transport`]) speaks HTTP and maps error responses
//!   onto [`LettrError`], including the 429 split between throttling and
//!   quota exhaustion.
//!
//! # Example
//!
//! ```no_run
//! use lettr::Lettr;
//!
//! # async fn example() -> lettr::LettrResult<()> {
//! let client = Lettr::new(std::env::var("LETTR_API_KEY").unwrap())?;
//!
//! let email = client
//!     .emails()
//!     .create()
//!     .from_with_name("noreply@example.com", "Example")?
//!     .to(["user@example.com"])?
//!     .subject("Welcome aboard")?
//!     .html("<h1>Hello!</h1>")
//!     .tag("onboarding")?;
//!
//! let response = client.emails().send(email).await?;
//! println!("accepted {} recipient(s)", response.accepted);
//! # Ok(())
//! # }
//! ```

pub mod builders;
pub mod client;
pub mod collections;
pub mod config;
pub mod errors;
pub mod services;
pub mod transport;
pub mod types;
pub mod value_objects;

pub use builders::EmailBuilder;
pub use client::Lettr;
pub use config::{LettrConfig, LettrConfigBuilder, DEFAULT_BASE_URL};
pub use errors::{LettrError, LettrResult};
pub use transport::Transporter;
pub use types::{RateLimit, SendingQuota};

/// Crate version, sent in the `User-Agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
