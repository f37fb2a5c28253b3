//! Fluent builders.

mod email;

pub use email::EmailBuilder;
