//! `selldesk-observability` — logging/tracing setup for binaries and tools
//! embedding the selldesk core.

pub mod tracing;

pub use tracing::init;
