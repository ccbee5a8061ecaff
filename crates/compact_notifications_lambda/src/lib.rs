//! AWS-oriented adapters, clients, services and handlers for compact notifications.
//!
//! Domain behavior lives in `compact_notifications_core`; this crate wires it to
//! the configuration and event tables, the report bucket and the email service
//! through the adapter traits in [`adapters`].

pub mod adapters;
pub mod aws;
pub mod clients;
pub mod config;
pub mod handlers;
pub mod logging;
pub mod services;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;
