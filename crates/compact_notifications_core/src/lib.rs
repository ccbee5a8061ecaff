//! Shared notification domain primitives.
//!
//! This crate owns deterministic behavior: request contracts, store key shapes,
//! time windows, recipient selection, template documents and their rendering.
//! It intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod content;
pub mod contract;
pub mod error;
pub mod events;
pub mod keys;
pub mod mime;
pub mod recipients;
pub mod request;
pub mod settings;
pub mod template;
pub mod time_windows;

pub use error::{NotificationError, Result, ValidationError};
