pub mod blob_store;
pub mod mailer;
pub mod record_store;

pub use blob_store::BlobStore;
pub use mailer::{EmailBody, MailDispatcher, OutgoingEmail};
pub use record_store::RecordStore;
