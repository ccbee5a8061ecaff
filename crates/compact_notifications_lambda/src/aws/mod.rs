//! AWS SDK implementations of the adapter traits.
//!
//! Adapter traits are synchronous; each call parks the current worker with
//! `block_in_place` and drives the SDK future on the ambient Tokio runtime, so
//! binaries must run on the multi-threaded runtime.

pub mod dynamodb;
pub mod s3;
pub mod ses;

pub use dynamodb::DynamoRecordStore;
pub use s3::S3BlobStore;
pub use ses::SesMailDispatcher;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
