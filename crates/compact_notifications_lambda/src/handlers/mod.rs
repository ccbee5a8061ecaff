pub mod cognito;
pub mod ingest_reporter;
pub mod notification;
