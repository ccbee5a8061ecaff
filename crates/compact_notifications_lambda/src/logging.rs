/// Installs JSON log output for a Lambda binary. Module targets and timestamps
/// are omitted; CloudWatch records ingestion time.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .with_current_span(false)
        .without_time()
        .init();
}
