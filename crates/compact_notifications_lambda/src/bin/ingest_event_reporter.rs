use std::sync::Arc;

use chrono::Utc;
use compact_notifications_lambda::aws::{DynamoRecordStore, S3BlobStore, SesMailDispatcher};
use compact_notifications_lambda::clients::{ConfigurationClient, EventClient};
use compact_notifications_lambda::config::RuntimeConfig;
use compact_notifications_lambda::handlers::ingest_reporter::{
    handle_ingest_reporter_event, ReporterScope, ReporterSummary,
};
use compact_notifications_lambda::logging::init_logging;
use compact_notifications_lambda::services::ServiceContext;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct RuntimeDependencies {
    config: RuntimeConfig,
    configuration_table: String,
    event_table: String,
    records: DynamoRecordStore,
    blobs: S3BlobStore,
    mailer: SesMailDispatcher,
}

async fn handle_request(
    deps: Arc<RuntimeDependencies>,
    event: LambdaEvent<Value>,
) -> Result<ReporterSummary, Error> {
    let context = ServiceContext {
        settings: &deps.config.settings,
        configuration: ConfigurationClient::new(&deps.records, &deps.configuration_table),
        blobs: &deps.blobs,
        mailer: &deps.mailer,
        report_bucket: deps.config.transaction_reports_bucket.as_deref(),
    };
    let scope = ReporterScope {
        compacts: &deps.config.compacts,
        jurisdictions: &deps.config.jurisdictions,
    };
    Ok(handle_ingest_reporter_event(
        event.payload,
        Utc::now(),
        context,
        EventClient::new(&deps.records, &deps.event_table),
        scope,
    )?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();
    let config = RuntimeConfig::from_env()?;
    let configuration_table = config.require_configuration_table()?.to_string();
    let event_table = config.require_event_table()?.to_string();
    if config.compacts.is_empty() {
        return Err(Error::from("COMPACTS must list at least one compact"));
    }

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = Arc::new(RuntimeDependencies {
        config,
        configuration_table,
        event_table,
        records: DynamoRecordStore::new(aws_sdk_dynamodb::Client::new(&aws_config)),
        blobs: S3BlobStore::new(aws_sdk_s3::Client::new(&aws_config)),
        mailer: SesMailDispatcher::new(aws_sdk_sesv2::Client::new(&aws_config)),
    });

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let deps = Arc::clone(&deps);
        async move { handle_request(deps, event).await }
    }))
    .await
}
