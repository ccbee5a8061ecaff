use std::sync::Arc;

use compact_notifications_lambda::config::RuntimeConfig;
use compact_notifications_lambda::handlers::cognito::handle_custom_message_event;
use compact_notifications_lambda::logging::init_logging;
use compact_notifications_lambda::services::CognitoMessageService;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(config: Arc<RuntimeConfig>, event: LambdaEvent<Value>) -> Result<Value, Error> {
    let service = CognitoMessageService::new(&config.settings);
    Ok(handle_custom_message_event(event.payload, &service)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();
    let config = Arc::new(RuntimeConfig::from_env()?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let config = Arc::clone(&config);
        async move { handle_request(config, event).await }
    }))
    .await
}
