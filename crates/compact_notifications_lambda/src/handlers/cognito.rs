//! Cognito `CustomMessage_*` trigger.

use compact_notifications_core::{Result, ValidationError};
use serde_json::{Map, Value};

use crate::services::CognitoMessageService;

const DEFAULT_CODE_PARAMETER: &str = "{####}";
const DEFAULT_USERNAME_PARAMETER: &str = "{username}";

/// Returns the trigger event with `response.emailSubject` and
/// `response.emailMessage` filled in.
pub fn handle_custom_message_event(
    mut event: Value,
    service: &CognitoMessageService<'_>,
) -> Result<Value> {
    let trigger_source = event
        .get("triggerSource")
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::new("triggerSource is required"))?
        .to_string();
    let request = event.get("request");
    let parameter = |name: &str, default: &str| {
        request
            .and_then(|request| request.get(name))
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };
    let code = parameter("codeParameter", DEFAULT_CODE_PARAMETER);
    let username = parameter("usernameParameter", DEFAULT_USERNAME_PARAMETER);

    let message = service
        .message_for_trigger(&trigger_source, &code, &username)
        .map_err(|error| {
            tracing::warn!(trigger_source = %trigger_source, %error, "unsupported custom message");
            error
        })?;
    tracing::info!(trigger_source = %trigger_source, "custom message built");

    let Some(object) = event.as_object_mut() else {
        return Err(ValidationError::new("Cognito event must be a JSON object").into());
    };
    let response = object
        .entry("response")
        .or_insert_with(|| Value::Object(Map::new()));
    if !response.is_object() {
        *response = Value::Object(Map::new());
    }
    if let Value::Object(fields) = response {
        fields.insert("emailSubject".to_string(), Value::String(message.subject));
        fields.insert("emailMessage".to_string(), Value::String(message.html_content));
    }
    Ok(event)
}
