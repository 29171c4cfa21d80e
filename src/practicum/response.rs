use serde_json::Value;

use crate::error::{AppError, Result};
use crate::practicum::types::StatusRecord;

const HOMEWORKS_FIELD: &str = "homeworks";
const NAME_KEY: &str = "homework_name";
const NAME_ALIAS: &str = "name";
const STATUS_KEY: &str = "status";

/// Check the shape of an API payload and extract its homework records.
///
/// An empty `homeworks` list is valid. Records missing a key are logged and
/// kept, in payload order.
pub fn validate(payload: &Value) -> Result<Vec<StatusRecord>> {
    let object = payload.as_object().ok_or(AppError::NotAnObject)?;

    let homeworks = object
        .get(HOMEWORKS_FIELD)
        .ok_or(AppError::MissingField(HOMEWORKS_FIELD))?;

    let items = homeworks.as_array().ok_or(AppError::NotAList)?;

    Ok(items.iter().map(extract_record).collect())
}

fn extract_record(item: &Value) -> StatusRecord {
    let name = item
        .get(NAME_KEY)
        .or_else(|| item.get(NAME_ALIAS))
        .and_then(value_to_string);
    let status = item.get(STATUS_KEY).and_then(value_to_string);

    if name.is_none() {
        tracing::error!(error = %AppError::MissingKey(NAME_KEY), "Malformed homework record");
    }
    if status.is_none() {
        tracing::error!(error = %AppError::MissingKey(STATUS_KEY), "Malformed homework record");
    }

    StatusRecord { name, status }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
