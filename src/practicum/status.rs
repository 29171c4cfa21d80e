use crate::error::{AppError, Result};
use crate::practicum::types::{HomeworkStatus, StatusRecord};

/// Build the chat message for a homework record.
pub fn parse_status(record: &StatusRecord) -> Result<String> {
    let status: HomeworkStatus = record
        .status
        .as_deref()
        .ok_or(AppError::MissingKey("status"))?
        .parse()?;

    let name = record
        .name
        .as_deref()
        .ok_or(AppError::MissingKey("homework_name"))?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}
