use thiserror::Error;

/// Errors raised while polling and reporting homework statuses.
///
/// The `Display` text of every variant except [`AppError::Config`] and
/// [`AppError::NotificationDelivery`] is sent to the chat as-is, so it is
/// written for the bot's reader.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ошибка при запросе к основному API: {0}")]
    Transport(String),

    #[error("ENDPOINT недоступен. Код состояния {status}, параметры запроса: from_date={from_date}")]
    EndpointUnavailable { status: u16, from_date: i64 },

    #[error("Ошибка преобразования ответа API из формата JSON: {0}")]
    Decoding(String),

    #[error("Ответ API не является словарем")]
    NotAnObject,

    #[error("В ответе API отсутствует поле {0}")]
    MissingField(&'static str),

    #[error("Homeworks приходят не в виде списка")]
    NotAList,

    #[error("В ответе API отсутствует ожидаемый ключ {0}")]
    MissingKey(&'static str),

    #[error("Недокументированный статус работы: {0}")]
    UnknownStatus(String),

    #[error("Сбой при отправке сообщения в Telegram: {0}")]
    NotificationDelivery(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
