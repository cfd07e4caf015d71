use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиента `omnipost-ai`.
pub enum AiError {
    /// API-ключ не задан.
    #[error("api key is not configured")]
    MissingApiKey,

    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// API вернул не-2xx статус.
    #[error("api status {status}: {message}")]
    Status {
        /// HTTP-статус ответа.
        status: u16,
        /// Тело ответа (усечённое).
        message: String,
    },

    /// Ответ без пригодного текста (нет кандидатов или пустые части).
    #[error("empty response")]
    EmptyResponse,
}

/// Результат операций `omnipost-ai`.
pub type AiResult<T> = Result<T, AiError>;
