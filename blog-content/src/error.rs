use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки библиотеки `blog-content`.
pub enum ContentError {
    /// Ошибка HTTP-транспорта (`reqwest`): сеть, таймаут, обрыв тела ответа.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Content API вернул неуспешный статус.
    #[error("content api responded with {status}: {message}")]
    Status {
        /// HTTP-статус ответа.
        status: u16,
        /// Текст ошибки из тела ответа или описание статуса.
        message: String,
    },

    /// Запрошенный документ не найден.
    #[error("document not found: {0}")]
    NotFound(String),

    /// В документе отсутствует обязательное поле.
    #[error("missing field `{0}` in content document")]
    MissingField(&'static str),

    /// Дата публикации в неизвестном формате.
    #[error("invalid publication date '{value}'")]
    InvalidDate {
        /// Исходное значение даты.
        value: String,
        /// Ошибка разбора.
        #[source]
        source: chrono::ParseError,
    },

    /// Content API не вернул master ref.
    #[error("content api has no master ref")]
    MissingMasterRef,

    /// Курсор пагинации не является URL этого content API.
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),

    /// Ошибка разбора JSON.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Результат операций `blog-content`.
pub type ContentResult<T> = Result<T, ContentError>;

impl ContentError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::NOT_FOUND => {
                Self::NotFound(message.unwrap_or_else(|| "http status 404".to_string()))
            }
            _ => Self::Status {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| format!("http status {status}")),
            },
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }

    /// Ошибка на стороне content API или транспорта (а не в запросе клиента):
    /// недоступность, неуспешный статус, некорректный ответ или документ.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Status { .. }
                | Self::MissingMasterRef
                | Self::Decode(_)
                | Self::MissingField(_)
                | Self::InvalidDate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_maps_to_not_found() {
        let err = ContentError::from_http_status(reqwest::StatusCode::NOT_FOUND, None);
        assert!(matches!(err, ContentError::NotFound(_)));
        assert!(!err.is_upstream());
    }

    #[test]
    fn other_status_keeps_code_and_message() {
        let err = ContentError::from_http_status(
            reqwest::StatusCode::BAD_GATEWAY,
            Some("upstream down".to_string()),
        );
        match err {
            ContentError::Status { status, ref message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            _ => panic!("expected ContentError::Status"),
        }
        assert!(err.is_upstream());
    }

    #[test]
    fn client_side_errors_are_not_upstream() {
        assert!(!ContentError::InvalidCursor("x".to_string()).is_upstream());
        assert!(ContentError::MissingField("uid").is_upstream());
    }
}
