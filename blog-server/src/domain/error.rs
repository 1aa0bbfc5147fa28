use blog_content::ContentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("page cache is full, try again later")]
    CacheFull,

    #[error(transparent)]
    Content(#[from] ContentError),
}
