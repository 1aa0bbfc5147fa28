use std::sync::Arc;

use blog_content::PostDetail;

use super::error::DomainError;

/// Состояние детальной страницы поста.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DetailState {
    /// Страница ещё не сгенерирована, генерация идёт в фоне.
    Generating,
    Ready(Arc<PostDetail>),
    NotFound,
}

const MAX_SLUG_LEN: usize = 200;

/// Slug из URL: непустой, без пробелов и разделителей пути.
pub(crate) fn normalize_slug(raw: &str) -> Result<String, DomainError> {
    let slug = raw.trim();
    if slug.is_empty() || slug.len() > MAX_SLUG_LEN {
        return Err(DomainError::Validation {
            field: "slug",
            message: "must be 1..200 chars",
        });
    }
    if slug
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '?' | '#' | '"'))
    {
        return Err(DomainError::Validation {
            field: "slug",
            message: "contains forbidden characters",
        });
    }
    Ok(slug.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_slug_trims() {
        assert_eq!(normalize_slug("  como-usar-hooks ").unwrap(), "como-usar-hooks");
    }

    #[test]
    fn normalize_slug_rejects_empty_and_separators() {
        for raw in ["", "   ", "a/b", "a b", "x\"y"] {
            let err = normalize_slug(raw).expect_err("must be rejected");
            assert!(matches!(err, DomainError::Validation { field: "slug", .. }));
        }
    }

    #[test]
    fn normalize_slug_rejects_overlong() {
        let raw = "a".repeat(MAX_SLUG_LEN + 1);
        assert!(normalize_slug(&raw).is_err());
    }
}
