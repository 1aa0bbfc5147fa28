use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ContentResult;
use crate::models::{RawDocument, RawPage};

/// Доступ к content API на уровне сырых документов.
///
/// Потоки списка и детальной страницы получают источник снаружи, поэтому в
/// тестах вместо HTTP-клиента подставляется двойник.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Первая страница документов заданного типа.
    async fn query_by_type(&self, document_type: &str, page_size: u32) -> ContentResult<RawPage>;

    /// Документ по типу и uid, `None` если такого нет.
    async fn get_by_uid(&self, document_type: &str, uid: &str)
    -> ContentResult<Option<RawDocument>>;

    /// Страница по курсору (абсолютному URL из `next_page`).
    async fn fetch_page(&self, cursor: &str) -> ContentResult<RawPage>;
}

#[async_trait]
impl<T: ContentSource + ?Sized> ContentSource for Arc<T> {
    async fn query_by_type(&self, document_type: &str, page_size: u32) -> ContentResult<RawPage> {
        (**self).query_by_type(document_type, page_size).await
    }

    async fn get_by_uid(
        &self,
        document_type: &str,
        uid: &str,
    ) -> ContentResult<Option<RawDocument>> {
        (**self).get_by_uid(document_type, uid).await
    }

    async fn fetch_page(&self, cursor: &str) -> ContentResult<RawPage> {
        (**self).fetch_page(cursor).await
    }
}
