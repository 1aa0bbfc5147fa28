//! Клиентская библиотека блога поверх headless CMS.
//!
//! Содержит:
//! - HTTP-клиент content API (`HttpClient`) и абстракцию источника
//!   (`ContentSource`), чтобы потоки можно было гонять на тестовом двойнике;
//! - проекцию документов в модели `PostSummary` / `PostDetail`;
//! - курсорную пагинацию (`PaginationState`, `fetch_next_page`);
//! - оценку времени чтения и форматирование дат для отображения.
#![warn(missing_docs)]

mod date;
mod error;
mod http_client;
mod models;
mod pagination;
mod projection;
mod reading_time;
mod source;

#[cfg(test)]
mod testing;

pub use date::{DISPLAY_DATE_FORMAT, format_display_date};
pub use error::{ContentError, ContentResult};
pub use http_client::HttpClient;
pub use models::{
    Banner, ContentSection, POST_DOCUMENT_TYPE, PostDetail, PostPage, PostSummary, RawContentSection,
    RawDocument, RawImage, RawPage, RawPostData, RichTextBlock, Span,
};
pub use pagination::{LoadMore, PaginationState, fetch_next_page};
pub use projection::parse_publication_date;
pub use reading_time::{WORDS_PER_MINUTE, reading_time_minutes, total_words, word_count};
pub use source::ContentSource;

use std::collections::HashSet;

use tracing::{debug, warn};

/// Размер первой страницы списка постов.
pub const DEFAULT_LISTING_PAGE_SIZE: u32 = 1;

/// Размер страницы при перечислении всех slug.
const SLUG_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
/// Потоки блога поверх произвольного источника контента.
pub struct ContentClient<S> {
    source: S,
}

impl ContentClient<HttpClient> {
    /// Клиент поверх HTTP content API.
    pub fn http(api_endpoint: impl Into<String>, access_token: Option<String>) -> ContentResult<Self> {
        Ok(Self::new(HttpClient::new(api_endpoint, access_token)?))
    }
}

impl<S: ContentSource> ContentClient<S> {
    /// Создаёт клиент поверх источника.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Источник, через который идут запросы.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Первая страница постов (поток списка).
    pub async fn list_posts(&self, page_size: u32) -> ContentResult<PostPage> {
        let raw = self
            .source
            .query_by_type(POST_DOCUMENT_TYPE, page_size)
            .await?;
        let page = PostPage::try_from(&raw)?;
        debug!(
            posts = page.results.len(),
            has_next = page.next_page.is_some(),
            "listing page fetched"
        );
        Ok(page)
    }

    /// Следующая страница постов по курсору.
    pub async fn next_page(&self, cursor: &str) -> ContentResult<PostPage> {
        fetch_next_page(&self.source, cursor).await
    }

    /// Пост по slug (поток детальной страницы), `None` если поста нет.
    pub async fn get_post(&self, slug: &str) -> ContentResult<Option<PostDetail>> {
        match self.source.get_by_uid(POST_DOCUMENT_TYPE, slug).await? {
            Some(doc) => Ok(Some(PostDetail::try_from(&doc)?)),
            None => Ok(None),
        }
    }

    /// Все известные slug постов. Документы без uid пропускаются,
    /// повторный курсор завершает обход.
    pub async fn post_slugs(&self) -> ContentResult<Vec<String>> {
        let mut page = self
            .source
            .query_by_type(POST_DOCUMENT_TYPE, SLUG_PAGE_SIZE)
            .await?;
        let mut slugs = Vec::new();
        let mut visited = HashSet::new();

        loop {
            slugs.extend(page.results.iter().filter_map(|doc| doc.uid.clone()));
            let Some(cursor) = page.next_page.take() else {
                break;
            };
            if !visited.insert(cursor.clone()) {
                warn!(%cursor, "content api returned a cursor loop, stopping enumeration");
                break;
            }
            page = self.source.fetch_page(&cursor).await?;
        }

        Ok(slugs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeSource, raw_document, raw_page};

    #[tokio::test]
    async fn list_posts_projects_first_page() {
        let source = FakeSource::new();
        source.put_first_page(POST_DOCUMENT_TYPE, raw_page(&["a"], Some("cursor-2")));
        let client = ContentClient::new(source);

        let page = client.list_posts(1).await.expect("must list");

        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].uid, "a");
        assert_eq!(page.next_page.as_deref(), Some("cursor-2"));
    }

    #[tokio::test]
    async fn get_post_returns_none_for_unknown_slug() {
        let client = ContentClient::new(FakeSource::new());
        let post = client.get_post("missing").await.expect("must not fail");
        assert!(post.is_none());
    }

    #[tokio::test]
    async fn get_post_projects_detail() {
        let source = FakeSource::new();
        source.put_document(raw_document("hooks"));
        let client = ContentClient::new(source);

        let post = client
            .get_post("hooks")
            .await
            .expect("must not fail")
            .expect("must exist");

        assert_eq!(post.uid, "hooks");
        assert_eq!(post.banner.url, "https://images.example.com/hooks.png");
        assert_eq!(post.reading_time(), 1);
    }

    #[tokio::test]
    async fn post_slugs_follows_cursors_and_skips_missing_uids() {
        let source = FakeSource::new();
        source.put_first_page(POST_DOCUMENT_TYPE, raw_page(&["a", "b"], Some("page-2")));
        let mut second = raw_page(&["c"], None);
        second.results.push(RawDocument {
            uid: None,
            ..raw_document("ignored")
        });
        source.put_page("page-2", second);
        let client = ContentClient::new(source.clone());

        let slugs = client.post_slugs().await.expect("must enumerate");

        assert_eq!(slugs, ["a", "b", "c"]);
        assert_eq!(source.fetched_cursors(), ["page-2"]);
    }

    #[tokio::test]
    async fn post_slugs_stops_on_cursor_loop() {
        let source = FakeSource::new();
        source.put_first_page(POST_DOCUMENT_TYPE, raw_page(&["a"], Some("page-2")));
        source.put_page("page-2", raw_page(&["b"], Some("page-3")));
        source.put_page("page-3", raw_page(&["c"], Some("page-2")));
        let client = ContentClient::new(source.clone());

        let slugs = client.post_slugs().await.expect("must enumerate");

        assert_eq!(slugs, ["a", "b", "c"]);
        assert_eq!(source.fetched_cursors(), ["page-2", "page-3"]);
    }
}
