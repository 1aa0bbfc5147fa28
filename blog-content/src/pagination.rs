//! Курсорная пагинация списка постов.
//!
//! [`fetch_next_page`] ничего не знает о состоянии вызывающего: он только
//! загружает и проецирует страницу. Слияние результата с накопленным
//! списком делает [`PaginationState`].

use crate::error::ContentResult;
use crate::models::{PostPage, PostSummary, RawPage};
use crate::source::ContentSource;

/// Загружает страницу по курсору и проецирует её документы в [`PostSummary`].
///
/// Ошибки сети и разбора возвращаются как есть, без повторов.
pub async fn fetch_next_page<S>(source: &S, cursor: &str) -> ContentResult<PostPage>
where
    S: ContentSource + ?Sized,
{
    let raw: RawPage = source.fetch_page(cursor).await?;
    PostPage::try_from(&raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Итог попытки догрузить следующую страницу.
pub enum LoadMore {
    /// Добавлено столько-то постов.
    Appended(usize),
    /// Курсора нет, запрос не выполнялся.
    Exhausted,
    /// Предыдущая загрузка ещё не завершилась, запрос не выполнялся.
    InFlight,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Накопленный список постов и курсор следующей страницы.
///
/// Порядок постов совпадает с порядком загрузки; дубликаты по `uid` не
/// отбрасываются.
pub struct PaginationState {
    items: Vec<PostSummary>,
    cursor: Option<String>,
    in_flight: bool,
}

impl PaginationState {
    /// Состояние после первой загрузки.
    pub fn new(page: PostPage) -> Self {
        Self {
            items: page.results,
            cursor: page.next_page,
            in_flight: false,
        }
    }

    /// Загруженные посты.
    pub fn items(&self) -> &[PostSummary] {
        &self.items
    }

    /// Курсор следующей страницы.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Есть ли ещё страницы.
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }

    /// Идёт ли сейчас загрузка.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Дописывает посты страницы в конец и заменяет курсор курсором страницы.
    ///
    /// Защиты от повторного применения нет: последний применённый ответ
    /// определяет курсор.
    pub fn merge(&mut self, page: PostPage) -> usize {
        let appended = page.results.len();
        self.items.extend(page.results);
        self.cursor = page.next_page;
        appended
    }

    /// Начинает загрузку: возвращает курсор, если он есть и другая загрузка
    /// не идёт. После этого до [`finish_load`](Self::finish_load) повторный
    /// вызов возвращает `None`.
    pub fn begin_load(&mut self) -> Option<String> {
        if self.in_flight {
            return None;
        }
        let cursor = self.cursor.clone()?;
        self.in_flight = true;
        Some(cursor)
    }

    /// Завершает загрузку, начатую [`begin_load`](Self::begin_load).
    ///
    /// При ошибке состояние не меняется, ошибка возвращается вызывающему.
    pub fn finish_load(&mut self, result: ContentResult<PostPage>) -> ContentResult<usize> {
        self.in_flight = false;
        result.map(|page| self.merge(page))
    }

    /// Догружает следующую страницу через `source`.
    pub async fn load_more<S>(&mut self, source: &S) -> ContentResult<LoadMore>
    where
        S: ContentSource + ?Sized,
    {
        if self.in_flight {
            return Ok(LoadMore::InFlight);
        }
        let Some(cursor) = self.begin_load() else {
            return Ok(LoadMore::Exhausted);
        };

        let result = fetch_next_page(source, &cursor).await;
        self.finish_load(result).map(LoadMore::Appended)
    }
}
