use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Тип документа с постами в content API.
pub const POST_DOCUMENT_TYPE: &str = "post";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Страница документов в том виде, в каком её отдаёт content API
/// (поиск по предикату или переход по курсору).
pub struct RawPage {
    /// Номер страницы.
    #[serde(default)]
    pub page: u32,
    /// Всего страниц в выборке.
    #[serde(default)]
    pub total_pages: u32,
    /// Всего документов в выборке.
    #[serde(default)]
    pub total_results_size: u64,
    /// Документы текущей страницы.
    pub results: Vec<RawDocument>,
    /// URL следующей страницы, `None` если страниц больше нет.
    #[serde(default)]
    pub next_page: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Документ content API. Лишние поля отбрасываются при разборе.
pub struct RawDocument {
    /// Внутренний идентификатор документа.
    #[serde(default)]
    pub id: String,
    /// Человекочитаемый уникальный идентификатор (slug).
    #[serde(default)]
    pub uid: Option<String>,
    /// Тип документа.
    #[serde(rename = "type", default)]
    pub document_type: String,
    /// Дата первой публикации в исходном строковом виде.
    #[serde(default)]
    pub first_publication_date: Option<String>,
    /// Поля поста.
    #[serde(default)]
    pub data: RawPostData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Поля документа типа `post`.
pub struct RawPostData {
    /// Заголовок.
    #[serde(default)]
    pub title: Option<String>,
    /// Подзаголовок.
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Автор.
    #[serde(default)]
    pub author: Option<String>,
    /// Баннер поста.
    #[serde(default)]
    pub banner: Option<RawImage>,
    /// Разделы поста.
    #[serde(default)]
    pub content: Option<Vec<RawContentSection>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Изображение из content API.
pub struct RawImage {
    /// Адрес изображения.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Раздел поста: заголовок и rich-text тело.
pub struct RawContentSection {
    /// Заголовок раздела.
    #[serde(default)]
    pub heading: Option<String>,
    /// Блоки rich text.
    #[serde(default)]
    pub body: Option<Vec<RichTextBlock>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Узел rich text. Передаётся рендереру как есть: типизированы только поля,
/// которые нужны для подсчёта слов и отрисовки, остальное хранится в `extra`.
pub struct RichTextBlock {
    /// Тип блока: `paragraph`, `heading1`..`heading6`, `list-item`, `image` и т.д.
    #[serde(rename = "type")]
    pub kind: String,
    /// Текст блока. У изображений и embed текста нет.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Разметка внутри текста.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<Span>,
    /// Прочие поля блока (`url`, `alt`, `oembed`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Разметка фрагмента текста. `start`/`end` — смещения в UTF-16 единицах.
pub struct Span {
    /// Начало фрагмента.
    pub start: usize,
    /// Конец фрагмента (не включительно).
    pub end: usize,
    /// Тип разметки: `strong`, `em`, `hyperlink`, `label`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Данные разметки (например, `url` ссылки).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Краткая модель поста для списка.
pub struct PostSummary {
    /// Slug поста.
    pub uid: String,
    /// Дата первой публикации (UTC).
    pub first_publication_date: Option<DateTime<Utc>>,
    /// Заголовок.
    pub title: String,
    /// Подзаголовок.
    pub subtitle: String,
    /// Автор.
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Полная модель поста для детальной страницы.
pub struct PostDetail {
    /// Slug поста.
    pub uid: String,
    /// Дата первой публикации (UTC).
    pub first_publication_date: Option<DateTime<Utc>>,
    /// Заголовок.
    pub title: String,
    /// Подзаголовок.
    pub subtitle: String,
    /// Автор.
    pub author: String,
    /// Баннер.
    pub banner: Banner,
    /// Разделы поста в исходном порядке.
    pub content: Vec<ContentSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Баннер поста.
pub struct Banner {
    /// Адрес изображения.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Раздел поста.
pub struct ContentSection {
    /// Заголовок раздела.
    pub heading: String,
    /// Блоки rich text в исходном порядке.
    pub body: Vec<RichTextBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Страница кратких моделей постов с курсором следующей страницы.
pub struct PostPage {
    /// Посты текущей страницы.
    pub results: Vec<PostSummary>,
    /// Курсор (URL) следующей страницы.
    pub next_page: Option<String>,
}
