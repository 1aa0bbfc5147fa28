//! Проекция документов content API в модели представления.
//!
//! Из документа берутся только нужные поля. Отсутствие обязательного поля
//! не подменяется значением по умолчанию, а возвращается как
//! [`ContentError::MissingField`].

use chrono::{DateTime, Utc};

use crate::error::{ContentError, ContentResult};
use crate::models::{
    Banner, ContentSection, PostDetail, PostPage, PostSummary, RawContentSection, RawDocument,
    RawPage, RawPostData,
};

impl TryFrom<&RawDocument> for PostSummary {
    type Error = ContentError;

    fn try_from(doc: &RawDocument) -> ContentResult<Self> {
        let (title, subtitle, author) = common_fields(&doc.data)?;
        Ok(Self {
            uid: required(&doc.uid, "uid")?,
            first_publication_date: parse_publication_date(doc.first_publication_date.as_deref())?,
            title,
            subtitle,
            author,
        })
    }
}

impl TryFrom<&RawDocument> for PostDetail {
    type Error = ContentError;

    fn try_from(doc: &RawDocument) -> ContentResult<Self> {
        let (title, subtitle, author) = common_fields(&doc.data)?;

        let banner_url = doc
            .data
            .banner
            .as_ref()
            .and_then(|banner| banner.url.clone())
            .ok_or(ContentError::MissingField("data.banner.url"))?;

        let content = doc
            .data
            .content
            .as_ref()
            .ok_or(ContentError::MissingField("data.content"))?
            .iter()
            .map(ContentSection::try_from)
            .collect::<ContentResult<Vec<_>>>()?;

        Ok(Self {
            uid: required(&doc.uid, "uid")?,
            first_publication_date: parse_publication_date(doc.first_publication_date.as_deref())?,
            title,
            subtitle,
            author,
            banner: Banner { url: banner_url },
            content,
        })
    }
}

impl TryFrom<&RawContentSection> for ContentSection {
    type Error = ContentError;

    fn try_from(section: &RawContentSection) -> ContentResult<Self> {
        Ok(Self {
            heading: required(&section.heading, "data.content.heading")?,
            body: section
                .body
                .clone()
                .ok_or(ContentError::MissingField("data.content.body"))?,
        })
    }
}

impl TryFrom<&RawPage> for PostPage {
    type Error = ContentError;

    fn try_from(page: &RawPage) -> ContentResult<Self> {
        let results = page
            .results
            .iter()
            .map(PostSummary::try_from)
            .collect::<ContentResult<Vec<_>>>()?;

        Ok(Self {
            results,
            next_page: page.next_page.clone(),
        })
    }
}

/// Разбирает дату публикации.
///
/// Принимает RFC 3339 (`2021-03-25T19:25:28Z`, `...+00:00`) и формат
/// content API со смещением без двоеточия (`2021-03-25T19:25:28+0000`).
pub fn parse_publication_date(raw: Option<&str>) -> ContentResult<Option<DateTime<Utc>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let parsed = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .map_err(|source| ContentError::InvalidDate {
            value: raw.to_string(),
            source,
        })?;

    Ok(Some(parsed.with_timezone(&Utc)))
}

fn common_fields(data: &RawPostData) -> ContentResult<(String, String, String)> {
    Ok((
        required(&data.title, "data.title")?,
        required(&data.subtitle, "data.subtitle")?,
        required(&data.author, "data.author")?,
    ))
}

fn required(value: &Option<String>, field: &'static str) -> ContentResult<String> {
    value.clone().ok_or(ContentError::MissingField(field))
}
