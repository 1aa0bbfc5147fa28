use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::{ContentError, ContentResult};
use crate::models::{RawDocument, RawPage};
use crate::source::ContentSource;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRootDto {
    refs: Vec<RefDto>,
}

#[derive(Debug, Deserialize)]
struct RefDto {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

#[derive(Debug, Clone)]
/// HTTP-клиент content API (REST v2 с предикатами и master ref).
pub struct HttpClient {
    api_endpoint: String,
    access_token: Option<String>,
    client: Client,
}

impl HttpClient {
    /// Создаёт клиент для endpoint вида `https://repo.cdn.prismic.io/api/v2`.
    pub fn new(
        api_endpoint: impl Into<String>,
        access_token: Option<String>,
    ) -> ContentResult<Self> {
        Self::with_timeout(api_endpoint, access_token, DEFAULT_TIMEOUT)
    }

    /// Создаёт клиент с заданным таймаутом запроса.
    pub fn with_timeout(
        api_endpoint: impl Into<String>,
        access_token: Option<String>,
        timeout: Duration,
    ) -> ContentResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            api_endpoint: api_endpoint.into().trim_end_matches('/').to_string(),
            access_token: access_token.filter(|token| !token.trim().is_empty()),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_endpoint, path.trim_start_matches('/'))
    }

    async fn decode_error(response: reqwest::Response) -> ContentError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .or(body.message)
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        ContentError::from_http_status(status, Some(message))
    }

    async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> ContentResult<T>
    where
        T: DeserializeOwned,
    {
        debug!(%url, "content api request");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(ContentError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let body = response.bytes().await.map_err(ContentError::from_reqwest)?;
        decode_body(&body)
    }

    fn token_query(&self) -> Vec<(&'static str, String)> {
        self.access_token
            .iter()
            .map(|token| ("access_token", token.clone()))
            .collect()
    }

    async fn master_ref(&self) -> ContentResult<String> {
        let root: ApiRootDto = self.get_json(&self.api_endpoint, &self.token_query()).await?;
        root.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or(ContentError::MissingMasterRef)
    }

    async fn search(&self, predicate: String, page_size: u32) -> ContentResult<RawPage> {
        let reference = self.master_ref().await?;

        let mut query = vec![
            ("ref", reference),
            ("q", format!("[{predicate}]")),
            ("pageSize", page_size.to_string()),
        ];
        query.extend(self.token_query());

        self.get_json(&self.endpoint("/documents/search"), &query)
            .await
    }

    /// Проверяет, что курсор указывает на тот же content API.
    fn ensure_same_origin(&self, cursor: &str) -> ContentResult<Url> {
        let cursor_url = Url::parse(cursor)
            .map_err(|err| ContentError::InvalidCursor(format!("{cursor}: {err}")))?;
        let api_url = Url::parse(&self.api_endpoint)
            .map_err(|err| ContentError::InvalidCursor(format!("bad api endpoint: {err}")))?;

        if cursor_url.origin() != api_url.origin() {
            return Err(ContentError::InvalidCursor(format!(
                "{cursor} does not belong to {}",
                self.api_endpoint
            )));
        }
        Ok(cursor_url)
    }
}

#[async_trait]
impl ContentSource for HttpClient {
    async fn query_by_type(&self, document_type: &str, page_size: u32) -> ContentResult<RawPage> {
        self.search(type_predicate(document_type), page_size).await
    }

    async fn get_by_uid(
        &self,
        document_type: &str,
        uid: &str,
    ) -> ContentResult<Option<RawDocument>> {
        let page = self.search(uid_predicate(document_type, uid), 1).await?;
        Ok(page.results.into_iter().next())
    }

    async fn fetch_page(&self, cursor: &str) -> ContentResult<RawPage> {
        let url = self.ensure_same_origin(cursor)?;
        // курсор уже содержит ref и access_token
        self.get_json(url.as_str(), &[]).await
    }
}

fn escape_predicate_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn type_predicate(document_type: &str) -> String {
    format!(
        "[at(document.type, \"{}\")]",
        escape_predicate_value(document_type)
    )
}

fn uid_predicate(document_type: &str, uid: &str) -> String {
    format!(
        "[at(my.{}.uid, \"{}\")]",
        document_type,
        escape_predicate_value(uid)
    )
}

/// Тело ответа в JSON; ошибка разбора становится [`ContentError::Decode`].
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> ContentResult<T> {
    Ok(serde_json::from_slice(body)?)
}
