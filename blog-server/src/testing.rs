//! Тестовый двойник content API для сервиса и роутера.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blog_content::{ContentError, ContentResult, ContentSource, RawDocument, RawPage};
use serde_json::json;

#[derive(Clone, Default)]
pub(crate) struct FakeContentSource {
    first_page: Arc<Mutex<Vec<String>>>,
    first_next: Arc<Mutex<Option<String>>>,
    pages: Arc<Mutex<HashMap<String, RawPage>>>,
    documents: Arc<Mutex<HashMap<String, RawDocument>>>,
    failing: Arc<Mutex<bool>>,
    query_calls: Arc<Mutex<usize>>,
    uid_calls: Arc<Mutex<usize>>,
}

impl FakeContentSource {
    pub(crate) fn with_posts(uids: &[&str]) -> Self {
        let source = Self::default();
        source.set_first_page(uids);
        for uid in uids {
            source
                .documents
                .lock()
                .expect("documents mutex poisoned")
                .insert(uid.to_string(), raw_document(uid));
        }
        source
    }

    pub(crate) fn set_first_page(&self, uids: &[&str]) {
        *self.first_page.lock().expect("first_page mutex poisoned") =
            uids.iter().map(|uid| uid.to_string()).collect();
    }

    pub(crate) fn set_first_next(&self, cursor: &str) {
        *self.first_next.lock().expect("first_next mutex poisoned") = Some(cursor.to_string());
    }

    pub(crate) fn put_page(&self, cursor: &str, uids: &[&str], next: Option<&str>) {
        self.pages
            .lock()
            .expect("pages mutex poisoned")
            .insert(cursor.to_string(), raw_page(uids, next));
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        *self.failing.lock().expect("failing mutex poisoned") = failing;
    }

    pub(crate) fn uid_calls(&self) -> usize {
        *self.uid_calls.lock().expect("uid_calls mutex poisoned")
    }

    pub(crate) fn query_calls(&self) -> usize {
        *self.query_calls.lock().expect("query_calls mutex poisoned")
    }

    fn check_failing(&self) -> ContentResult<()> {
        if *self.failing.lock().expect("failing mutex poisoned") {
            return Err(ContentError::Status {
                status: 503,
                message: "content api unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentSource for FakeContentSource {
    async fn query_by_type(&self, _document_type: &str, _page_size: u32) -> ContentResult<RawPage> {
        *self.query_calls.lock().expect("query_calls mutex poisoned") += 1;
        self.check_failing()?;
        let uids = self
            .first_page
            .lock()
            .expect("first_page mutex poisoned")
            .clone();
        let uids: Vec<&str> = uids.iter().map(String::as_str).collect();
        let next = self
            .first_next
            .lock()
            .expect("first_next mutex poisoned")
            .clone();
        Ok(raw_page(&uids, next.as_deref()))
    }

    async fn get_by_uid(&self, _document_type: &str, uid: &str) -> ContentResult<Option<RawDocument>> {
        *self.uid_calls.lock().expect("uid_calls mutex poisoned") += 1;
        self.check_failing()?;
        Ok(self
            .documents
            .lock()
            .expect("documents mutex poisoned")
            .get(uid)
            .cloned())
    }

    async fn fetch_page(&self, cursor: &str) -> ContentResult<RawPage> {
        self.check_failing()?;
        self.pages
            .lock()
            .expect("pages mutex poisoned")
            .get(cursor)
            .cloned()
            .ok_or_else(|| ContentError::InvalidCursor(cursor.to_string()))
    }
}

pub(crate) fn raw_document(uid: &str) -> RawDocument {
    serde_json::from_value(json!({
        "id": format!("id-{uid}"),
        "uid": uid,
        "type": "post",
        "first_publication_date": "2021-03-25T19:25:28+0000",
        "data": {
            "title": format!("Title {uid}"),
            "subtitle": "Subtitle",
            "author": "Author",
            "banner": { "url": "https://images.example.com/banner.png" },
            "content": [{
                "heading": "Heading",
                "body": [{ "type": "paragraph", "text": "one two three four five", "spans": [] }]
            }]
        }
    }))
    .expect("fixture must deserialize")
}

pub(crate) fn raw_page(uids: &[&str], next: Option<&str>) -> RawPage {
    RawPage {
        page: 1,
        total_pages: 1,
        total_results_size: uids.len() as u64,
        results: uids.iter().map(|uid| raw_document(uid)).collect(),
        next_page: next.map(str::to_string),
    }
}
