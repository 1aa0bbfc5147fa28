use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::error::{ContentError, ContentResult};
use crate::models::{PostSummary, RawDocument, RawPage};
use crate::source::ContentSource;

#[derive(Clone, Default)]
pub(crate) struct FakeSource {
    first_pages: Arc<Mutex<HashMap<String, RawPage>>>,
    pages: Arc<Mutex<HashMap<String, RawPage>>>,
    documents: Arc<Mutex<HashMap<String, RawDocument>>>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn put_first_page(&self, document_type: &str, page: RawPage) {
        self.first_pages
            .lock()
            .expect("first_pages mutex poisoned")
            .insert(document_type.to_string(), page);
    }

    pub(crate) fn put_page(&self, cursor: &str, page: RawPage) {
        self.pages
            .lock()
            .expect("pages mutex poisoned")
            .insert(cursor.to_string(), page);
    }

    pub(crate) fn put_document(&self, doc: RawDocument) {
        let uid = doc.uid.clone().expect("fixture document must have uid");
        self.documents
            .lock()
            .expect("documents mutex poisoned")
            .insert(uid, doc);
    }

    pub(crate) fn fetched_cursors(&self) -> Vec<String> {
        self.fetched.lock().expect("fetched mutex poisoned").clone()
    }
}

#[async_trait]
impl ContentSource for FakeSource {
    async fn query_by_type(&self, document_type: &str, _page_size: u32) -> ContentResult<RawPage> {
        Ok(self
            .first_pages
            .lock()
            .expect("first_pages mutex poisoned")
            .get(document_type)
            .cloned()
            .unwrap_or_else(|| raw_page(&[], None)))
    }

    async fn get_by_uid(
        &self,
        _document_type: &str,
        uid: &str,
    ) -> ContentResult<Option<RawDocument>> {
        Ok(self
            .documents
            .lock()
            .expect("documents mutex poisoned")
            .get(uid)
            .cloned())
    }

    async fn fetch_page(&self, cursor: &str) -> ContentResult<RawPage> {
        self.fetched
            .lock()
            .expect("fetched mutex poisoned")
            .push(cursor.to_string());
        self.pages
            .lock()
            .expect("pages mutex poisoned")
            .get(cursor)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(cursor.to_string()))
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
            "subtitle": format!("Subtitle {uid}"),
            "author": "Author",
            "banner": { "url": format!("https://images.example.com/{uid}.png") },
            "content": [
                {
                    "heading": "Heading one",
                    "body": [{ "type": "paragraph", "text": "one two three", "spans": [] }]
                }
            ]
        }
    }))
    .expect("fixture must deserialize")
}

pub(crate) fn raw_page(uids: &[&str], next_page: Option<&str>) -> RawPage {
    RawPage {
        page: 1,
        total_pages: 1,
        total_results_size: uids.len() as u64,
        results: uids.iter().map(|uid| raw_document(uid)).collect(),
        next_page: next_page.map(str::to_string),
    }
}

pub(crate) fn summary(uid: &str) -> PostSummary {
    PostSummary::try_from(&raw_document(uid)).expect("fixture must project")
}
