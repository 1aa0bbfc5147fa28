use std::sync::Arc;

use crate::application::blog_service::BlogService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;
pub(crate) mod views;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) blog_service: Arc<BlogService>,
    pub(crate) site_name: Arc<str>,
    pub(crate) revalidate_secs: u64,
}

impl AppState {
    pub(crate) fn new(blog_service: Arc<BlogService>, site_name: &str, revalidate_secs: u64) -> Self {
        Self {
            blog_service,
            site_name: Arc::from(site_name),
            revalidate_secs,
        }
    }
}
