use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use blog_content::HttpClient;
use tracing::{info, warn};

mod application;
mod domain;
mod infrastructure;
mod presentation;
mod server;

#[cfg(test)]
mod testing;

use application::blog_service::BlogService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let source = HttpClient::with_timeout(
        settings.content_api_endpoint.clone(),
        settings.content_access_token.clone(),
        Duration::from_secs(settings.content_timeout_secs),
    )?;
    let blog_service = Arc::new(BlogService::new(
        Arc::new(source),
        settings.listing_page_size,
        Duration::from_secs(settings.revalidate_secs),
        settings.detail_cache_capacity,
    ));

    // Без content API сервер всё равно стартует: страницы догенерируются по запросам.
    match blog_service.prerender().await {
        Ok(posts) => info!(posts, "pages prerendered"),
        Err(err) => warn!(error = %err, "prerender failed, pages will be generated on demand"),
    }

    let state = AppState::new(blog_service, &settings.site_name, settings.revalidate_secs);
    server::run_http(&settings, state).await
}
