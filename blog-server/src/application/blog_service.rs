use std::sync::Arc;
use std::time::Duration;

use blog_content::{ContentClient, ContentSource, PostDetail, PostPage};
use tracing::{debug, info, warn};

use crate::application::page_cache::{Lookup, PageCache};
use crate::domain::error::DomainError;
use crate::domain::page::{DetailState, normalize_slug};

pub(crate) type SharedSource = Arc<dyn ContentSource>;

const LISTING_KEY: &str = "/";

pub(crate) struct BlogService {
    client: ContentClient<SharedSource>,
    listing_page_size: u32,
    listing: PageCache<PostPage>,
    details: PageCache<Option<Arc<PostDetail>>>,
}

impl BlogService {
    pub(crate) fn new(
        source: SharedSource,
        listing_page_size: u32,
        revalidate: Duration,
        detail_capacity: usize,
    ) -> Self {
        Self {
            client: ContentClient::new(source),
            listing_page_size,
            listing: PageCache::new(revalidate),
            details: PageCache::with_capacity(revalidate, detail_capacity),
        }
    }

    /// Генерирует список и все известные детальные страницы.
    ///
    /// Ошибка отдельного поста не прерывает генерацию: такая страница
    /// будет сгенерирована по первому запросу.
    pub(crate) async fn prerender(&self) -> Result<usize, DomainError> {
        self.generate_listing().await?;

        let slugs = self.client.post_slugs().await?;
        let mut generated = 0;
        for slug in &slugs {
            match self.generate_detail(slug).await {
                Ok(_) => generated += 1,
                Err(err) => warn!(%slug, error = %err, "failed to prerender post"),
            }
        }

        info!(generated, known = slugs.len(), "prerender finished");
        Ok(generated)
    }

    /// Первая страница списка. Первый запрос генерирует её синхронно,
    /// дальше отдаётся кэш с фоновой перегенерацией.
    pub(crate) async fn listing(self: &Arc<Self>) -> Result<Arc<PostPage>, DomainError> {
        match self.listing.lookup(LISTING_KEY) {
            Lookup::Cached { value, revalidate } => {
                if revalidate {
                    self.spawn_listing_regeneration();
                }
                Ok(value)
            }
            Lookup::Claimed => self.generate_listing().await,
            Lookup::Generating | Lookup::Full => Ok(Arc::new(
                self.client.list_posts(self.listing_page_size).await?,
            )),
        }
    }

    /// Состояние детальной страницы. Неизвестный slug ставится на фоновую
    /// генерацию, а вызывающий получает [`DetailState::Generating`].
    ///
    /// Устаревший «не найден» не перегенерируется, а вытесняется из кэша.
    /// Если кэш заполнен и вытеснять нечего, новый slug отклоняется.
    pub(crate) fn detail(self: &Arc<Self>, raw_slug: &str) -> Result<DetailState, DomainError> {
        let slug = normalize_slug(raw_slug)?;

        let mut lookup = self.details.lookup(&slug);
        if matches!(lookup, Lookup::Full) {
            let evicted = self.details.evict_stale(Option::is_none);
            debug!(evicted, "stale not-found pages evicted");
            if evicted > 0 {
                lookup = self.details.lookup(&slug);
            }
        }

        let state = match lookup {
            Lookup::Cached {
                value,
                revalidate: true,
            } if value.is_none() => {
                self.details.remove(&slug);
                DetailState::NotFound
            }
            Lookup::Cached { value, revalidate } => {
                if revalidate {
                    self.spawn_detail_generation(slug);
                }
                match value.as_ref() {
                    Some(post) => DetailState::Ready(Arc::clone(post)),
                    None => DetailState::NotFound,
                }
            }
            Lookup::Generating => DetailState::Generating,
            Lookup::Claimed => {
                self.spawn_detail_generation(slug);
                DetailState::Generating
            }
            Lookup::Full => {
                warn!(%slug, "detail cache is full, refusing to generate");
                return Err(DomainError::CacheFull);
            }
        };
        Ok(state)
    }

    /// Следующая страница списка по курсору, мимо кэша.
    pub(crate) async fn next_page(&self, cursor: &str) -> Result<PostPage, DomainError> {
        Ok(self.client.next_page(cursor).await?)
    }

    pub(crate) async fn known_slugs(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.client.post_slugs().await?)
    }

    /// Число сгенерированных страниц: список и найденные посты.
    pub(crate) fn generated_pages(&self) -> usize {
        self.listing.count_ready(|_| true) + self.details.count_ready(Option::is_some)
    }

    async fn generate_listing(&self) -> Result<Arc<PostPage>, DomainError> {
        match self.client.list_posts(self.listing_page_size).await {
            Ok(page) => Ok(self.listing.store(LISTING_KEY, page)),
            Err(err) => {
                self.listing.abandon(LISTING_KEY);
                Err(err.into())
            }
        }
    }

    async fn generate_detail(&self, slug: &str) -> Result<bool, DomainError> {
        match self.client.get_post(slug).await {
            Ok(post) => {
                let found = post.is_some();
                self.details.store(slug, post.map(Arc::new));
                Ok(found)
            }
            Err(err) => {
                self.details.abandon(slug);
                Err(err.into())
            }
        }
    }

    fn spawn_listing_regeneration(self: &Arc<Self>) {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            match service.generate_listing().await {
                Ok(page) => info!(posts = page.results.len(), "listing regenerated"),
                Err(err) => warn!(error = %err, "listing regeneration failed, keeping stale page"),
            }
        });
    }

    fn spawn_detail_generation(self: &Arc<Self>, slug: String) {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            match service.generate_detail(&slug).await {
                Ok(true) => info!(%slug, "post generated"),
                Ok(false) => info!(%slug, "post not found"),
                Err(err) => warn!(%slug, error = %err, "post generation failed"),
            }
        });
    }
}
