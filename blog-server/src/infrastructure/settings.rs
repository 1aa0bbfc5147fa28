use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub content_api_endpoint: String,
    pub content_access_token: Option<String>,
    pub content_timeout_secs: u64,
    pub http_addr: String,
    pub site_name: String,
    pub revalidate_secs: u64,
    pub listing_page_size: u32,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub detail_cache_capacity: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let content_api_endpoint =
            get_required(&get, "CONTENT_API_ENDPOINT").context("CONTENT_API_ENDPOINT is required")?;
        if !content_api_endpoint.starts_with("http://")
            && !content_api_endpoint.starts_with("https://")
        {
            return Err(anyhow!("CONTENT_API_ENDPOINT must be an http(s) URL"));
        }

        let content_access_token = get("CONTENT_ACCESS_TOKEN")
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        let content_timeout_secs = parse_u64(&get, "CONTENT_TIMEOUT_SECS", 15)?;

        let http_addr = get("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let site_name = get("SITE_NAME").unwrap_or_else(|| "Charter III".to_string());
        let revalidate_secs = parse_u64(&get, "REVALIDATE_SECS", 1800)?;
        let listing_page_size = u32::try_from(parse_usize(&get, "LISTING_PAGE_SIZE", 1)?)
            .context("LISTING_PAGE_SIZE is too large")?;
        let cors_origins = parse_cors_origins(
            get("CORS_ORIGINS").unwrap_or_else(|| "http://localhost:3000".to_string()),
        );
        let log_level = get("LOG_LEVEL")
            .or_else(|| get("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize(&get, "HTTP_REQUEST_BODY_LIMIT_BYTES", 64 * 1024)?;
        let http_concurrency_limit = parse_usize(&get, "HTTP_CONCURRENCY_LIMIT", 256)?;
        let detail_cache_capacity = parse_usize(&get, "DETAIL_CACHE_CAPACITY", 10_000)?;

        Ok(Self {
            content_api_endpoint,
            content_access_token,
            content_timeout_secs,
            http_addr,
            site_name,
            revalidate_secs,
            listing_page_size,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            detail_cache_capacity,
        })
    }
}

fn get_required(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = get(key).ok_or_else(|| anyhow!("{key} is not set"))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_usize(get: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> Result<usize> {
    let value = get(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64(get: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64> {
    let value = get(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
