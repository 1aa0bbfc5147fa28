pub(crate) mod blog_service;
pub(crate) mod page_cache;
