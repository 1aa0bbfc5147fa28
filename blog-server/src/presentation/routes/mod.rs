use axum::Router;

use super::AppState;

pub(crate) mod pages;
pub(crate) mod posts;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .nest("/api", posts::router())
}
