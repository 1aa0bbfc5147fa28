use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::pages::{home_page, post_page, posts_fragment};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/post/{slug}", get(post_page))
        .route("/fragments/posts", get(posts_fragment))
}
