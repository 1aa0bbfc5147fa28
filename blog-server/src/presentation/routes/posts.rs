use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{get_post, list_posts, list_slugs, next_posts};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/next", get(next_posts))
        .route("/posts/{slug}", get(get_post))
        .route("/slugs", get(list_slugs))
}
