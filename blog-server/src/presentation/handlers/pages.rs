use axum::{
    extract::{Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use tracing::warn;
use validator::Validate;

use crate::domain::page::DetailState;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::handlers::posts::NextPageQuery;
use crate::presentation::views::{home, post};

fn cache_control(revalidate_secs: u64) -> (HeaderName, String) {
    (
        header::CACHE_CONTROL,
        format!(
            "public, s-maxage={revalidate_secs}, stale-while-revalidate={revalidate_secs}"
        ),
    )
}

fn no_store() -> (HeaderName, HeaderValue) {
    (header::CACHE_CONTROL, HeaderValue::from_static("no-store"))
}

pub(crate) async fn home_page(State(state): State<AppState>) -> AppResult<Response> {
    let page = state.blog_service.listing().await?;
    let markup = home::render(&state.site_name, &page);

    Ok((
        [cache_control(state.revalidate_secs)],
        Html(markup.into_string()),
    )
        .into_response())
}

pub(crate) async fn post_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let detail = state.blog_service.detail(&slug)?;
    let html = Html(post::render(&state.site_name, &detail).into_string());

    let response = match detail {
        DetailState::Ready(_) => ([cache_control(state.revalidate_secs)], html).into_response(),
        DetailState::Generating => ([no_store()], html).into_response(),
        DetailState::NotFound => (
            StatusCode::NOT_FOUND,
            [cache_control(state.revalidate_secs)],
            html,
        )
            .into_response(),
    };
    Ok(response)
}

/// Фрагмент `<li>` для кнопки «Carregar mais posts». Курсор следующей
/// страницы уходит в заголовке [`home::NEXT_PAGE_HEADER`].
pub(crate) async fn posts_fragment(
    State(state): State<AppState>,
    Query(query): Query<NextPageQuery>,
) -> AppResult<Response> {
    query.validate()?;
    let page = state.blog_service.next_page(&query.cursor).await?;
    let html = Html(home::post_items(&page.results).into_string());

    let mut response = ([no_store()], html).into_response();
    if let Some(next) = page.next_page.as_deref() {
        match HeaderValue::from_str(next) {
            Ok(value) => {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static(home::NEXT_PAGE_HEADER), value);
            }
            Err(err) => warn!(error = %err, "next page cursor is not a valid header value"),
        }
    }
    Ok(response)
}
