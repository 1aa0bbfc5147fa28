use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blog_content::{ContentSection, PostDetail, PostPage, PostSummary, RichTextBlock};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::page::DetailState;
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct NextPageQuery {
    /// Абсолютный URL следующей страницы из поля `next_page`.
    #[validate(url)]
    pub(crate) cursor: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostSummaryDto {
    pub(crate) uid: String,
    pub(crate) first_publication_date: Option<DateTime<Utc>>,
    /// Дата в формате страницы, например `25 mar 2021`.
    pub(crate) display_date: String,
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) author: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostsPaginationDto {
    pub(crate) results: Vec<PostSummaryDto>,
    pub(crate) next_page: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListingPropsDto {
    #[serde(rename = "postsPagination")]
    pub(crate) posts_pagination: PostsPaginationDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ContentSectionDto {
    pub(crate) heading: String,
    #[schema(value_type = Vec<Object>)]
    pub(crate) body: Vec<RichTextBlock>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDetailDto {
    pub(crate) uid: String,
    pub(crate) first_publication_date: Option<DateTime<Utc>>,
    pub(crate) display_date: String,
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) author: String,
    pub(crate) banner_url: String,
    pub(crate) reading_time_minutes: usize,
    pub(crate) content: Vec<ContentSectionDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostPropsDto {
    pub(crate) post: PostDetailDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct GeneratingDto {
    pub(crate) status: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SlugsDto {
    pub(crate) slugs: Vec<String>,
}

impl From<&PostSummary> for PostSummaryDto {
    fn from(post: &PostSummary) -> Self {
        Self {
            uid: post.uid.clone(),
            first_publication_date: post.first_publication_date,
            display_date: post.display_date(),
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author: post.author.clone(),
        }
    }
}

impl From<&PostPage> for PostsPaginationDto {
    fn from(page: &PostPage) -> Self {
        Self {
            results: page.results.iter().map(PostSummaryDto::from).collect(),
            next_page: page.next_page.clone(),
        }
    }
}

impl From<&ContentSection> for ContentSectionDto {
    fn from(section: &ContentSection) -> Self {
        Self {
            heading: section.heading.clone(),
            body: section.body.clone(),
        }
    }
}

impl From<&PostDetail> for PostDetailDto {
    fn from(post: &PostDetail) -> Self {
        Self {
            uid: post.uid.clone(),
            first_publication_date: post.first_publication_date,
            display_date: post.display_date(),
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author: post.author.clone(),
            banner_url: post.banner.url.clone(),
            reading_time_minutes: post.reading_time(),
            content: post.content.iter().map(ContentSectionDto::from).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "First listing page", body = ListingPropsDto),
        (status = 502, description = "Content API error")
    )
)]
pub(crate) async fn list_posts(State(state): State<AppState>) -> AppResult<Json<ListingPropsDto>> {
    let page = state.blog_service.listing().await?;

    Ok(Json(ListingPropsDto {
        posts_pagination: PostsPaginationDto::from(page.as_ref()),
    }))
}

#[utoipa::path(
    get,
    path = "/api/posts/next",
    tag = "posts",
    params(NextPageQuery),
    responses(
        (status = 200, description = "Next page by cursor", body = PostsPaginationDto),
        (status = 400, description = "Invalid cursor"),
        (status = 502, description = "Content API error")
    )
)]
pub(crate) async fn next_posts(
    State(state): State<AppState>,
    Query(query): Query<NextPageQuery>,
) -> AppResult<Json<PostsPaginationDto>> {
    query.validate()?;
    let page = state.blog_service.next_page(&query.cursor).await?;

    Ok(Json(PostsPaginationDto::from(&page)))
}

#[utoipa::path(
    get,
    path = "/api/posts/{slug}",
    tag = "posts",
    params(
        ("slug" = String, Path, description = "Post uid")
    ),
    responses(
        (status = 200, description = "Post found", body = PostPropsDto),
        (status = 202, description = "Post is being generated", body = GeneratingDto),
        (status = 400, description = "Invalid slug"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    match state.blog_service.detail(&slug)? {
        DetailState::Ready(post) => Ok(Json(PostPropsDto {
            post: PostDetailDto::from(post.as_ref()),
        })
        .into_response()),
        DetailState::Generating => Ok((
            StatusCode::ACCEPTED,
            Json(GeneratingDto {
                status: "generating",
            }),
        )
            .into_response()),
        DetailState::NotFound => Err(AppError::NotFound),
    }
}

#[utoipa::path(
    get,
    path = "/api/slugs",
    tag = "posts",
    responses(
        (status = 200, description = "Slugs of all posts", body = SlugsDto),
        (status = 502, description = "Content API error")
    )
)]
pub(crate) async fn list_slugs(State(state): State<AppState>) -> AppResult<Json<SlugsDto>> {
    let slugs = state.blog_service.known_slugs().await?;

    Ok(Json(SlugsDto { slugs }))
}
