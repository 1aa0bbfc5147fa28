use utoipa::OpenApi;

use crate::presentation::handlers::posts::{
    ContentSectionDto, GeneratingDto, ListingPropsDto, NextPageQuery, PostDetailDto, PostPropsDto,
    PostSummaryDto, PostsPaginationDto, SlugsDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::next_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::list_slugs
    ),
    components(
        schemas(
            NextPageQuery,
            PostSummaryDto,
            PostsPaginationDto,
            ListingPropsDto,
            ContentSectionDto,
            PostDetailDto,
            PostPropsDto,
            GeneratingDto,
            SlugsDto
        )
    ),
    tags(
        (name = "posts", description = "Blog posts from the content API")
    )
)]
pub(crate) struct ApiDoc;
