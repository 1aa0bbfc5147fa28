use blog_content::{ContentClient, LoadMore, PaginationState};

fn client() -> ContentClient<blog_content::HttpClient> {
    let endpoint = std::env::var("CONTENT_API_ENDPOINT")
        .expect("CONTENT_API_ENDPOINT must point to a content api repository");
    let token = std::env::var("CONTENT_ACCESS_TOKEN").ok();
    ContentClient::http(endpoint, token).expect("client must build")
}

#[tokio::test]
#[ignore = "requires reachable content api with published posts"]
async fn listing_and_detail_smoke_flow() {
    let client = client();

    let first = client.list_posts(1).await.expect("list_posts must succeed");
    assert!(first.results.len() <= 1);

    let mut state = PaginationState::new(first);
    while state.has_more() {
        match state
            .load_more(client.source())
            .await
            .expect("load_more must succeed")
        {
            LoadMore::Appended(_) => {}
            LoadMore::Exhausted | LoadMore::InFlight => break,
        }
    }

    let slugs = client.post_slugs().await.expect("post_slugs must succeed");
    assert_eq!(slugs.len(), state.items().len());

    if let Some(summary) = state.items().first() {
        let post = client
            .get_post(&summary.uid)
            .await
            .expect("get_post must succeed")
            .expect("listed post must exist");
        assert_eq!(post.uid, summary.uid);
        assert_eq!(post.title, summary.title);
    }

    let missing = client
        .get_post("definitely-not-an-existing-slug")
        .await
        .expect("lookup must succeed");
    assert!(missing.is_none());
}
