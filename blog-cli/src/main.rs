use std::env;
use std::process;

use anyhow::{Result, anyhow};
use blog_content::{
    ContentClient, ContentError, HttpClient, LoadMore, PaginationState, PostDetail, PostSummary,
    RichTextBlock,
};
use clap::{Parser, Subcommand};

const ENDPOINT_ENV: &str = "CONTENT_API_ENDPOINT";
const ACCESS_TOKEN_ENV: &str = "CONTENT_ACCESS_TOKEN";

#[derive(Debug, Parser)]
#[command(name = "blog-cli", version, about = "CLI для чтения блога из content API")]
struct Cli {
    /// Адрес content API (по умолчанию из CONTENT_API_ENDPOINT).
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Токен доступа (по умолчанию из CONTENT_ACCESS_TOKEN).
    #[arg(long, global = true)]
    access_token: Option<String>,

    /// Печатать ответ в JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Первая страница списка постов.
    List {
        #[arg(long, default_value_t = blog_content::DEFAULT_LISTING_PAGE_SIZE)]
        page_size: u32,
        /// Догрузить все страницы по курсору.
        #[arg(long)]
        all: bool,
    },
    /// Пост по slug.
    Show {
        #[arg(long)]
        slug: String,
    },
    /// Все slug постов.
    Slugs,
    /// Страница по курсору `next_page`.
    Next {
        #[arg(long)]
        cursor: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let endpoint = resolve_endpoint(cli.endpoint, env::var(ENDPOINT_ENV).ok())?;
    let access_token = cli
        .access_token
        .or_else(|| env::var(ACCESS_TOKEN_ENV).ok());
    let client = ContentClient::http(endpoint, access_token).map_err(map_content_error)?;

    match cli.command {
        Command::List { page_size, all } => {
            let page = client
                .list_posts(page_size)
                .await
                .map_err(map_content_error)?;
            let mut state = PaginationState::new(page);
            if all {
                load_all(&mut state, client.source()).await?;
            }
            if cli.json {
                print_json(&serde_json::json!({
                    "results": state.items(),
                    "next_page": state.cursor(),
                }))?;
            } else {
                print_list(state.items(), state.cursor());
            }
        }
        Command::Show { slug } => {
            let post = client
                .get_post(&slug)
                .await
                .map_err(map_content_error)?
                .ok_or_else(|| anyhow!("пост не найден: {slug}"))?;
            if cli.json {
                print_json(&post)?;
            } else {
                print_post(&post);
            }
        }
        Command::Slugs => {
            let slugs = client.post_slugs().await.map_err(map_content_error)?;
            if cli.json {
                print_json(&slugs)?;
            } else {
                for slug in &slugs {
                    println!("{slug}");
                }
            }
        }
        Command::Next { cursor } => {
            let page = client.next_page(&cursor).await.map_err(map_content_error)?;
            if cli.json {
                print_json(&page)?;
            } else {
                print_list(&page.results, page.next_page.as_deref());
            }
        }
    }

    Ok(())
}

async fn load_all(state: &mut PaginationState, source: &HttpClient) -> Result<()> {
    loop {
        match state.load_more(source).await.map_err(map_content_error)? {
            LoadMore::Appended(_) => continue,
            LoadMore::Exhausted | LoadMore::InFlight => return Ok(()),
        }
    }
}

fn resolve_endpoint(flag: Option<String>, env_value: Option<String>) -> Result<String> {
    flag.or(env_value)
        .map(|endpoint| endpoint.trim().to_string())
        .filter(|endpoint| !endpoint.is_empty())
        .ok_or_else(|| anyhow!("не задан адрес content API: укажите --endpoint или {ENDPOINT_ENV}"))
}

fn map_content_error(err: ContentError) -> anyhow::Error {
    let message = match err {
        ContentError::NotFound(what) => format!("не найдено: {what}"),
        ContentError::Status { status, message } => {
            format!("content API ответил {status}: {message}")
        }
        ContentError::Http(err) => format!("ошибка HTTP: {err}"),
        ContentError::InvalidCursor(cursor) => format!("некорректный курсор: {cursor}"),
        ContentError::MissingMasterRef => "content API не вернул master ref".to_string(),
        ContentError::MissingField(field) => format!("в документе нет поля `{field}`"),
        ContentError::InvalidDate { value, .. } => format!("некорректная дата публикации: {value}"),
        ContentError::Decode(err) => format!("некорректный ответ content API: {err}"),
    };
    anyhow!(message)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_list(posts: &[PostSummary], next_page: Option<&str>) {
    println!("Постов: {}", posts.len());
    for post in posts {
        println!(
            "- [{}] {} | {} | {}",
            post.uid,
            post.title,
            post.display_date(),
            post.author
        );
    }
    if let Some(cursor) = next_page {
        println!("next: {cursor}");
    }
}

fn print_post(post: &PostDetail) {
    println!("{}", post.title);
    println!("{}", post.subtitle);
    println!(
        "{} | {} | {} min",
        post.display_date(),
        post.author,
        post.reading_time()
    );
    println!("banner: {}", post.banner.url);
    for section in &post.content {
        println!();
        println!("## {}", section.heading);
        for line in plain_text(&section.body) {
            println!("{line}");
        }
    }
}

fn plain_text(blocks: &[RichTextBlock]) -> impl Iterator<Item = &str> {
    blocks.iter().filter_map(|block| block.text.as_deref())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn endpoint_flag_wins_over_env() {
        let endpoint = resolve_endpoint(
            Some("https://flag.cdn.prismic.io/api/v2".to_string()),
            Some("https://env.cdn.prismic.io/api/v2".to_string()),
        )
        .unwrap();
        assert_eq!(endpoint, "https://flag.cdn.prismic.io/api/v2");
    }

    #[test]
    fn endpoint_falls_back_to_env() {
        let endpoint =
            resolve_endpoint(None, Some(" https://env.cdn.prismic.io/api/v2 ".to_string())).unwrap();
        assert_eq!(endpoint, "https://env.cdn.prismic.io/api/v2");
    }

    #[test]
    fn missing_endpoint_is_error() {
        assert!(resolve_endpoint(None, None).is_err());
        assert!(resolve_endpoint(Some("  ".to_string()), None).is_err());
    }

    #[test]
    fn content_errors_become_readable_messages() {
        let err = map_content_error(ContentError::InvalidCursor("x".to_string()));
        assert_eq!(err.to_string(), "некорректный курсор: x");

        let err = map_content_error(ContentError::MissingField("uid"));
        assert_eq!(err.to_string(), "в документе нет поля `uid`");
    }

    #[test]
    fn plain_text_skips_blocks_without_text() {
        let blocks: Vec<RichTextBlock> = serde_json::from_value(json!([
            { "type": "paragraph", "text": "first", "spans": [] },
            { "type": "image", "url": "https://images.example.com/a.png" },
            { "type": "paragraph", "text": "second", "spans": [] }
        ]))
        .unwrap();

        let lines: Vec<&str> = plain_text(&blocks).collect();
        assert_eq!(lines, ["first", "second"]);
    }

    #[test]
    fn cli_parses_list_with_all() {
        let cli = Cli::parse_from(["blog-cli", "list", "--page-size", "5", "--all"]);
        match cli.command {
            Command::List { page_size, all } => {
                assert_eq!(page_size, 5);
                assert!(all);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
