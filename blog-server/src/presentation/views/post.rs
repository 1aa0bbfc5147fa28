use blog_content::PostDetail;
use maud::{Markup, html};

use super::{layout, rich_text};
use crate::domain::page::DetailState;

pub(crate) fn render(site_name: &str, state: &DetailState) -> Markup {
    match state {
        DetailState::Generating => generating(site_name),
        DetailState::NotFound => not_found(site_name),
        DetailState::Ready(post) => ready(site_name, post),
    }
}

// Страница сама перезагружается, пока пост генерируется в фоне.
fn generating(site_name: &str) -> Markup {
    let head = html! { meta http-equiv="refresh" content="1"; };
    let body = html! {
        main.content-container {
            p.loading { "Carregando..." }
        }
    };
    layout::page(site_name, "Carregando...", head, body)
}

fn not_found(site_name: &str) -> Markup {
    let body = html! {
        main.content-container {
            h1 { "Post não encontrado" }
            a href="/" { "Voltar para a página inicial" }
        }
    };
    layout::page(site_name, "Post não encontrado", html! {}, body)
}

fn ready(site_name: &str, post: &PostDetail) -> Markup {
    let body = html! {
        div.banner {
            img src=(post.banner.url) alt=(post.title);
        }
        main.content-container {
            h1 { (post.title) }
            section.post-meta {
                div {
                    time datetime=[post.first_publication_date.map(|d| d.to_rfc3339())] {
                        (post.display_date())
                    }
                }
                div { (post.author) }
                div { (post.reading_time()) " min" }
            }
            @for section in &post.content {
                article.content {
                    h3 { (section.heading) }
                    div.post-content {
                        (rich_text::render(&section.body))
                    }
                }
            }
        }
    };
    layout::page(site_name, &post.title, html! {}, body)
}
