use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLES: &str = r#"
body { margin: 0; font-family: Inter, sans-serif; background: #1a1d23; color: #bbbbbb; }
a { color: inherit; text-decoration: none; }
.header { max-width: 720px; margin: 0 auto; padding: 4rem 1rem 0; font-weight: 700; color: #f8f8f8; }
.content-container { max-width: 720px; margin: 0 auto; padding: 2rem 1rem 4rem; }
.content-container ul#posts { list-style: none; padding: 0; }
.post-container h1 { color: #f8f8f8; font-size: 1.75rem; }
.post-meta { display: flex; gap: 1.5rem; font-size: 0.875rem; }
.banner img { width: 100%; max-height: 400px; object-fit: cover; }
.content h3 { color: #f8f8f8; font-size: 2.25rem; }
.button { border: 0; background: none; color: #ff57b2; font-weight: 600; font-size: 1.125rem; cursor: pointer; }
.button:disabled { opacity: 0.5; cursor: wait; }
.error { color: #ff6b6b; }
"#;

/// Общий каркас страницы: заголовок вкладки, шапка со ссылкой на список.
pub(crate) fn page(site_name: &str, title: &str, head: Markup, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (site_name) }
                style { (PreEscaped(STYLES)) }
                (head)
            }
            body {
                header.header {
                    a href="/" { (site_name) }
                }
                (body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use maud::html;

    use super::page;

    #[test]
    fn title_combines_page_and_site() {
        let html = page("Charter III", "Posts", html! {}, html! { p { "body" } }).into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Posts | Charter III</title>"));
        assert!(html.contains(r#"<a href="/">Charter III</a>"#));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn title_is_escaped() {
        let html = page("Site", "<b>", html! {}, html! {}).into_string();
        assert!(html.contains("<title>&lt;b&gt; | Site</title>"));
    }
}
