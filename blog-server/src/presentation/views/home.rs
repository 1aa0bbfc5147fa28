use blog_content::{PostPage, PostSummary};
use maud::{Markup, PreEscaped, html};

use super::layout;

/// Заголовок ответа с курсором следующей страницы для фрагмента списка.
pub(crate) const NEXT_PAGE_HEADER: &str = "x-next-page";

// Кнопка блокируется до завершения запроса, чтобы не было двух загрузок
// с одним курсором.
const LOAD_MORE_SCRIPT: &str = r#"
(() => {
  const button = document.getElementById('load-more');
  const list = document.getElementById('posts');
  const error = document.getElementById('load-more-error');
  button.addEventListener('click', async () => {
    if (button.disabled) return;
    button.disabled = true;
    error.hidden = true;
    try {
      const cursor = encodeURIComponent(button.dataset.cursor);
      const response = await fetch('/fragments/posts?cursor=' + cursor);
      if (!response.ok) throw new Error('http ' + response.status);
      list.insertAdjacentHTML('beforeend', await response.text());
      const next = response.headers.get('x-next-page');
      if (next) {
        button.dataset.cursor = next;
        button.disabled = false;
      } else {
        button.remove();
      }
    } catch (_) {
      error.hidden = false;
      button.disabled = false;
    }
  });
})();
"#;

pub(crate) fn render(site_name: &str, page: &PostPage) -> Markup {
    let body = html! {
        main.content-container {
            ul #posts {
                (post_items(&page.results))
            }
            @if let Some(cursor) = &page.next_page {
                button #load-more .button type="button" data-cursor=(cursor) {
                    "Carregar mais posts"
                }
                p #load-more-error .error hidden {
                    "Não foi possível carregar mais posts. Tente novamente."
                }
                script { (PreEscaped(LOAD_MORE_SCRIPT)) }
            }
        }
    };

    layout::page(site_name, "Desafio", html! {}, body)
}

/// Элементы списка постов; используется и страницей, и фрагментом догрузки.
pub(crate) fn post_items(posts: &[PostSummary]) -> Markup {
    html! {
        @for post in posts {
            li {
                a href=(format!("/post/{}", post.uid)) {
                    section.post-container {
                        h1 { (post.title) }
                        p { (post.subtitle) }
                        section.post-meta {
                            div {
                                time datetime=[post.first_publication_date.map(|d| d.to_rfc3339())] {
                                    (post.display_date())
                                }
                            }
                            div { (post.author) }
                        }
                    }
                }
            }
        }
    }
}
