//! Отрисовка rich text из content API в HTML.

use std::collections::BTreeSet;

use blog_content::{RichTextBlock, Span};
use maud::{Markup, html};
use serde_json::Value;

enum Group<'a> {
    Block(&'a RichTextBlock),
    List {
        ordered: bool,
        items: Vec<&'a RichTextBlock>,
    },
}

pub(crate) fn render(blocks: &[RichTextBlock]) -> Markup {
    html! {
        @for group in group_lists(blocks) {
            @match group {
                Group::Block(block) => (render_block(block)),
                Group::List { ordered: true, items } => ol {
                    @for item in items { li { (render_text(item)) } }
                },
                Group::List { ordered: false, items } => ul {
                    @for item in items { li { (render_text(item)) } }
                },
            }
        }
    }
}

fn list_kind(block: &RichTextBlock) -> Option<bool> {
    match block.kind.as_str() {
        "list-item" => Some(false),
        "o-list-item" => Some(true),
        _ => None,
    }
}

fn group_lists(blocks: &[RichTextBlock]) -> Vec<Group<'_>> {
    let mut groups = Vec::new();
    for block in blocks {
        let Some(ordered) = list_kind(block) else {
            groups.push(Group::Block(block));
            continue;
        };
        if let Some(Group::List {
            ordered: current,
            items,
        }) = groups.last_mut()
        {
            if *current == ordered {
                items.push(block);
                continue;
            }
        }
        groups.push(Group::List {
            ordered,
            items: vec![block],
        });
    }
    groups
}

fn render_block(block: &RichTextBlock) -> Markup {
    match block.kind.as_str() {
        "heading1" => html! { h1 { (render_text(block)) } },
        "heading2" => html! { h2 { (render_text(block)) } },
        "heading3" => html! { h3 { (render_text(block)) } },
        "heading4" => html! { h4 { (render_text(block)) } },
        "heading5" => html! { h5 { (render_text(block)) } },
        "heading6" => html! { h6 { (render_text(block)) } },
        "preformatted" => html! { pre { (block.text.as_deref().unwrap_or_default()) } },
        "image" => render_image(block),
        "embed" => render_embed(block),
        _ => html! { p { (render_text(block)) } },
    }
}

fn render_image(block: &RichTextBlock) -> Markup {
    let Some(url) = string_field(block.extra.get("url")).filter(|url| is_safe_url(url)) else {
        return html! {};
    };
    let alt = string_field(block.extra.get("alt")).unwrap_or_default();

    html! {
        p.block-img { img src=(url) alt=(alt); }
    }
}

fn render_embed(block: &RichTextBlock) -> Markup {
    let oembed = block.extra.get("oembed");
    let embed_url = string_field(oembed.and_then(|o| o.get("embed_url")));
    let Some(url) = embed_url.filter(|url| is_safe_url(url)) else {
        return html! {};
    };
    let title = string_field(oembed.and_then(|o| o.get("title"))).unwrap_or(url);

    html! {
        div.embed data-oembed=(url) { a href=(url) rel="noopener noreferrer" { (title) } }
    }
}

fn render_text(block: &RichTextBlock) -> Markup {
    let text = block.text.as_deref().unwrap_or_default();
    if text.is_empty() {
        return html! {};
    }

    let ranges: Vec<(usize, usize, &Span)> = block
        .spans
        .iter()
        .map(|span| {
            (
                byte_offset(text, span.start),
                byte_offset(text, span.end),
                span,
            )
        })
        .filter(|(start, end, _)| start < end)
        .collect();

    let mut boundaries = BTreeSet::from([0, text.len()]);
    for (start, end, _) in &ranges {
        boundaries.insert(*start);
        boundaries.insert(*end);
    }
    let boundaries: Vec<usize> = boundaries.into_iter().collect();

    let segments = boundaries.windows(2).map(|window| {
        let (from, to) = (window[0], window[1]);
        let active: Vec<&Span> = ranges
            .iter()
            .filter(|(start, end, _)| *start <= from && *end >= to)
            .map(|(_, _, span)| *span)
            .collect();
        (active, &text[from..to])
    });

    html! {
        @for (active, segment) in segments {
            (wrap(&active, segment))
        }
    }
}

fn wrap(spans: &[&Span], text: &str) -> Markup {
    let Some((span, rest)) = spans.split_first() else {
        return render_lines(text);
    };
    let inner = wrap(rest, text);

    match span.kind.as_str() {
        "strong" => html! { strong { (inner) } },
        "em" => html! { em { (inner) } },
        "hyperlink" => match resolve_link(span.data.as_ref()) {
            Some(Link::Internal(path)) => html! { a href=(path) { (inner) } },
            Some(Link::External { url, target }) => html! {
                a href=(url) target=[target] rel="noopener noreferrer" { (inner) }
            },
            None => inner,
        },
        "label" => {
            let label = string_field(span.data.as_ref().and_then(|d| d.get("label")));
            html! { span class=[label] { (inner) } }
        }
        _ => inner,
    }
}

fn render_lines(text: &str) -> Markup {
    html! {
        @for (index, line) in text.split('\n').enumerate() {
            @if index > 0 { br; }
            (line)
        }
    }
}

enum Link<'a> {
    Internal(String),
    External {
        url: &'a str,
        target: Option<&'a str>,
    },
}

fn resolve_link(data: Option<&Value>) -> Option<Link<'_>> {
    let data = data?;
    match string_field(data.get("link_type")) {
        Some("Document") => {
            let uid = string_field(data.get("uid"))?;
            Some(Link::Internal(format!("/post/{uid}")))
        }
        _ => {
            let url = string_field(data.get("url")).filter(|url| is_safe_url(url))?;
            Some(Link::External {
                url,
                target: string_field(data.get("target")),
            })
        }
    }
}

fn string_field(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

fn is_safe_url(url: &str) -> bool {
    ["https://", "http://", "mailto:"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

/// Переводит смещение в UTF-16 единицах в байтовое смещение строки.
fn byte_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, ch) in text.char_indices() {
        if units >= utf16_offset {
            return index;
        }
        units += ch.len_utf16();
    }
    text.len()
}
