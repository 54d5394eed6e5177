//! Markdown rendering for message and answer bodies.
//!
//! DESIGN
//! ======
//! Raw HTML in the source is dropped before rendering, so message content can
//! be injected with `inner_html`. Links open in a new tab without an opener,
//! and only http, https and mailto schemes (or relative targets) keep their
//! destination; anything else points at `#`. Top-level fenced code blocks that name a
//! language are split out as separate segments so the bubble can render them
//! with a copy button.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

/// One renderable piece of a message body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Rendered HTML for everything between code blocks.
    Html(String),
    /// A fenced code block with its language tag and raw text.
    Code { language: String, code: String },
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

fn is_raw_html(event: &Event<'_>) -> bool {
    matches!(event, Event::Html(_) | Event::InlineHtml(_))
}

/// Link destination kept as-is when its scheme is allowed.
fn safe_href(dest: &str) -> Option<&str> {
    let dest = dest.trim();
    match dest.find([':', '/', '?', '#']) {
        Some(i) if dest[i..].starts_with(':') => {
            let scheme = dest[..i].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto").then_some(dest)
        }
        _ => Some(dest),
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Replace link tags with anchors carrying a vetted href plus
/// `target="_blank" rel="noopener noreferrer"`. Must run after raw HTML
/// filtering since the anchors are emitted as inline HTML.
fn rewrite_link(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::Link { dest_url, title, .. }) => {
            let href = safe_href(&dest_url).map_or_else(|| "#".to_owned(), escape_attr);
            let mut anchor = format!(r#"<a href="{href}" target="_blank" rel="noopener noreferrer""#);
            if !title.is_empty() {
                anchor.push_str(&format!(r#" title="{}""#, escape_attr(&title)));
            }
            anchor.push('>');
            Event::InlineHtml(anchor.into())
        }
        Event::End(TagEnd::Link) => Event::InlineHtml("</a>".into()),
        other => other,
    }
}

fn sanitized_events(markdown: &str) -> impl Iterator<Item = Event<'_>> {
    Parser::new_ext(markdown, options())
        .filter(|event| !is_raw_html(event))
        .map(rewrite_link)
}

/// Render markdown to HTML with raw HTML removed and links sanitized.
pub fn render_markdown_html(markdown: &str) -> String {
    let parser = sanitized_events(markdown);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// First word of a fenced block's info string, if any.
fn fence_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split_whitespace()
            .next()
            .map(str::to_owned),
        CodeBlockKind::Indented => None,
    }
}

fn flush_html(pending: &mut Vec<Event<'_>>, segments: &mut Vec<Segment>) {
    if pending.is_empty() {
        return;
    }
    let mut out = String::new();
    html::push_html(&mut out, pending.drain(..));
    segments.push(Segment::Html(out));
}

/// Split markdown into HTML runs and top-level fenced code blocks.
///
/// Code blocks without a language, or nested inside lists and quotes, stay
/// part of the surrounding HTML.
pub fn split_segments(markdown: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pending: Vec<Event<'_>> = Vec::new();
    let mut code: Option<(String, String)> = None;
    let mut depth = 0_usize;

    for event in sanitized_events(markdown) {
        if let Some((_, text)) = code.as_mut() {
            match event {
                Event::Text(t) => text.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((language, code)) = code.take() {
                        segments.push(Segment::Code { language, code });
                    }
                }
                _ => {}
            }
            continue;
        }
        match &event {
            Event::Start(Tag::CodeBlock(kind)) if depth == 0 => {
                if let Some(language) = fence_language(kind) {
                    flush_html(&mut pending, &mut segments);
                    code = Some((language, String::new()));
                    continue;
                }
                depth += 1;
            }
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
        pending.push(event);
    }
    flush_html(&mut pending, &mut segments);
    segments
}

/// Text placed on the clipboard for a code block; `None` when blank.
pub fn copy_text(code: &str) -> Option<String> {
    let trimmed = code.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Class applied to a code element, e.g. `language-rust`.
pub fn language_class(language: &str) -> String {
    format!("language-{language}")
}
