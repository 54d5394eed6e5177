use super::*;

// =============================================================
// render_markdown_html
// =============================================================

#[test]
fn renders_basic_markdown() {
    let html = render_markdown_html("**bold** and ~~gone~~");
    assert!(html.contains("<strong>bold</strong>"));
    assert!(html.contains("<del>gone</del>"));
}

#[test]
fn renders_tables_and_task_lists() {
    let html = render_markdown_html("| a | b |\n|---|---|\n| 1 | 2 |\n\n- [x] done\n");
    assert!(html.contains("<table>"));
    assert!(html.contains("checkbox"));
}

#[test]
fn drops_raw_html() {
    let html = render_markdown_html("hi <script>alert(1)</script>\n\n<div>block</div>\n");
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<div>"));
    assert!(html.contains("hi"));
}

#[test]
fn script_scheme_links_lose_their_destination() {
    let html = render_markdown_html("[click](javascript:alert(1)) and [again](JavaScript:void(0))");
    assert!(!html.to_ascii_lowercase().contains("javascript"));
    assert!(html.contains(r##"<a href="#" target="_blank" rel="noopener noreferrer">click</a>"##));
}

#[test]
fn web_links_open_in_new_tab_without_opener() {
    let html = render_markdown_html(r#"[site](https://example.com/a?b=1&c=2 "Docs")"#);
    assert!(html.contains(
        r#"<a href="https://example.com/a?b=1&amp;c=2" target="_blank" rel="noopener noreferrer" title="Docs">site</a>"#
    ));
}

#[test]
fn relative_and_mail_links_are_kept() {
    let html = render_markdown_html("[thread](/chat/5) [mail](mailto:a@b.c)");
    assert!(html.contains(r#"href="/chat/5""#));
    assert!(html.contains(r#"href="mailto:a@b.c""#));
}

// =============================================================
// split_segments
// =============================================================

#[test]
fn plain_text_is_one_html_segment() {
    let segments = split_segments("Just words.");
    assert_eq!(segments, vec![Segment::Html("<p>Just words.</p>\n".to_owned())]);
}

#[test]
fn links_in_split_segments_are_sanitized() {
    let segments = split_segments("[x](data:text/html,boom)\n\n```sh\nls\n```\n");
    let Segment::Html(html) = &segments[0] else {
        panic!("expected html segment first");
    };
    assert!(html.contains(r##"<a href="#" target="_blank" rel="noopener noreferrer">x</a>"##));
    assert!(!html.contains("data:"));
    assert_eq!(segments.len(), 2);
}

#[test]
fn fenced_block_with_language_is_split_out() {
    let segments = split_segments("Before\n\n```rust\nfn main() {}\n```\n\nAfter");
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0], Segment::Html("<p>Before</p>\n".to_owned()));
    assert_eq!(
        segments[1],
        Segment::Code { language: "rust".to_owned(), code: "fn main() {}\n".to_owned() }
    );
    assert_eq!(segments[2], Segment::Html("<p>After</p>\n".to_owned()));
}

#[test]
fn info_string_uses_first_word() {
    let segments = split_segments("```python title=x\nprint(1)\n```");
    assert_eq!(
        segments,
        vec![Segment::Code { language: "python".to_owned(), code: "print(1)\n".to_owned() }]
    );
}

#[test]
fn fence_without_language_stays_html() {
    let segments = split_segments("```\nplain\n```");
    assert_eq!(segments.len(), 1);
    let Segment::Html(html) = &segments[0] else {
        panic!("expected html segment");
    };
    assert!(html.contains("<pre><code>plain"));
}

#[test]
fn nested_code_block_stays_html() {
    let segments = split_segments("- item\n\n  ```sh\n  ls\n  ```\n");
    assert_eq!(segments.len(), 1);
    assert!(matches!(&segments[0], Segment::Html(html) if html.contains("language-sh")));
}

#[test]
fn adjacent_code_blocks_produce_no_empty_html() {
    let segments = split_segments("```a\n1\n```\n```b\n2\n```\n");
    assert_eq!(segments.len(), 2);
    assert!(segments.iter().all(|s| matches!(s, Segment::Code { .. })));
}

// =============================================================
// Copy helpers
// =============================================================

#[test]
fn copy_text_trims_and_rejects_blank() {
    assert_eq!(copy_text("  let x = 1;\n"), Some("let x = 1;".to_owned()));
    assert_eq!(copy_text(" \n\t"), None);
}

#[test]
fn language_class_prefixes_language() {
    assert_eq!(language_class("rust"), "language-rust");
}
