use super::*;
use crate::language::{badge_colors, detect_language};

/// Highlighter double that wraps every block in a recognizable span.
struct MarkerHighlighter;

impl Highlighter for MarkerHighlighter {
    fn highlight(&self, _language: &str, code: &str) -> Option<String> {
        Some(format!(
            "<span class=\"hl\">{}</span>",
            html_escape::encode_text(code)
        ))
    }
}

fn enhancer() -> Enhancer {
    Enhancer::new(Box::new(NoopHighlighter))
}

fn code_fence(language: &str, body: &str) -> String {
    format!("<pre><code class=\"language-{language}\">{body}</code></pre>")
}

/// A block with exactly `n` non-blank lines.
fn lines(n: usize) -> String {
    (0..n)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn empty_input_is_a_noop() {
    let out = enhancer().enhance("", &ExpansionState::new());
    assert_eq!(out.html, "");
    assert!(out.blocks.is_empty());
}

#[test]
fn blank_input_is_a_noop() {
    let out = enhancer().enhance("   \n\t ", &ExpansionState::new());
    assert_eq!(out.html, "");
    assert!(out.blocks.is_empty());
}

#[test]
fn fragment_without_code_blocks_passes_through() {
    let fragment = "<p>Hello <strong>world</strong></p>";
    let out = enhancer().enhance(fragment, &ExpansionState::new());
    assert_eq!(out.html, fragment);
    assert!(out.blocks.is_empty());
}

#[test]
fn single_block_is_wrapped_with_header_and_controls() {
    let fragment = code_fence("rust", "fn main() {}");
    let out = enhancer().enhance(&fragment, &ExpansionState::new());

    assert_eq!(out.blocks.len(), 1);
    let block = &out.blocks[0];
    assert_eq!(block.index, 0);
    assert_eq!(block.language, "rust");
    assert_eq!(block.raw_text, "fn main() {}");
    assert!(!block.is_long);

    assert!(out.html.contains("code-block-enhanced"));
    assert!(out.html.contains("data-enhanced=\"true\""));
    assert!(out.html.contains("copy-code-btn"));
    assert!(out.html.contains("data-block-index=\"0\""));
    assert!(out.html.contains("<span>Rust</span>"));
    assert!(out.html.contains("1 lines"));
    // Short block: no expand control, no height cap.
    assert!(!out.html.contains("expand-code-btn"));
    assert!(!out.html.contains("max-height"));
}

#[test]
fn transform_is_idempotent_and_byte_identical() {
    let fragment = format!(
        "<p>intro</p>{}<p>middle</p>{}",
        code_fence("rust", "let a = 1;"),
        code_fence("python", &lines(80))
    );
    let expansion = ExpansionState::new();
    let once = enhancer().enhance(&fragment, &expansion);
    let twice = enhancer().enhance(&once.html, &expansion);

    assert_eq!(once.html, twice.html);
    // Already-wrapped blocks are recognized and skipped, not re-derived.
    assert!(twice.blocks.is_empty());
    assert_eq!(once.html.matches("code-block-enhanced").count(), 2);
}

#[test]
fn indices_are_assigned_in_document_order_and_stable() {
    let fragment = format!(
        "{}{}{}",
        code_fence("rust", "a"),
        code_fence("go", "b"),
        code_fence("css", "c")
    );
    let first = enhancer().enhance(&fragment, &ExpansionState::new());
    let second = enhancer().enhance(&fragment, &ExpansionState::new());

    assert_eq!(
        first.blocks.iter().map(|b| b.index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(first.blocks, second.blocks);
    assert_eq!(first.html, second.html);

    let order: Vec<_> = first.blocks.iter().map(|b| b.language.as_str()).collect();
    assert_eq!(order, vec!["rust", "go", "css"]);
}

#[test]
fn pre_without_code_is_not_a_block() {
    let fragment = format!(
        "<pre>plain preformatted</pre>{}",
        code_fence("rust", "fn f() {}")
    );
    let out = enhancer().enhance(&fragment, &ExpansionState::new());

    assert_eq!(out.blocks.len(), 1);
    assert_eq!(out.blocks[0].index, 0);
    assert_eq!(out.blocks[0].raw_text, "fn f() {}");
    // The bare pre survives untouched.
    assert!(out.html.contains("<pre>plain preformatted</pre>"));
}

#[test]
fn long_block_threshold_is_exclusive_at_70() {
    let at_threshold = enhancer().enhance(&code_fence("rust", &lines(70)), &ExpansionState::new());
    assert_eq!(at_threshold.blocks[0].line_count, 70);
    assert!(!at_threshold.blocks[0].is_long);
    assert!(!at_threshold.html.contains("expand-code-btn"));

    let over = enhancer().enhance(&code_fence("rust", &lines(71)), &ExpansionState::new());
    assert_eq!(over.blocks[0].line_count, 71);
    assert!(over.blocks[0].is_long);
    assert!(over.html.contains("expand-code-btn"));
    assert!(over.html.contains("data-index=\"0\""));
    assert!(over.html.contains("max-height: 500px"));
    assert!(over.html.contains("<span>Expand</span>"));
}

#[test]
fn blank_lines_do_not_count_toward_length() {
    let body = format!("{}\n\n\n{}", lines(30), lines(30));
    let out = enhancer().enhance(&code_fence("rust", &body), &ExpansionState::new());
    assert_eq!(out.blocks[0].line_count, 60);
}

#[test]
fn expansion_state_controls_clipping_and_label() {
    let fragment = code_fence("rust", &lines(100));
    let mut expansion = ExpansionState::new();

    let collapsed = enhancer().enhance(&fragment, &expansion);
    assert!(collapsed.html.contains("max-height: 500px"));
    assert!(collapsed.html.contains("<span>Expand</span>"));

    assert!(expansion.toggle(0));
    let expanded = enhancer().enhance(&fragment, &expansion);
    assert!(expanded.html.contains("max-height: none"));
    assert!(expanded.html.contains("<span>Collapse</span>"));
    assert!(!expanded.html.contains("max-height: 500px"));

    assert!(!expansion.toggle(0));
    let collapsed_again = enhancer().enhance(&fragment, &expansion);
    assert_eq!(collapsed.html, collapsed_again.html);
}

#[test]
fn raw_text_is_decoded_and_free_of_markup() {
    let fragment =
        "<pre><code class=\"language-rust\">let ok = a &amp;&amp; b; <span>// note</span></code></pre>";
    let out = enhancer().enhance(fragment, &ExpansionState::new());
    assert_eq!(out.blocks[0].raw_text, "let ok = a && b; // note");
}

#[test]
fn highlighter_markup_is_substituted_without_touching_raw_text() {
    let enhancer = Enhancer::new(Box::new(MarkerHighlighter));
    let fragment = code_fence("rust", "let x = 1;");
    let out = enhancer.enhance(&fragment, &ExpansionState::new());

    assert!(out.html.contains("<span class=\"hl\">let x = 1;</span>"));
    assert_eq!(out.blocks[0].raw_text, "let x = 1;");

    // Second pass leaves the highlighted markup alone.
    let again = enhancer.enhance(&out.html, &ExpansionState::new());
    assert_eq!(again.html, out.html);
}

#[test]
fn size_metrics_use_utf8_bytes() {
    let out = enhancer().enhance(&code_fence("rust", "héllo"), &ExpansionState::new());
    assert_eq!(out.blocks[0].size_bytes, "héllo".len());
    assert_eq!(out.blocks[0].size_kb(), "0.0");
}

#[test]
fn language_precedence_is_language_then_lang_then_hljs() {
    assert_eq!(
        detect_language(Some("hljs lang-python language-rust")),
        "rust"
    );
    assert_eq!(detect_language(Some("hljs lang-python")), "python");
    assert_eq!(detect_language(Some("hljs java")), "java");
    assert_eq!(detect_language(Some("LANGUAGE-Go")), "go");
    assert_eq!(detect_language(Some("highlighted")), "plaintext");
    assert_eq!(detect_language(None), "plaintext");
}

#[test]
fn unknown_language_gets_neutral_badge() {
    assert_eq!(badge_colors("zig"), badge_colors("plaintext"));
    assert_ne!(badge_colors("rust"), badge_colors("plaintext"));
}

#[test]
fn display_language_is_capitalized() {
    let out = enhancer().enhance(&code_fence("typescript", "x"), &ExpansionState::new());
    assert_eq!(out.blocks[0].display_language(), "Typescript");
}

#[test]
fn syntect_highlighter_declines_unknown_language() {
    let highlighter = SyntectHighlighter::new();
    assert!(highlighter.highlight("notalanguage", "x = 1").is_none());
}

#[test]
fn syntect_highlighter_preserves_text_content() {
    let highlighter = SyntectHighlighter::new();
    let markup = highlighter
        .highlight("rs", "let x = 1;\n")
        .expect("rust is a bundled syntax");
    assert!(markup.contains("folio-"));
    // Stripping tags recovers the original text.
    let stripped: String = strip_tags(&markup);
    assert_eq!(
        html_escape::decode_html_entities(&stripped),
        "let x = 1;\n"
    );
}

fn strip_tags(markup: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
