//! Markup synthesis for one enhanced code block.
//!
//! The synthesized wrapper is a pure function of `(CodeBlock, expanded)`:
//! given the same block and the same expansion membership it produces the
//! same bytes, which is what makes the whole transform idempotent and
//! repeatable. The wrapper carries `data-enhanced="true"` so a later scan
//! recognizes and skips blocks that were already processed.

use crate::EnhanceOptions;
use crate::block::CodeBlock;
use crate::language::badge_colors;

/// Class on the outer wrapper; the delegated click handler resolves
/// controls against it.
pub const WRAPPER_CLASS: &str = "code-block-enhanced";
/// Idempotence marker attribute on the wrapper.
pub const ENHANCED_ATTR: &str = "data-enhanced";
/// Class of the copy control, matched by the interaction dispatcher.
pub const COPY_BUTTON_CLASS: &str = "copy-code-btn";
/// Class of the expand/collapse control.
pub const EXPAND_BUTTON_CLASS: &str = "expand-code-btn";

/// Style applied to the original `<pre>` once it lives inside the
/// wrapper's scroll container.
pub const PRE_STYLE: &str = "margin: 0; border-radius: 0; border: none;";

/// Closes the scroll container and the wrapper opened by [`wrapper_open`].
pub const WRAPPER_CLOSE: &str = "</div></div>";

const BADGE_ICON: &str = r#"<svg width="14" height="14" fill="currentColor" viewBox="0 0 20 20"><path d="M3 4a1 1 0 011-1h12a1 1 0 011 1v2a1 1 0 01-1 1H4a1 1 0 01-1-1V4zM3 10a1 1 0 011-1h6a1 1 0 011 1v6a1 1 0 01-1 1H4a1 1 0 01-1-1v-6zM14 9a1 1 0 00-1 1v6a1 1 0 001 1h2a1 1 0 001-1v-6a1 1 0 00-1-1h-2z"/></svg>"#;

const COPY_ICON: &str = r#"<svg width="16" height="16" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M8 16H6a2 2 0 01-2-2V6a2 2 0 012-2h8a2 2 0 012 2v2m-6 12h8a2 2 0 002-2v-8a2 2 0 00-2-2h-8a2 2 0 00-2 2v8a2 2 0 002 2z"/></svg>"#;

const CHEVRON_UP: &str = r#"<svg width="16" height="16" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 15l7-7 7 7"/></svg>"#;

const CHEVRON_DOWN: &str = r#"<svg width="16" height="16" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 9l-7 7-7-7"/></svg>"#;

const BUTTON_STYLE: &str = "display: flex; align-items: center; gap: 0.5rem; padding: 0.375rem 0.75rem; border-radius: 6px; font-size: 0.75rem; font-weight: 500; background: transparent; color: #4b5563; border: none; cursor: pointer;";

/// Everything that precedes the original `<pre>` in the enhanced block:
/// the wrapper, the header row, and the opening of the scroll container.
pub fn wrapper_open(block: &CodeBlock, expanded: bool, options: &EnhanceOptions) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(&format!(
        r#"<div class="{WRAPPER_CLASS}" {ENHANCED_ATTR}="true" style="position: relative; margin: 1.5rem 0; border-radius: 12px; overflow: hidden; border: 1px solid #e5e7eb; background: white;">"#,
    ));
    out.push_str(&header(block, expanded));
    out.push_str(&container_open(block, expanded, options));
    out
}

fn header(block: &CodeBlock, expanded: bool) -> String {
    let mut out = String::with_capacity(1536);
    out.push_str(
        r#"<div class="code-block-header" style="display: flex; justify-content: space-between; align-items: center; padding: 0.75rem 1rem; background: #f9fafb; border-bottom: 1px solid #e5e7eb;">"#,
    );

    // Left side: badge plus metrics.
    out.push_str(r#"<div style="display: flex; align-items: center; gap: 0.75rem;">"#);
    out.push_str(&language_badge(block));
    out.push_str(&meta_line(block));
    out.push_str("</div>");

    // Right side: controls.
    out.push_str(r#"<div style="display: flex; align-items: center; gap: 0.5rem;">"#);
    out.push_str(&copy_button(block.index));
    if block.is_long {
        out.push_str(&expand_button(block.index, expanded));
    }
    out.push_str("</div>");

    out.push_str("</div>");
    out
}

fn language_badge(block: &CodeBlock) -> String {
    let colors = badge_colors(&block.language);
    let display = block.display_language();
    format!(
        r#"<div style="display: inline-flex; align-items: center; gap: 0.5rem; padding: 0.25rem 0.75rem; border-radius: 6px; font-size: 0.75rem; font-weight: 600; font-family: Monaco, Menlo, monospace; background: {bg}; color: {text}; border: 1px solid {border};">{BADGE_ICON}<span>{name}</span></div>"#,
        bg = colors.bg,
        text = colors.text,
        border = colors.border,
        name = html_escape::encode_text(&display),
    )
}

fn meta_line(block: &CodeBlock) -> String {
    format!(
        r#"<div style="font-size: 0.75rem; color: #6b7280; font-family: Monaco, Menlo, monospace; display: flex; align-items: center; gap: 0.5rem;"><span>{lines} lines</span><span style="color: #d1d5db;">&#8226;</span><span>{kb} KB</span></div>"#,
        lines = block.line_count,
        kb = block.size_kb(),
    )
}

fn copy_button(index: usize) -> String {
    format!(
        r#"<button class="{COPY_BUTTON_CLASS}" data-block-index="{index}" aria-label="Copy code" style="{BUTTON_STYLE}">{COPY_ICON}<span>Copy</span></button>"#,
    )
}

fn expand_button(index: usize, expanded: bool) -> String {
    let (icon, label) = if expanded {
        (CHEVRON_DOWN, "Collapse")
    } else {
        (CHEVRON_UP, "Expand")
    };
    format!(
        r#"<button class="{EXPAND_BUTTON_CLASS}" data-index="{index}" aria-label="{label} code" style="{BUTTON_STYLE}">{icon}<span>{label}</span></button>"#,
    )
}

fn container_open(block: &CodeBlock, expanded: bool, options: &EnhanceOptions) -> String {
    let style = if block.is_long && !expanded {
        format!(
            "max-height: {}px; overflow-y: auto; position: relative;",
            options.clip_height_px
        )
    } else if block.is_long {
        "max-height: none; overflow-y: visible; position: relative;".to_string()
    } else {
        "position: relative;".to_string()
    };
    format!(r#"<div class="code-container" style="{style}">"#)
}
