//! Syntax highlighting behind a narrow trait.
//!
//! The pipeline treats the highlighter as a black box that may decline:
//! `None` means "leave the block unhighlighted", which is the required
//! behavior for unknown languages and for internal highlighter failures.
//! Highlighting must only add inline markup; the text content of the
//! produced HTML is always the input code, escaped.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Prefix applied to every generated highlight class, so the host page's
/// stylesheet can scope its theme.
pub const CSS_CLASS_PREFIX: &str = "folio-";

pub trait Highlighter: Send + Sync {
    /// Returns class-annotated HTML for `code`, or `None` when the
    /// language is unrecognized or highlighting fails.
    fn highlight(&self, language: &str, code: &str) -> Option<String>;
}

/// Syntect-backed highlighter using the bundled default syntaxes.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, language: &str, code: &str) -> Option<String> {
        let syntax = self.syntax_set.find_syntax_by_token(language)?;
        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed {
                prefix: CSS_CLASS_PREFIX,
            },
        );
        for line in LinesWithEndings::from(code) {
            if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::warn!(%err, language, "syntax highlighting failed, leaving block plain");
                return None;
            }
        }
        Some(generator.finalize())
    }
}

/// Highlighter that always declines. Useful for tests and for hosts that
/// highlight client-side.
pub struct NoopHighlighter;

impl Highlighter for NoopHighlighter {
    fn highlight(&self, _language: &str, _code: &str) -> Option<String> {
        None
    }
}
