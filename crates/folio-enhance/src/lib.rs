//! folio-enhance
//!
//! Client-side content enhancement for server-delivered rich-text HTML.
//! Given a fragment containing `<pre><code class="language-x">` fences,
//! the [`Enhancer`] produces a new fragment where every code block is
//! wrapped with a header row (language badge, line/size metrics, copy
//! control, and an expand/collapse control for long blocks) and a scroll
//! container, with syntax-highlighting spans substituted into the code
//! element.
//!
//! The transform is a pure function of `(fragment, ExpansionState)`: it
//! never touches a live document, produces byte-identical output for
//! identical inputs, and running it on its own output changes nothing.
//! The presentation shell commits the returned string and correlates
//! clicks on the injected controls back to [`CodeBlock`] indices.

pub mod block;
pub mod error;
pub mod highlight;
pub mod language;
mod scanner;
pub mod synth;

#[cfg(test)]
mod tests;

pub use block::{CodeBlock, ExpansionState};
pub use error::EnhanceError;
pub use highlight::{Highlighter, NoopHighlighter, SyntectHighlighter};

use scanner::RenderPlan;

/// Tunables for the transform. The defaults match the product behavior:
/// blocks longer than 70 non-blank lines are collapsible and clip at
/// 500px until expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhanceOptions {
    /// Blocks with more non-blank lines than this get an expand control.
    pub long_block_threshold: usize,
    /// Height cap, in pixels, of a collapsed long block's container.
    pub clip_height_px: u32,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            long_block_threshold: 70,
            clip_height_px: 500,
        }
    }
}

/// Result of one transform pass: the enhanced fragment plus the code
/// blocks it found, in document order. The block list is what the
/// interaction dispatcher copies from and toggles against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOutput {
    pub html: String,
    pub blocks: Vec<CodeBlock>,
}

/// The transform orchestrator. Owns the highlighter and options; every
/// call to [`enhance`](Self::enhance) is an independent pass.
pub struct Enhancer {
    highlighter: Box<dyn Highlighter>,
    options: EnhanceOptions,
}

impl Enhancer {
    pub fn new(highlighter: Box<dyn Highlighter>) -> Self {
        Self::with_options(highlighter, EnhanceOptions::default())
    }

    pub fn with_options(highlighter: Box<dyn Highlighter>, options: EnhanceOptions) -> Self {
        Self {
            highlighter,
            options,
        }
    }

    pub fn options(&self) -> &EnhanceOptions {
        &self.options
    }

    /// Runs the full pipeline for one fragment. Never fails: an empty or
    /// blank fragment yields an empty result, and a fragment the
    /// rewriter cannot process at all is returned unenhanced so the page
    /// still shows the original content.
    pub fn enhance(&self, fragment: &str, expansion: &ExpansionState) -> TransformOutput {
        if fragment.trim().is_empty() {
            return TransformOutput::default();
        }
        match self.try_enhance(fragment, expansion) {
            Ok(output) => output,
            Err(err) => {
                tracing::error!(%err, "content enhancement failed, serving original fragment");
                TransformOutput {
                    html: fragment.to_string(),
                    blocks: Vec::new(),
                }
            }
        }
    }

    /// Fallible variant of [`enhance`](Self::enhance) for callers that
    /// want to observe rewrite failures instead of falling back.
    pub fn try_enhance(
        &self,
        fragment: &str,
        expansion: &ExpansionState,
    ) -> Result<TransformOutput, EnhanceError> {
        let scanned = scanner::scan(fragment)?;

        let mut blocks = Vec::new();
        let mut pre_to_block = vec![None; scanned.len()];
        for (ordinal, pre) in scanned.iter().enumerate() {
            if !pre.has_code {
                continue;
            }
            let raw_text = html_escape::decode_html_entities(&pre.text).into_owned();
            let line_count = language::non_blank_lines(&raw_text);
            let index = blocks.len();
            pre_to_block[ordinal] = Some(index);
            blocks.push(CodeBlock {
                index,
                language: language::detect_language(pre.class_attr.as_deref()),
                line_count,
                size_bytes: raw_text.len(),
                is_long: line_count > self.options.long_block_threshold,
                raw_text,
            });
        }

        if blocks.is_empty() {
            // Nothing to enhance; hand the fragment back untouched.
            return Ok(TransformOutput {
                html: fragment.to_string(),
                blocks,
            });
        }

        let highlighted: Vec<Option<String>> = blocks
            .iter()
            .map(|block| self.highlighter.highlight(&block.language, &block.raw_text))
            .collect();

        let html = scanner::render(
            fragment,
            &RenderPlan {
                blocks: &blocks,
                pre_to_block: &pre_to_block,
                highlighted: &highlighted,
                expansion,
                options: &self.options,
            },
        )?;

        Ok(TransformOutput { html, blocks })
    }
}
