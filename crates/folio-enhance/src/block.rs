//! Code block description and interactive expansion state.

use std::collections::BTreeSet;

/// One `<pre><code>` block found during a transform pass.
///
/// Blocks are ephemeral: a new set is derived on every pass. The `index`
/// is the block's position among code blocks in document order and is the
/// correlation key between the rendered controls (`data-index` /
/// `data-block-index` attributes) and [`ExpansionState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// 0-based position among code blocks in document order.
    pub index: usize,
    /// The block's literal text content, entity-decoded, free of any
    /// markup injected by highlighting or a previous pass. This is what
    /// the copy control puts on the clipboard.
    pub raw_text: String,
    /// Detected language tag, `"plaintext"` when nothing matched.
    pub language: String,
    /// Number of non-blank lines in `raw_text`.
    pub line_count: usize,
    /// UTF-8 byte length of `raw_text`.
    pub size_bytes: usize,
    /// Whether the block gets a collapse/expand control at all.
    pub is_long: bool,
}

impl CodeBlock {
    /// Language tag with the first character capitalized, for the badge.
    pub fn display_language(&self) -> String {
        let mut chars = self.language.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Size formatted to one decimal, in kilobytes.
    pub fn size_kb(&self) -> String {
        format!("{:.1}", self.size_bytes as f64 / 1024.0)
    }
}

/// The set of code block indices currently displayed fully expanded.
///
/// Created empty for every document view, mutated only by the
/// expand/collapse control, and dropped when the view unmounts. The
/// transform is a pure function of `(fragment, ExpansionState)`, so the
/// same state always reproduces the same output.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: BTreeSet<usize>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Toggles membership of `index`, returning `true` if the block is
    /// now expanded.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.expanded.remove(&index) {
            false
        } else {
            self.expanded.insert(index);
            true
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }
}
