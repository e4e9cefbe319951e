//! Delegated interpretation of clicks on injected code block controls.
//!
//! The shell binds one click listener to a stable ancestor of the
//! committed fragment (the enhanced subtree is replaced wholesale on
//! every transform, so per-button binding would leak). When a click
//! resolves to one of the injected controls, the shell classifies it by
//! class token and hands `(kind, index)` to the dispatcher here.

use std::time::Duration;

use async_trait::async_trait;
use folio_enhance::{CodeBlock, ExpansionState, synth};

/// Failure of the host clipboard capability. Copy failures are logged
/// and never fatal to the page.
#[derive(thiserror::Error, Debug, miette::Diagnostic)]
#[error("clipboard write failed: {reason}")]
#[diagnostic(code(folio::view::clipboard))]
pub struct ClipboardError {
    pub reason: String,
}

impl ClipboardError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The host clipboard capability: an async, fire-and-forget write.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The two control types injected into every enhanced block header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Copy,
    Expand,
}

/// Classifies a clicked element's class attribute against the stable
/// control class names. Returns `None` for anything that is not an
/// injected control.
pub fn classify_control(class_attr: &str) -> Option<ControlKind> {
    for token in class_attr.split_whitespace() {
        if token == synth::COPY_BUTTON_CLASS {
            return Some(ControlKind::Copy);
        }
        if token == synth::EXPAND_BUTTON_CLASS {
            return Some(ControlKind::Expand);
        }
    }
    None
}

/// What the shell should do after a dispatched click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Clipboard write succeeded; show the "copied" affordance on the
    /// control and revert it after `revert_after`.
    Copied { index: usize, revert_after: Duration },
    /// Clipboard write failed; the control stays in its pre-click state.
    CopyFailed { index: usize },
    /// Expansion membership flipped; the caller re-runs the transform
    /// with the new state and re-commits.
    Toggled { index: usize, expanded: bool },
    /// The click did not target a live control (stale index, short
    /// block). Nothing to do.
    Ignored,
}

/// Interprets control clicks against the blocks of the last transform
/// pass. The dispatcher is the single writer of [`ExpansionState`].
pub struct InteractionDispatcher<C> {
    clipboard: C,
    copied_feedback: Duration,
}

impl<C: Clipboard> InteractionDispatcher<C> {
    pub fn new(clipboard: C) -> Self {
        Self {
            clipboard,
            copied_feedback: Duration::from_secs(2),
        }
    }

    pub fn with_feedback(clipboard: C, copied_feedback: Duration) -> Self {
        Self {
            clipboard,
            copied_feedback,
        }
    }

    pub async fn handle_click(
        &self,
        kind: ControlKind,
        index: usize,
        blocks: &[CodeBlock],
        expansion: &mut ExpansionState,
    ) -> Reaction {
        match kind {
            ControlKind::Copy => {
                let Some(block) = blocks.iter().find(|b| b.index == index) else {
                    tracing::warn!(index, "copy control targets an unknown code block");
                    return Reaction::Ignored;
                };
                match self.clipboard.write_text(&block.raw_text).await {
                    Ok(()) => Reaction::Copied {
                        index,
                        revert_after: self.copied_feedback,
                    },
                    Err(err) => {
                        tracing::warn!(%err, index, "clipboard write failed");
                        Reaction::CopyFailed { index }
                    }
                }
            }
            ControlKind::Expand => {
                let is_long = blocks.iter().any(|b| b.index == index && b.is_long);
                if !is_long {
                    tracing::debug!(index, "expand control targets an unknown or short block");
                    return Reaction::Ignored;
                }
                let expanded = expansion.toggle(index);
                Reaction::Toggled { index, expanded }
            }
        }
    }
}
