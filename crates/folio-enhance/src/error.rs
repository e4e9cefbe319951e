//! Error types for the enhancement pipeline.
//!
//! Nothing here reaches the presentation shell in normal operation: the
//! public [`Enhancer::enhance`](crate::Enhancer::enhance) entry point
//! falls back to the unenhanced fragment on failure. The fallible
//! `try_enhance` variant exposes these for callers that want to observe
//! the failure instead.

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum EnhanceError {
    /// The rewriter could not process the fragment at all (pathological
    /// input, selector engine failure). The fallback is to serve the
    /// original fragment unchanged.
    #[error("html rewrite failed: {0}")]
    #[diagnostic(code(folio::enhance::rewrite))]
    Rewrite(String),
}
