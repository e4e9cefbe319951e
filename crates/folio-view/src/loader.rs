//! Memoized, load-once acquisition of the diagram engine.
//!
//! The engine is an expensive external import. The loader owns a single
//! in-process handle with an explicit lifecycle: the first caller runs
//! the provided load future, concurrent callers await that same
//! in-flight load, and every later call gets the cached handle. A failed
//! load is not cached, so the next trigger retries.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::diagram::DiagramError;

pub struct EngineLoader<E> {
    cell: OnceCell<Arc<E>>,
}

impl<E> EngineLoader<E> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Returns the engine handle, running `load` at most once across all
    /// concurrent callers.
    pub async fn ensure_loaded<F, Fut>(&self, load: F) -> Result<Arc<E>, DiagramError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<E, DiagramError>>,
    {
        self.cell
            .get_or_try_init(|| async move { load().await.map(Arc::new) })
            .await
            .map(Arc::clone)
    }

    /// The cached handle, if a load already completed.
    pub fn get(&self) -> Option<Arc<E>> {
        self.cell.get().map(Arc::clone)
    }
}

impl<E> Default for EngineLoader<E> {
    fn default() -> Self {
        Self::new()
    }
}
