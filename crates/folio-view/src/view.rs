//! Document view lifecycle: transform, commit, interact, re-render.
//!
//! The view recomputes the pure transform whenever either of its inputs
//! changes (new content from the gateway, or an expansion toggle),
//! commits the result to the host, and only then attempts diagram
//! rendering, since the named slots exist only in committed markup.
//! Listener registration follows scoped acquisition: whoever registers
//! the delegated listener holds a [`ListenerGuard`], and dropping the
//! view (or the guard) unregisters it.

use std::fmt;
use std::sync::Arc;

use folio_enhance::{Enhancer, ExpansionState, TransformOutput};

use crate::diagram::{DiagramEngine, DiagramOrchestrator, RenderReport, SlotHost};
use crate::dispatch::{Clipboard, ControlKind, InteractionDispatcher, Reaction};
use crate::document::DiagramSpec;

/// The presentation shell, reduced to what the view needs: committing a
/// fragment and addressing diagram slots inside the committed markup.
pub trait ContentHost: SlotHost {
    fn commit(&mut self, html: &str);
}

/// RAII handle for the delegated event listener. Dropping it runs the
/// unregister action exactly once.
pub struct ListenerGuard {
    unregister: Option<Box<dyn FnOnce() + Send>>,
}

impl ListenerGuard {
    pub fn new(unregister: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unregister: Some(Box::new(unregister)),
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("armed", &self.unregister.is_some())
            .finish()
    }
}

/// One mounted document view. Owns the only [`ExpansionState`] for its
/// lifetime; the state starts empty and dies with the view.
pub struct DocumentView<H, C, E> {
    host: H,
    enhancer: Enhancer,
    dispatcher: InteractionDispatcher<C>,
    engine: Arc<E>,
    orchestrator: DiagramOrchestrator,
    content: Option<String>,
    diagrams: Vec<DiagramSpec>,
    expansion: ExpansionState,
    last: TransformOutput,
    listener: Option<ListenerGuard>,
}

impl<H, C, E> DocumentView<H, C, E>
where
    H: ContentHost,
    C: Clipboard,
    E: DiagramEngine,
{
    pub fn new(host: H, enhancer: Enhancer, clipboard: C, engine: Arc<E>) -> Self {
        Self {
            host,
            enhancer,
            dispatcher: InteractionDispatcher::new(clipboard),
            engine,
            orchestrator: DiagramOrchestrator::new(),
            content: None,
            diagrams: Vec::new(),
            expansion: ExpansionState::new(),
            last: TransformOutput::default(),
            listener: None,
        }
    }

    /// Installs the delegated listener guard for this view's lifetime.
    pub fn mount(&mut self, listener: ListenerGuard) {
        self.listener = Some(listener);
    }

    /// New rich-text content arrived from the gateway; re-run the
    /// transform and commit.
    pub async fn set_content(&mut self, content: Option<String>) {
        self.content = content;
        self.refresh().await;
    }

    /// The document's diagram set changed; attempt a render pass against
    /// the already-committed markup.
    pub async fn set_diagrams(&mut self, diagrams: Vec<DiagramSpec>) -> RenderReport {
        self.diagrams = diagrams;
        self.render_diagrams().await
    }

    /// One full pass: transform, commit, then diagrams.
    pub async fn refresh(&mut self) {
        let fragment = self.content.as_deref().unwrap_or("");
        self.last = self.enhancer.enhance(fragment, &self.expansion);
        self.host.commit(&self.last.html);
        self.render_diagrams().await;
    }

    async fn render_diagrams(&mut self) -> RenderReport {
        let engine = Arc::clone(&self.engine);
        self.orchestrator
            .render_all(engine.as_ref(), &mut self.host, &self.diagrams)
            .await
    }

    /// Dispatches a delegated click. A toggle re-runs the transform with
    /// the new expansion state before returning.
    pub async fn handle_click(&mut self, kind: ControlKind, index: usize) -> Reaction {
        let reaction = self
            .dispatcher
            .handle_click(kind, index, &self.last.blocks, &mut self.expansion)
            .await;
        if matches!(reaction, Reaction::Toggled { .. }) {
            self.refresh().await;
        }
        reaction
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn last_output(&self) -> &TransformOutput {
        &self.last
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
