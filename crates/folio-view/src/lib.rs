//! folio-view
//!
//! Presentation-side collaborators around the `folio-enhance` pipeline:
//! the document shapes delivered by the data gateway, the delegated
//! interpretation of clicks on injected code block controls, the
//! deferred diagram rendering that runs once enhanced markup is
//! committed, and the view lifecycle tying those together.

pub mod diagram;
pub mod dispatch;
pub mod document;
pub mod loader;
pub mod view;


pub use diagram::{DiagramEngine, DiagramError, DiagramOrchestrator, RenderReport, SlotHost};
pub use dispatch::{
    Clipboard, ClipboardError, ControlKind, InteractionDispatcher, Reaction, classify_control,
};
pub use document::{Author, DiagramKind, DiagramSpec, PostDocument, ProjectDocument};
pub use loader::EngineLoader;
pub use view::{ContentHost, DocumentView, ListenerGuard};
