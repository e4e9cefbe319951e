//! Diagram rendering orchestration.
//!
//! Diagrams only render after the enhanced fragment is committed: the
//! named slots do not exist before that. A missing slot is "not yet
//! ready", skipped for the pass and retried on the next trigger. A
//! failing diagram gets an inline error placeholder in its slot and the
//! batch continues; one bad diagram never aborts the rest.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::document::{DiagramKind, DiagramSpec};

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum DiagramError {
    #[error("diagram engine is not ready")]
    #[diagnostic(code(folio::view::diagram::not_ready))]
    NotReady,
    #[error("diagram engine failed to load: {0}")]
    #[diagnostic(code(folio::view::diagram::load))]
    Load(String),
    #[error("diagram render failed: {0}")]
    #[diagnostic(code(folio::view::diagram::render))]
    Render(String),
}

/// The external diagram rendering engine (loaded lazily, see
/// [`EngineLoader`](crate::loader::EngineLoader)).
#[async_trait]
pub trait DiagramEngine: Send + Sync {
    /// Whether the engine finished loading and may be asked to render.
    fn is_ready(&self) -> bool;
    /// Renders `source` under a unique element id, returning the
    /// produced markup.
    async fn render(&self, element_id: &str, source: &str) -> Result<String, DiagramError>;
}

/// The committed document, reduced to the slot operations the
/// orchestrator needs.
pub trait SlotHost {
    fn has_slot(&self, slot_id: &str) -> bool;
    fn fill_slot(&mut self, slot_id: &str, markup: &str);
}

/// Outcome of one render pass, by diagram name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub rendered: Vec<String>,
    pub failed: Vec<String>,
    pub skipped: Vec<String>,
}

/// Renders mermaid-kind diagrams sequentially into their slots.
///
/// Sequential rendering keeps error attribution per-diagram unambiguous;
/// the `in_flight` set additionally refuses to start a render for a slot
/// that already has one outstanding.
#[derive(Debug, Default)]
pub struct DiagramOrchestrator {
    in_flight: HashSet<String>,
    render_seq: u64,
}

impl DiagramOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn render_all<E, H>(
        &mut self,
        engine: &E,
        host: &mut H,
        specs: &[DiagramSpec],
    ) -> RenderReport
    where
        E: DiagramEngine,
        H: SlotHost,
    {
        let mut report = RenderReport::default();
        let mermaid = specs.iter().filter(|s| s.kind == DiagramKind::Mermaid);

        if !engine.is_ready() {
            tracing::debug!("diagram engine not ready, deferring render pass");
            report.skipped = mermaid.map(|s| s.name.clone()).collect();
            return report;
        }

        for spec in mermaid {
            let slot = spec.slot_id();
            if !host.has_slot(&slot) {
                tracing::debug!(slot = %slot, "diagram slot not committed yet, will retry");
                report.skipped.push(spec.name.clone());
                continue;
            }
            if !self.in_flight.insert(slot.clone()) {
                tracing::debug!(slot = %slot, "render already outstanding for slot");
                report.skipped.push(spec.name.clone());
                continue;
            }
            self.render_seq += 1;
            let render_id = format!("{slot}-r{}", self.render_seq);
            let outcome = engine.render(&render_id, &spec.content).await;
            self.in_flight.remove(&slot);

            match outcome {
                Ok(markup) => {
                    host.fill_slot(&slot, &markup);
                    report.rendered.push(spec.name.clone());
                }
                Err(err) => {
                    tracing::error!(%err, diagram = %spec.name, "diagram render failed");
                    host.fill_slot(&slot, &error_placeholder(&spec.name));
                    report.failed.push(spec.name.clone());
                }
            }
        }
        report
    }
}

/// Inline placeholder shown in a slot whose diagram failed to render.
pub fn error_placeholder(name: &str) -> String {
    format!(
        r#"<div style="padding: 2rem; text-align: center;"><div style="color: #ef4444;">Failed to render diagram &quot;{}&quot;</div></div>"#,
        html_escape::encode_text(name)
    )
}
