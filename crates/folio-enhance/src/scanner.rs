//! Fragment scanning and rewriting over `lol_html`.
//!
//! The transform is two streaming passes over the fragment. The detect
//! pass enumerates `<pre>` elements in document order and captures each
//! block's class attribute and text content without touching the markup.
//! The render pass walks the identical element order, so the ordinal
//! position of every `<pre>` lines up between passes and block indices
//! stay stable.
//!
//! Both passes skip any `<pre>` carrying the `data-enhanced` marker that
//! the render pass writes, which is what makes re-running the transform
//! on its own output a no-op.

use std::cell::RefCell;
use std::rc::Rc;

use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, element, rewrite_str, text};

use crate::EnhanceOptions;
use crate::block::{CodeBlock, ExpansionState};
use crate::error::EnhanceError;
use crate::synth;

/// Raw facts about one candidate `<pre>` gathered during the detect pass.
/// `text` is the source text as written, entities still encoded.
#[derive(Debug, Default)]
pub(crate) struct ScannedPre {
    pub class_attr: Option<String>,
    pub text: String,
    pub has_code: bool,
}

/// Detect pass: one entry per `<pre>` not already enhanced, in document
/// order. Entries without a `<code>` child keep `has_code == false` and
/// are not code blocks.
pub(crate) fn scan(fragment: &str) -> Result<Vec<ScannedPre>, EnhanceError> {
    #[derive(Default)]
    struct ScanState {
        pres: Vec<ScannedPre>,
        skip_current: bool,
    }

    let state = Rc::new(RefCell::new(ScanState::default()));
    let pre_state = Rc::clone(&state);
    let code_state = Rc::clone(&state);
    let text_state = Rc::clone(&state);

    rewrite_str(
        fragment,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("pre", move |el| {
                    let mut st = pre_state.borrow_mut();
                    if el.has_attribute(synth::ENHANCED_ATTR) {
                        st.skip_current = true;
                    } else {
                        st.skip_current = false;
                        st.pres.push(ScannedPre::default());
                    }
                    Ok(())
                }),
                element!("pre code", move |el| {
                    let mut st = code_state.borrow_mut();
                    if st.skip_current {
                        return Ok(());
                    }
                    if let Some(pre) = st.pres.last_mut() {
                        // Only the first <code> child decides the language.
                        if !pre.has_code {
                            pre.has_code = true;
                            pre.class_attr = el.get_attribute("class");
                        }
                    }
                    Ok(())
                }),
                text!("pre code", move |chunk| {
                    let mut st = text_state.borrow_mut();
                    if st.skip_current {
                        return Ok(());
                    }
                    if let Some(pre) = st.pres.last_mut() {
                        if pre.has_code {
                            pre.text.push_str(chunk.as_str());
                        }
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|err| EnhanceError::Rewrite(err.to_string()))?;

    let pres = std::mem::take(&mut state.borrow_mut().pres);
    Ok(pres)
}

/// Inputs for the render pass, all derived from the detect pass.
pub(crate) struct RenderPlan<'a> {
    pub blocks: &'a [CodeBlock],
    /// `<pre>` ordinal position -> code block index, `None` for pres
    /// without a `<code>` child.
    pub pre_to_block: &'a [Option<usize>],
    /// Per-block highlighted markup, `None` when the highlighter
    /// declined and the original inner markup stays.
    pub highlighted: &'a [Option<String>],
    pub expansion: &'a ExpansionState,
    pub options: &'a EnhanceOptions,
}

/// Render pass: wraps every detected block with the synthesized header
/// and scroll container, and substitutes highlighted markup into the
/// `<code>` element. Marks each wrapped `<pre>` with `data-enhanced`.
pub(crate) fn render(fragment: &str, plan: &RenderPlan<'_>) -> Result<String, EnhanceError> {
    #[derive(Default)]
    struct RenderState {
        ordinal: usize,
        current: Option<usize>,
        code_done: bool,
    }

    let state = Rc::new(RefCell::new(RenderState::default()));
    let pre_state = Rc::clone(&state);
    let code_state = Rc::clone(&state);

    rewrite_str(
        fragment,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("pre", move |el| {
                    let mut st = pre_state.borrow_mut();
                    if el.has_attribute(synth::ENHANCED_ATTR) {
                        st.current = None;
                        st.code_done = true;
                        return Ok(());
                    }
                    let ordinal = st.ordinal;
                    st.ordinal += 1;
                    st.code_done = false;
                    st.current = plan.pre_to_block.get(ordinal).copied().flatten();
                    if let Some(block_index) = st.current {
                        let block = &plan.blocks[block_index];
                        let expanded = plan.expansion.contains(block.index);
                        el.before(
                            &synth::wrapper_open(block, expanded, plan.options),
                            ContentType::Html,
                        );
                        el.after(synth::WRAPPER_CLOSE, ContentType::Html);
                        el.set_attribute("style", synth::PRE_STYLE)?;
                        el.set_attribute(synth::ENHANCED_ATTR, "true")?;
                    }
                    Ok(())
                }),
                element!("pre code", move |el| {
                    let mut st = code_state.borrow_mut();
                    if st.code_done {
                        return Ok(());
                    }
                    st.code_done = true;
                    if let Some(block_index) = st.current {
                        if let Some(markup) =
                            plan.highlighted.get(block_index).and_then(|m| m.as_deref())
                        {
                            el.set_inner_content(markup, ContentType::Html);
                        }
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|err| EnhanceError::Rewrite(err.to_string()))
}
