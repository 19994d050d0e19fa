//! Thin helpers over `web-sys`: element lookup, turning a layout
//! [`Node`] into DOM, and event listeners that detach on drop.

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, Window};

use crate::error::{SiteError, SiteResult};
use crate::layout::Node;

pub fn window() -> SiteResult<Window> {
    web_sys::window().ok_or(SiteError::Unsupported("window"))
}

pub fn document() -> SiteResult<Document> {
    window()?.document().ok_or(SiteError::Unsupported("document"))
}

pub fn by_id<T: JsCast>(doc: &Document, id: &str) -> SiteResult<T> {
    doc.get_element_by_id(id)
        .ok_or_else(|| SiteError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| SiteError::MissingElement(format!("{id} (wrong element type)")))
}

/// `performance.now()`, or zero where there is no performance clock.
pub fn now_ms() -> f64 {
    web_sys::window().and_then(|w| w.performance()).map(|p| p.now()).unwrap_or(0.0)
}

pub fn build(doc: &Document, node: &Node) -> SiteResult<Element> {
    let el = doc.create_element(node.tag)?;
    if let Some(class) = node.class {
        el.set_class_name(class);
    }
    for (name, value) in &node.attrs {
        el.set_attribute(name, value)?;
    }
    if let Some(text) = &node.text {
        el.append_child(&doc.create_text_node(text))?;
    }
    for child in &node.children {
        el.append_child(&build(doc, child)?)?;
    }
    Ok(el)
}

/// Replaces everything inside `parent` with `node`, or empties it.
pub fn render_into(doc: &Document, parent: &Element, node: Option<&Node>) -> SiteResult<()> {
    parent.set_inner_html("");
    if let Some(node) = node {
        parent.append_child(&build(doc, node)?)?;
    }
    Ok(())
}

/// Nearest ancestor of the event target (itself included) matching
/// `selector`.
pub fn closest(event: &Event, selector: &str) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()?.closest(selector).ok().flatten()
}

/// An attached listener. Dropping it removes the listener and frees the
/// closure.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(target: &EventTarget, kind: &'static str, f: impl FnMut(Event) + 'static) -> SiteResult<Self> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), kind, callback })
    }

    /// Non-passive, so the handler may call `prevent_default` on wheel
    /// and touch events.
    pub fn active(target: &EventTarget, kind: &'static str, f: impl FnMut(Event) + 'static) -> SiteResult<Self> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), kind, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("could not detach {} listener: {:?}", self.kind, e);
        }
    }
}
