use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent};

use crate::error::SiteResult;
use crate::focus::{FocusGuard, FocusOwner, InputFocus};
use crate::terminal::{self, TerminalSession};

use super::dom::{self, Listener};

struct TerminalPage {
    doc: Document,
    screen: Element,
    session: TerminalSession,
    _focus: FocusGuard,
}

impl TerminalPage {
    fn render(&self) -> SiteResult<()> {
        dom::render_into(&self.doc, &self.screen, Some(&terminal::view(&self.session)))?;
        self.screen.set_scroll_top(self.screen.scroll_height());
        Ok(())
    }
}

pub fn mount() -> SiteResult<()> {
    let doc = dom::document()?;
    let screen: Element = dom::by_id(&doc, "terminal")?;
    let focus = InputFocus::new();
    let page = Rc::new(RefCell::new(TerminalPage {
        _focus: focus.acquire(FocusOwner::Terminal)?,
        session: TerminalSession::new(),
        screen,
        doc: doc.clone(),
    }));
    page.borrow().render()?;

    let keys = Listener::new(&doc, "keydown", move |e: Event| {
        let Some(k) = e.dyn_ref::<KeyboardEvent>() else { return };
        if k.ctrl_key() || k.meta_key() || k.alt_key() {
            return;
        }
        let Ok(mut p) = page.try_borrow_mut() else { return };
        if p.session.key(&k.key()) {
            e.prevent_default();
            if let Err(err) = p.render() {
                log::error!("{err}");
            }
        }
    })?;
    // The page lives as long as the document.
    std::mem::forget(keys);
    log::info!("terminal ready");
    Ok(())
}
