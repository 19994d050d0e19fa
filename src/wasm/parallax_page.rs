//! The scroll-driven landing page and its contact form.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, TouchEvent,
    WheelEvent, Window,
};

use crate::config::SiteConfig;
use crate::error::{SiteError, SiteResult};
use crate::focus::{FocusGuard, FocusOwner, InputFocus};
use crate::parallax::{Arrived, ContactForm, Parallax, Transition, SENT_MESSAGE};
use crate::scene::animation::{FrameClock, Ticker};

use super::dom::{self, Listener};
use super::render::start_loop;

struct Form {
    el: HtmlFormElement,
    name: HtmlInputElement,
    email: HtmlInputElement,
    message: HtmlTextAreaElement,
    button: HtmlButtonElement,
    state: ContactForm,
}

struct ParallaxPage {
    window: Window,
    sections: Vec<Element>,
    nav: Vec<Element>,
    parallax: Parallax,
    form: Option<Form>,
    send_ms: f64,
    _focus: FocusGuard,
}

fn select_all(doc: &Document, selector: &str) -> SiteResult<Vec<Element>> {
    let list = doc.query_selector_all(selector)?;
    Ok((0..list.length()).filter_map(|i| list.get(i)?.dyn_into::<Element>().ok()).collect())
}

fn touch_y(e: &Event, changed: bool) -> Option<f64> {
    let e = e.dyn_ref::<TouchEvent>()?;
    let list = if changed { e.changed_touches() } else { e.touches() };
    list.get(0).map(|t| f64::from(t.client_y()))
}

impl ParallaxPage {
    fn fade_out(&self, t: Transition) -> SiteResult<()> {
        if let Some(from) = self.sections.get(t.from) {
            from.class_list().add_1("leaving")?;
        }
        Ok(())
    }

    fn arrive(&self, a: Arrived) -> SiteResult<()> {
        if let Some(from) = self.sections.get(a.from) {
            from.class_list().remove_2("active", "leaving")?;
        }
        if let Some(to) = self.sections.get(a.to) {
            to.class_list().add_1("active")?;
        }
        for (i, link) in self.nav.iter().enumerate() {
            link.class_list().toggle_with_force("active", i == a.to)?;
        }
        Ok(())
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::warn!("alert: {e:?}");
        }
    }

    fn submit(&mut self) {
        let Some(form) = self.form.as_mut() else { return };
        form.state.name = form.name.value();
        form.state.email = form.email.value();
        form.state.message = form.message.value();
        match form.state.submit(dom::now_ms(), self.send_ms) {
            Ok(()) => {
                form.button.set_text_content(Some(form.state.button_label()));
                form.button.set_disabled(true);
            }
            Err(e) => {
                let message = e.to_string();
                self.alert(&message);
            }
        }
    }

    fn tick(&mut self) -> SiteResult<()> {
        let now = dom::now_ms();
        if let Some(arrived) = self.parallax.tick(now) {
            self.arrive(arrived)?;
        }
        let sent = self.form.as_mut().map(|f| f.state.tick(now)).unwrap_or(false);
        if sent {
            self.alert(SENT_MESSAGE);
            if let Some(form) = &self.form {
                form.el.reset();
                form.button.set_text_content(Some(form.state.button_label()));
                form.button.set_disabled(false);
            }
        }
        Ok(())
    }
}

fn find_form(doc: &Document) -> SiteResult<Form> {
    let el = doc
        .query_selector(".contact-form form")?
        .ok_or_else(|| SiteError::MissingElement(".contact-form form".into()))?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| SiteError::MissingElement("contact form (wrong element type)".into()))?;
    let button = el
        .query_selector("button[type=submit]")?
        .ok_or_else(|| SiteError::MissingElement("submit button".into()))?
        .dyn_into::<HtmlButtonElement>()
        .map_err(|_| SiteError::MissingElement("submit button (wrong element type)".into()))?;
    Ok(Form {
        name: dom::by_id(doc, "name")?,
        email: dom::by_id(doc, "email")?,
        message: dom::by_id(doc, "message")?,
        el,
        button,
        state: ContactForm::default(),
    })
}

fn report(result: SiteResult<()>) {
    if let Err(e) = result {
        log::error!("{e}");
    }
}

pub fn mount(config: SiteConfig) -> SiteResult<()> {
    let window = dom::window()?;
    let doc = dom::document()?;
    let sections = select_all(&doc, ".parallax-section")?;
    let nav = select_all(&doc, ".nav-links a")?;
    if sections.is_empty() {
        return Err(SiteError::MissingElement(".parallax-section".into()));
    }
    let form = match find_form(&doc) {
        Ok(form) => Some(form),
        Err(e) => {
            log::warn!("contact form disabled: {e}");
            None
        }
    };
    let focus = InputFocus::new();
    let page = Rc::new(RefCell::new(ParallaxPage {
        _focus: focus.acquire(FocusOwner::Parallax)?,
        parallax: Parallax::new(sections.len(), &config),
        send_ms: config.contact_send_ms,
        window: window.clone(),
        sections,
        nav,
        form,
    }));
    page.borrow().arrive(Arrived { from: 0, to: 0 })?;

    let mut listeners = Vec::new();
    {
        let page = page.clone();
        listeners.push(Listener::active(&window, "wheel", move |e: Event| {
            e.prevent_default();
            let Some(w) = e.dyn_ref::<WheelEvent>() else { return };
            let Ok(mut p) = page.try_borrow_mut() else { return };
            if let Some(t) = p.parallax.wheel(w.delta_y(), dom::now_ms()) {
                report(p.fade_out(t));
            }
        })?);
    }
    {
        let page = page.clone();
        listeners.push(Listener::new(&window, "touchstart", move |e: Event| {
            let (Some(y), Ok(mut p)) = (touch_y(&e, false), page.try_borrow_mut()) else { return };
            p.parallax.touch_start(y);
        })?);
    }
    {
        let page = page.clone();
        listeners.push(Listener::new(&window, "touchend", move |e: Event| {
            let (Some(y), Ok(mut p)) = (touch_y(&e, true), page.try_borrow_mut()) else { return };
            if let Some(t) = p.parallax.touch_end(y, dom::now_ms()) {
                report(p.fade_out(t));
            }
        })?);
    }
    let links = page.borrow().nav.clone();
    for (index, link) in links.iter().enumerate() {
        let page = page.clone();
        listeners.push(Listener::new(link, "click", move |e: Event| {
            e.prevent_default();
            let Ok(mut p) = page.try_borrow_mut() else { return };
            if let Some(t) = p.parallax.nav_click(index, dom::now_ms()) {
                report(p.fade_out(t));
            }
        })?);
    }
    let form_el = page.borrow().form.as_ref().map(|f| f.el.clone());
    if let Some(form_el) = form_el {
        let page = page.clone();
        listeners.push(Listener::new(&form_el, "submit", move |e: Event| {
            e.prevent_default();
            if let Ok(mut p) = page.try_borrow_mut() {
                p.submit();
            }
        })?);
    }
    // Listeners stay attached for the life of the page.
    std::mem::forget(listeners);

    let ticker = Ticker::new();
    ticker.register(move |_| {
        if let Ok(mut p) = page.try_borrow_mut() {
            report(p.tick());
        }
    });
    let mut clock = FrameClock::default();
    start_loop(move |now| ticker.tick(clock.advance(now)))
}
