//! The 3D board page: HUD, language menu, deferred scene, tooltip,
//! oscilloscope and the detail modal.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use js_sys::Promise;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, Event, HtmlCanvasElement, HtmlElement, KeyboardEvent, PointerEvent, WheelEvent};

use crate::config::SiteConfig;
use crate::error::SiteResult;
use crate::focus::{FocusGuard, FocusOwner, InputFocus};
use crate::i18n::{text, Language};
use crate::interaction::{Interaction, Notice};
use crate::placement::{self, PlacementId};
use crate::scene::animation::{FrameClock, Ticker};
use crate::scene::camera::OrbitCamera;
use crate::scene::painter::{board_draw_list, Scope, BOARD_TEXTURE_SIZE};
use crate::scene::SceneModel;
use crate::shell::{self, SceneSlot, UiState};

use super::canvas::Canvas2d;
use super::dom::{self, Listener};
use super::render::{start_loop, Renderer};

/// Pointer travel, in CSS pixels, below which a press counts as a click.
const CLICK_SLOP: f32 = 4.0;

struct Live {
    renderer: Renderer,
    model: SceneModel,
    camera: OrbitCamera,
    size: (f32, f32),
}

struct Drag {
    button: i16,
    last: Vec2,
    travelled: f32,
}

struct Elements {
    doc: Document,
    canvas: HtmlCanvasElement,
    hud: Element,
    lang: Element,
    slot: Element,
    modal: Element,
    tooltip: HtmlElement,
}

struct BoardPage {
    config: SiteConfig,
    el: Elements,
    ui: UiState,
    interaction: Interaction,
    slot: SceneSlot,
    focus: InputFocus,
    board_focus: Option<FocusGuard>,
    modal_focus: Option<FocusGuard>,
    live: Option<Live>,
    drag: Option<Drag>,
    scope: Option<(Scope, Canvas2d)>,
    _listeners: Vec<Listener>,
}

type Shared = Rc<RefCell<BoardPage>>;

impl BoardPage {
    fn lang(&self) -> Language {
        self.ui.language
    }

    fn render_chrome(&self) -> SiteResult<()> {
        let doc = &self.el.doc;
        if let Some(root) = doc.document_element() {
            root.set_attribute("lang", self.lang().code())?;
        }
        dom::render_into(doc, &self.el.hud, Some(&shell::header(self.lang())))?;
        dom::render_into(doc, &self.el.lang, Some(&shell::language_menu(&self.ui)))
    }

    fn render_slot(&self) -> SiteResult<()> {
        let placeholder = self.slot.placeholder(self.lang());
        dom::render_into(&self.el.doc, &self.el.slot, placeholder.as_ref())?;
        let visibility = if self.slot == SceneSlot::Ready { "visible" } else { "hidden" };
        self.el.canvas.style().set_property("visibility", visibility)?;
        Ok(())
    }

    fn render_modal(&self) -> SiteResult<()> {
        let classes = self.el.modal.class_list();
        if self.ui.is_modal_open() {
            classes.add_1("open")?;
        } else {
            classes.remove_1("open")?;
        }
        dom::render_into(&self.el.doc, &self.el.modal, self.ui.panel().as_ref())
    }

    fn render_all(&self) -> SiteResult<()> {
        self.render_chrome()?;
        self.render_slot()?;
        self.render_modal()
    }

    fn apply_cursor(&self) {
        if let Some(guard) = &self.board_focus {
            guard.set_cursor(self.interaction.cursor_while(self.drag.is_some()));
        }
        if let Err(e) = self.el.canvas.style().set_property("cursor", self.focus.cursor().css()) {
            log::debug!("cursor: {e:?}");
        }
    }

    fn pick_at(&self, at: Vec2) -> Option<PlacementId> {
        let live = self.live.as_ref()?;
        let ray = live.camera.ray(at.x, at.y, live.size.0, live.size.1);
        live.model.pick(&ray)
    }

    fn update_tooltip(&self) -> SiteResult<()> {
        let style = self.el.tooltip.style();
        let shown = if self.ui.is_modal_open() { None } else { self.interaction.hovered() };
        let anchor = shown.and_then(|id| {
            let live = self.live.as_ref()?;
            let world = live.model.tooltip_anchor(id)?;
            let px = live.camera.project(world, live.size.0, live.size.1)?;
            Some((id, px))
        });
        match anchor {
            Some((id, px)) => {
                let label = placement::find(id).map(|p| text(self.lang(), &p.kind.label_key())).unwrap_or_default();
                self.el.tooltip.set_text_content(Some(&label));
                style.set_property("left", &format!("{}px", px.x))?;
                style.set_property("top", &format!("{}px", px.y))?;
                style.set_property("display", "block")?;
            }
            None => style.set_property("display", "none")?,
        }
        Ok(())
    }
}

fn open(page: &mut BoardPage, id: PlacementId) -> SiteResult<()> {
    log::info!("open {id}");
    page.ui.select(id);
    page.interaction.set_modal_open(true);
    page.board_focus = None;
    page.modal_focus = Some(page.focus.acquire(FocusOwner::Modal)?);
    page.render_chrome()?;
    page.render_modal()?;
    page.update_tooltip()
}

fn close(page: &mut BoardPage) -> SiteResult<()> {
    if !page.ui.is_modal_open() {
        return Ok(());
    }
    page.ui.close(dom::now_ms());
    page.interaction.set_modal_open(false);
    page.modal_focus = None;
    page.board_focus = Some(page.focus.acquire(FocusOwner::Board)?);
    page.apply_cursor();
    // Content stays in place until the grace window ends.
    page.el.modal.class_list().remove_1("open")?;
    Ok(())
}

fn report(result: SiteResult<()>) {
    if let Err(e) = result {
        log::error!("{e}");
    }
}

/// Resolves after `ms`, giving the browser a chance to paint.
async fn pause(ms: i32) {
    let promise = Promise::new(&mut |resolve, _| {
        let scheduled = web_sys::window()
            .map(|w| w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms).is_ok())
            .unwrap_or(false);
        if !scheduled {
            if let Err(e) = resolve.call0(&JsValue::NULL) {
                log::debug!("pause: {e:?}");
            }
        }
    });
    if let Err(e) = JsFuture::from(promise).await {
        log::debug!("pause: {e:?}");
    }
}

fn build_live(page: &BoardPage) -> SiteResult<Live> {
    let model = SceneModel::new(&page.config);
    let (board, mut painter) = Canvas2d::offscreen(&page.el.doc, BOARD_TEXTURE_SIZE, BOARD_TEXTURE_SIZE)?;
    board_draw_list().replay(&mut painter);
    let renderer = Renderer::new(page.el.canvas.clone(), &model, &board)?;
    let size = renderer.fit();
    let camera = OrbitCamera::new(&page.config.camera, size.0 / size.1.max(1.0));
    Ok(Live { renderer, model, camera, size })
}

/// Builds the scene after the placeholder has had a frame on screen.
fn load_scene(page: Shared) {
    spawn_local(async move {
        pause(16).await;
        let built = build_live(&page.borrow());
        let mut p = page.borrow_mut();
        match built {
            Ok(live) => {
                p.live = Some(live);
                p.slot = SceneSlot::Ready;
            }
            Err(e) => {
                log::error!("scene failed to load: {e}");
                p.slot = SceneSlot::Failed(e.to_string());
            }
        }
        report(p.render_slot());
    });
}

fn pointer_pos(e: &PointerEvent) -> Vec2 {
    Vec2::new(e.offset_x() as f32, e.offset_y() as f32)
}

fn listen(page: &Shared) -> SiteResult<Vec<Listener>> {
    let p = page.borrow();
    let canvas = p.el.canvas.clone();
    let mut out = Vec::new();

    let handler = |f: fn(&mut BoardPage, &Event) -> SiteResult<()>| {
        let page = page.clone();
        move |e: Event| {
            let Ok(mut p) = page.try_borrow_mut() else { return };
            report(f(&mut *p, &e));
        }
    };

    out.push(Listener::new(
        &canvas,
        "pointerdown",
        handler(|p, e| {
            if let Some(e) = e.dyn_ref::<PointerEvent>() {
                p.drag = Some(Drag { button: e.button(), last: pointer_pos(e), travelled: 0.0 });
            }
            Ok(())
        }),
    )?);

    out.push(Listener::new(
        &canvas,
        "pointermove",
        handler(|p, e| {
            let Some(e) = e.dyn_ref::<PointerEvent>() else { return Ok(()) };
            let at = pointer_pos(e);
            let p = &mut *p;
            if let (Some(drag), Some(live)) = (p.drag.as_mut(), p.live.as_mut()) {
                let delta = at - drag.last;
                drag.last = at;
                drag.travelled += delta.length();
                if drag.travelled >= CLICK_SLOP {
                    match drag.button {
                        0 => live.camera.rotate(delta, live.size.1),
                        2 => live.camera.pan(delta, live.size.1),
                        _ => {}
                    }
                }
            } else {
                let hit = p.pick_at(at);
                if let Some(Notice::Hover(_)) = p.interaction.pointer_at(hit) {
                    p.update_tooltip()?;
                }
            }
            p.apply_cursor();
            Ok(())
        }),
    )?);

    out.push(Listener::new(
        &canvas,
        "pointerup",
        handler(|p, e| {
            let Some(drag) = p.drag.take() else { return Ok(()) };
            p.apply_cursor();
            let Some(e) = e.dyn_ref::<PointerEvent>() else { return Ok(()) };
            if drag.button != 0 || drag.travelled >= CLICK_SLOP {
                return Ok(());
            }
            let hit = p.pick_at(pointer_pos(e));
            match p.interaction.click(hit) {
                Some(Notice::Select(id)) => open(p, id),
                _ => Ok(()),
            }
        }),
    )?);

    out.push(Listener::new(
        &canvas,
        "pointerleave",
        handler(|p, _| {
            p.drag = None;
            p.interaction.pointer_at(None);
            p.apply_cursor();
            p.update_tooltip()
        }),
    )?);

    out.push(Listener::active(
        &canvas,
        "wheel",
        handler(|p, e| {
            e.prevent_default();
            if let (Some(e), Some(live)) = (e.dyn_ref::<WheelEvent>(), p.live.as_mut()) {
                live.camera.zoom(e.delta_y() as f32);
            }
            Ok(())
        }),
    )?);

    out.push(Listener::new(&canvas, "contextmenu", |e: Event| e.prevent_default())?);

    out.push(Listener::new(
        &p.el.modal,
        "click",
        handler(|p, e| {
            let on_close = dom::closest(e, "[data-action=close]").is_some();
            let on_backdrop = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|t| t.id() == "modal-root")
                .unwrap_or(false);
            if on_close || on_backdrop {
                close(p)?;
            }
            Ok(())
        }),
    )?);

    out.push(Listener::new(
        &p.el.doc,
        "keydown",
        handler(|p, e| {
            let escape = e.dyn_ref::<KeyboardEvent>().map(|k| k.key() == "Escape").unwrap_or(false);
            if escape && p.focus.owner() == Some(FocusOwner::Modal) {
                close(p)?;
            }
            Ok(())
        }),
    )?);

    out.push(Listener::new(
        &p.el.lang,
        "click",
        handler(|p, e| {
            if let Some(option) = dom::closest(e, "[data-lang]") {
                let code = option.get_attribute("data-lang").unwrap_or_default();
                if let Some(lang) = Language::from_code(&code) {
                    p.ui.set_language(lang);
                    p.render_all()?;
                    p.update_tooltip()?;
                }
            } else if dom::closest(e, ".lang-toggle").is_some() {
                p.ui.toggle_menu();
                p.render_chrome()?;
            }
            Ok(())
        }),
    )?);

    {
        let page = page.clone();
        out.push(Listener::new(&p.el.slot, "click", move |e: Event| {
            if dom::closest(&e, "[data-action=retry]").is_none() {
                return;
            }
            let retried = match page.try_borrow_mut() {
                Ok(mut p) => {
                    let retried = p.slot.retry();
                    report(p.render_slot());
                    retried
                }
                Err(_) => false,
            };
            if retried {
                log::info!("retrying scene load");
                load_scene(page.clone());
            }
        })?);
    }

    Ok(out)
}

fn frame(page: &Shared, dt: f32) {
    let Ok(mut guard) = page.try_borrow_mut() else { return };
    let p = &mut *guard;
    if p.ui.tick(dom::now_ms()) {
        report(p.render_modal());
    }
    let hovered = if p.ui.is_modal_open() { None } else { p.interaction.hovered() };
    if let Some(live) = p.live.as_mut() {
        live.size = live.renderer.fit();
        live.camera.set_viewport(live.size.0, live.size.1);
        live.camera.update();
        live.model.tick(dt, hovered);
        live.renderer.draw(&live.model, &live.camera);
    }
    if hovered.is_some() {
        report(p.update_tooltip());
    }
    if let Some((scope, painter)) = p.scope.as_mut() {
        scope.paint_frame(painter);
    }
}

pub fn mount(config: SiteConfig) -> SiteResult<()> {
    let doc = dom::document()?;
    let el = Elements {
        canvas: dom::by_id(&doc, &config.canvas_id)?,
        hud: dom::by_id(&doc, "hud")?,
        lang: dom::by_id(&doc, "lang-menu")?,
        slot: dom::by_id(&doc, "scene-slot")?,
        modal: dom::by_id(&doc, "modal-root")?,
        tooltip: dom::by_id(&doc, "tooltip")?,
        doc,
    };
    let scope = match dom::by_id::<HtmlCanvasElement>(&el.doc, "scope") {
        Ok(canvas) => {
            canvas.set_width(Scope::WIDTH);
            canvas.set_height(Scope::HEIGHT);
            Some((Scope::new(), Canvas2d::of(&canvas)?))
        }
        Err(e) => {
            log::debug!("no oscilloscope: {e}");
            None
        }
    };

    let focus = InputFocus::new();
    let board_focus = Some(focus.acquire(FocusOwner::Board)?);
    let page: Shared = Rc::new(RefCell::new(BoardPage {
        ui: UiState::new(config.language, config.modal_grace_ms),
        interaction: Interaction::new(),
        slot: SceneSlot::Loading,
        focus,
        board_focus,
        modal_focus: None,
        live: None,
        drag: None,
        scope,
        _listeners: Vec::new(),
        config,
        el,
    }));

    page.borrow().render_all()?;
    let listeners = listen(&page)?;
    page.borrow_mut()._listeners = listeners;

    let ticker = Ticker::new();
    {
        let page = page.clone();
        ticker.register(move |dt| frame(&page, dt));
    }
    let mut clock = FrameClock::default();
    start_loop(move |now| ticker.tick(clock.advance(now)))?;

    load_scene(page);
    Ok(())
}
