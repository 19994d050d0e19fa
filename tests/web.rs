#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use pcb_portfolio::i18n::Language;
use pcb_portfolio::layout::Node;
use pcb_portfolio::scene::painter::{board_draw_list, Painter};
use pcb_portfolio::wasm::canvas::Canvas2d;
use pcb_portfolio::wasm::dom::{self, Listener};
use pcb_portfolio::{modal, placement};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn canvas_takes_up_space() {
    let document = dom::document().unwrap();
    let elem = document.create_element("canvas").unwrap();
    elem.set_attribute("style", "width: 320px; height: 200px; display: block").unwrap();
    document.body().unwrap().append_child(&elem).unwrap();

    let rect = elem.get_bounding_client_rect();
    assert!(rect.width() > 0.0 && rect.height() > 0.0);
    elem.remove();
}

#[wasm_bindgen_test]
fn modal_tree_becomes_dom() {
    let document = dom::document().unwrap();
    let mcu = placement::find("mcu").unwrap();
    let el = dom::build(&document, &modal::present(mcu, Language::Tr)).unwrap();

    let title = el.query_selector(".modal-title").unwrap().unwrap();
    assert_eq!(title.text_content().as_deref(), Some("HAKKIMDA"));
    let close = el.query_selector("[data-action=close]").unwrap().unwrap();
    assert_eq!(close.get_attribute("aria-label").as_deref(), Some("Kapat"));
}

#[wasm_bindgen_test]
fn render_into_replaces_and_clears() {
    let document = dom::document().unwrap();
    let parent = document.create_element("div").unwrap();
    dom::render_into(&document, &parent, Some(&Node::new("p").text("one"))).unwrap();
    dom::render_into(&document, &parent, Some(&Node::new("p").text("two"))).unwrap();
    assert_eq!(parent.child_element_count(), 1);
    assert_eq!(parent.text_content().as_deref(), Some("two"));

    dom::render_into(&document, &parent, None).unwrap();
    assert_eq!(parent.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn dropped_listener_stops_firing() {
    let document = dom::document().unwrap();
    let target = document.create_element("div").unwrap();
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    let listener = Listener::new(&target, "ping", move |_| counter.set(counter.get() + 1)).unwrap();

    target.dispatch_event(&web_sys::Event::new("ping").unwrap()).unwrap();
    drop(listener);
    target.dispatch_event(&web_sys::Event::new("ping").unwrap()).unwrap();
    assert_eq!(hits.get(), 1);
}

#[wasm_bindgen_test]
fn board_texture_paints_on_a_real_canvas() {
    let document = dom::document().unwrap();
    let (canvas, mut painter) = Canvas2d::offscreen(&document, 256, 256).unwrap();
    painter.set_alpha(1.0);
    board_draw_list().replay(&mut painter);
    assert_eq!((canvas.width(), canvas.height()), (256, 256));
}
