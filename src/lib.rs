//! Interactive circuit-board portfolio.
//!
//! Everything outside `wasm` is plain Rust and runs under `cargo test`
//! on the host; the browser layer only wires those pieces to the DOM
//! and WebGL2.

pub mod config;
pub mod content;
pub mod error;
pub mod focus;
pub mod i18n;
pub mod interaction;
pub mod layout;
pub mod modal;
pub mod parallax;
pub mod placement;
pub mod scene;
pub mod shell;
pub mod terminal;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::SiteConfig;

    mod app;
    pub mod canvas;
    pub mod dom;
    mod parallax_page;
    mod render;
    mod terminal_page;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let doc = dom::document()?;
        let inline = doc.get_element_by_id("site-config").and_then(|el| el.text_content());
        let config = SiteConfig::from_optional_json(inline.as_deref());
        console_log::init_with_level(config.log_level()).ok();

        let page = doc.body().and_then(|b| b.get_attribute("data-page")).unwrap_or_default();
        log::info!("starting {} page", if page.is_empty() { "board" } else { &page });
        match page.as_str() {
            "terminal" => terminal_page::mount()?,
            "parallax" => parallax_page::mount(config)?,
            _ => app::mount(config)?,
        }
        Ok(())
    }
}
