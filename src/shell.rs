//! Page-level UI state for the board page: which placement is selected,
//! whether its panel is showing, the active language and the language
//! menu. Timing is driven by the caller's clock.

use crate::i18n::{text, Language};
use crate::layout::Node;
use crate::modal;
use crate::placement::{self, PlacementId};

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    selected: Option<PlacementId>,
    is_modal_open: bool,
    pub language: Language,
    pub lang_menu_open: bool,
    /// When the retained selection is dropped after a close.
    clear_at: Option<f64>,
    grace_ms: f64,
}

impl UiState {
    pub fn new(language: Language, grace_ms: f64) -> Self {
        Self { selected: None, is_modal_open: false, language, lang_menu_open: false, clear_at: None, grace_ms }
    }

    pub fn selected(&self) -> Option<PlacementId> {
        self.selected
    }

    pub fn is_modal_open(&self) -> bool {
        self.is_modal_open
    }

    /// Opens the panel for `id`. Reopening during the grace window
    /// cancels the pending clear.
    pub fn select(&mut self, id: PlacementId) {
        self.selected = Some(id);
        self.is_modal_open = true;
        self.clear_at = None;
        self.lang_menu_open = false;
    }

    /// Hides the panel but keeps the selection until `now_ms + grace`,
    /// so the closing animation still has content.
    pub fn close(&mut self, now_ms: f64) {
        if !self.is_modal_open {
            return;
        }
        self.is_modal_open = false;
        self.clear_at = Some(now_ms + self.grace_ms);
    }

    /// Drops the retained selection once the grace window has passed.
    /// Returns true when something changed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.clear_at {
            Some(at) if now_ms >= at => {
                self.clear_at = None;
                self.selected = None;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_menu(&mut self) {
        self.lang_menu_open = !self.lang_menu_open;
    }

    /// Switches language and closes the menu. An open panel stays open.
    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            log::info!("language -> {language}");
        }
        self.language = language;
        self.lang_menu_open = false;
    }

    /// Panel for the current (or retained) selection.
    pub fn panel(&self) -> Option<Node> {
        let id = self.selected?;
        match placement::find(id) {
            Some(p) => Some(modal::present(p, self.language)),
            None => {
                log::warn!("selected placement {id} does not exist");
                Some(modal::not_found(self.language))
            }
        }
    }
}

/// Toggle button plus the two fixed options.
pub fn language_menu(ui: &UiState) -> Node {
    let options = Language::ALL.into_iter().map(|lang| {
        let class = if lang == ui.language { "lang-option active" } else { "lang-option" };
        Node::new("button")
            .class(class)
            .attr("type", "button")
            .attr("data-lang", lang.code())
            .text(lang.native_name())
    });
    let mut menu = Node::new("div").class("lang-menu").child(
        Node::new("button")
            .class("lang-toggle")
            .attr("type", "button")
            .attr("aria-expanded", ui.lang_menu_open.to_string())
            .text(ui.language.code().to_uppercase()),
    );
    if ui.lang_menu_open {
        menu = menu.child(Node::new("div").class("lang-options").children(options));
    }
    menu
}

/// Name, title and subtitle over the board, plus the control hints.
pub fn header(lang: Language) -> Node {
    let hints = ["rotate", "pan", "zoom", "click"]
        .map(|k| Node::new("li").text(text(lang, &format!("instructions.{k}"))));
    Node::new("div").class("hud").children([
        Node::new("h1").class("hud-name").text(text(lang, "name")),
        Node::new("p").class("hud-title").text(text(lang, "title")),
        Node::new("p").class("hud-subtitle").text(text(lang, "subtitle")),
        Node::new("ul").class("hud-hints").children(hints),
        Node::new("div").class("hud-status").children([
            Node::new("span").class("status-dot"),
            Node::new("span").text(text(lang, "status.active")),
            Node::new("span").class("version").text(text(lang, "status.version")),
        ]),
    ])
}

/// The deferred scene and what stands in for it meanwhile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SceneSlot {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

impl SceneSlot {
    /// Back to loading after a failure. False if there was nothing to
    /// retry.
    pub fn retry(&mut self) -> bool {
        if matches!(self, SceneSlot::Failed(_)) {
            *self = SceneSlot::Loading;
            true
        } else {
            false
        }
    }

    pub fn placeholder(&self, lang: Language) -> Option<Node> {
        match self {
            SceneSlot::Ready => None,
            SceneSlot::Loading => {
                Some(Node::new("div").class("scene-loading").child(Node::new("p").text(text(lang, "loading.scene"))))
            }
            SceneSlot::Failed(reason) => Some(Node::new("div").class("scene-error").children([
                Node::new("p").text(text(lang, "loading.failed")),
                Node::new("pre").class("scene-error-detail").text(reason.clone()),
                Node::new("button")
                    .class("retry")
                    .attr("type", "button")
                    .attr("data-action", "retry")
                    .text(text(lang, "loading.retry")),
            ])),
        }
    }
}
