//! Turns raw pointer events over placements into hover and select
//! notifications.

use crate::focus::Cursor;
use crate::placement::PlacementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Hover moved; `None` when the pointer left every placement.
    Hover(Option<PlacementId>),
    Select(PlacementId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    pub hovered: Option<PlacementId>,
}

#[derive(Debug, Default)]
pub struct Interaction {
    hover: HoverState,
    suppressed: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<PlacementId> {
        self.hover.hovered
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor_while(false)
    }

    /// A drag in progress overrides the hover cursor.
    pub fn cursor_while(&self, dragging: bool) -> Cursor {
        if dragging {
            Cursor::Grabbing
        } else if self.hover.hovered.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    pub fn pointer_enter(&mut self, id: PlacementId) -> Option<Notice> {
        if self.suppressed || self.hover.hovered == Some(id) {
            return None;
        }
        self.hover.hovered = Some(id);
        Some(Notice::Hover(Some(id)))
    }

    /// A leave for anything but the current hover is stale and ignored.
    pub fn pointer_leave(&mut self, id: PlacementId) -> Option<Notice> {
        if self.hover.hovered != Some(id) {
            return None;
        }
        self.hover.hovered = None;
        Some(Notice::Hover(None))
    }

    /// Feeds the result of a pick under the pointer.
    pub fn pointer_at(&mut self, hit: Option<PlacementId>) -> Option<Notice> {
        match (self.hover.hovered, hit) {
            (current, Some(id)) if current != Some(id) => self.pointer_enter(id),
            (Some(current), None) => self.pointer_leave(current),
            _ => None,
        }
    }

    pub fn click(&mut self, hit: Option<PlacementId>) -> Option<Notice> {
        if self.suppressed {
            return None;
        }
        hit.map(Notice::Select)
    }

    /// While the modal is open there is no hover and clicks on the board
    /// are ignored.
    pub fn set_modal_open(&mut self, open: bool) -> Option<Notice> {
        self.suppressed = open;
        if open && self.hover.hovered.take().is_some() {
            return Some(Notice::Hover(None));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_from_a_to_b_leaves_only_b() {
        let mut ui = Interaction::new();
        assert_eq!(ui.pointer_enter("mcu"), Some(Notice::Hover(Some("mcu"))));
        assert_eq!(ui.pointer_enter("osc"), Some(Notice::Hover(Some("osc"))));
        assert_eq!(ui.pointer_leave("mcu"), None);
        assert_eq!(ui.hovered(), Some("osc"));
        assert_eq!(ui.cursor(), Cursor::Pointer);
    }

    #[test]
    fn pick_results_map_to_enter_and_leave() {
        let mut ui = Interaction::new();
        assert_eq!(ui.pointer_at(Some("mem")), Some(Notice::Hover(Some("mem"))));
        assert_eq!(ui.pointer_at(Some("mem")), None);
        assert_eq!(ui.pointer_at(None), Some(Notice::Hover(None)));
        assert_eq!(ui.pointer_at(None), None);
        assert_eq!(ui.cursor(), Cursor::Default);
    }

    #[test]
    fn dragging_wins_over_hover() {
        let mut ui = Interaction::new();
        ui.pointer_enter("mcu");
        assert_eq!(ui.cursor_while(true), Cursor::Grabbing);
        assert_eq!(ui.cursor_while(false), Cursor::Pointer);
    }

    #[test]
    fn only_clicks_select() {
        let mut ui = Interaction::new();
        ui.pointer_at(Some("uart"));
        assert_eq!(ui.click(Some("uart")), Some(Notice::Select("uart")));
        assert_eq!(ui.click(None), None);
    }

    #[test]
    fn open_modal_suppresses_hover_and_clicks() {
        let mut ui = Interaction::new();
        ui.pointer_at(Some("cap1"));
        assert_eq!(ui.set_modal_open(true), Some(Notice::Hover(None)));
        assert_eq!(ui.pointer_at(Some("cap2")), None);
        assert_eq!(ui.click(Some("cap2")), None);
        assert_eq!(ui.set_modal_open(false), None);
        assert_eq!(ui.pointer_at(Some("cap2")), Some(Notice::Hover(Some("cap2"))));
    }
}
