//! Who currently owns document-level input.
//!
//! The modal, the terminal prompt, the parallax page and the board all
//! want document listeners and the cursor. Each must take a [`FocusGuard`] first;
//! dropping the guard hands focus back.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{SiteError, SiteResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOwner {
    Board,
    Modal,
    Terminal,
    Parallax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Grabbing,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
            Cursor::Grabbing => "grabbing",
        }
    }
}

#[derive(Debug, Default)]
struct FocusState {
    owner: Option<FocusOwner>,
    cursor: Cursor,
}

/// Shared handle; clones see the same state.
#[derive(Debug, Clone, Default)]
pub struct InputFocus {
    state: Rc<RefCell<FocusState>>,
}

impl InputFocus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, owner: FocusOwner) -> SiteResult<FocusGuard> {
        let mut state = self.state.borrow_mut();
        if let Some(held) = state.owner {
            return Err(SiteError::FocusHeld(held));
        }
        state.owner = Some(owner);
        log::trace!("input focus -> {owner:?}");
        Ok(FocusGuard { focus: self.clone(), owner })
    }

    pub fn owner(&self) -> Option<FocusOwner> {
        self.state.borrow().owner
    }

    pub fn cursor(&self) -> Cursor {
        self.state.borrow().cursor
    }
}

/// Proof of ownership. Released on drop.
#[derive(Debug)]
pub struct FocusGuard {
    focus: InputFocus,
    owner: FocusOwner,
}

impl FocusGuard {
    pub fn owner(&self) -> FocusOwner {
        self.owner
    }

    pub fn set_cursor(&self, cursor: Cursor) {
        self.focus.state.borrow_mut().cursor = cursor;
    }
}

impl Drop for FocusGuard {
    fn drop(&mut self) {
        let mut state = self.focus.state.borrow_mut();
        state.owner = None;
        state.cursor = Cursor::Default;
        log::trace!("input focus released by {:?}", self.owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_release() {
        let focus = InputFocus::new();
        let guard = focus.acquire(FocusOwner::Board).unwrap();
        assert!(matches!(focus.acquire(FocusOwner::Modal), Err(SiteError::FocusHeld(FocusOwner::Board))));
        drop(guard);
        let modal = focus.acquire(FocusOwner::Modal).unwrap();
        assert_eq!(modal.owner(), FocusOwner::Modal);
        assert_eq!(focus.owner(), Some(FocusOwner::Modal));
    }

    #[test]
    fn cursor_resets_on_release() {
        let focus = InputFocus::new();
        {
            let guard = focus.acquire(FocusOwner::Board).unwrap();
            guard.set_cursor(Cursor::Pointer);
            assert_eq!(focus.cursor().css(), "pointer");
        }
        assert_eq!(focus.cursor(), Cursor::Default);
        assert_eq!(focus.owner(), None);
    }

    #[test]
    fn one_page_owner_at_a_time() {
        let focus = InputFocus::new();
        let parallax = focus.acquire(FocusOwner::Parallax).unwrap();
        assert!(matches!(focus.acquire(FocusOwner::Terminal), Err(SiteError::FocusHeld(FocusOwner::Parallax))));
        parallax.set_cursor(Cursor::Grabbing);
        assert_eq!(focus.cursor().css(), "grabbing");
        drop(parallax);
        assert!(focus.acquire(FocusOwner::Terminal).is_ok());
    }
}
