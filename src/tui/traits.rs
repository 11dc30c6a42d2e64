//! Input contract for focusable panels
//!
//! Panels own their navigation state and report whether they consumed a key,
//! so the event loop can fall back to global bindings.

use crossterm::event::KeyEvent;

/// Whether a component consumed an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

/// Components that react to keyboard input
pub trait Interactive {
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Short key hint shown in the panel title
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
