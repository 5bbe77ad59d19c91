//! Decoded input events delivered to controls.
//!
//! Raw device polling and button-code mapping happen outside the core; an
//! external decoder translates hardware input into the intents here and
//! feeds them to [`crate::Tree::dispatch`].

/// A decoded navigation intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    /// Move the selection to the next selectable item.
    MoveSelectionDown,
    /// Move the selection to the previous selectable item.
    MoveSelectionUp,
}

/// An event dispatched through the control tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A navigation intent from the input decoder.
    Nav(NavIntent),
}
