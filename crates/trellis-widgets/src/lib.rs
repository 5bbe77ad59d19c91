//! Composable controls for the trellis toolkit.
//!
//! The centerpiece is [`ListBox`], a composite of a [`ScrollViewer`]
//! wrapping a [`StackPanel`] of selectable items, with keyboard-driven
//! navigation that skips non-selectable entries and keeps the selection
//! scrolled into view.

/// Text leaf control.
mod label;
/// The list box composite.
mod list;
/// Selection navigation scanning.
mod nav;
/// The scroll viewer container.
mod scroll;
/// Selection state and notifications.
mod selection;
/// The stack panel.
mod stack;

pub use label::Label;
pub use list::ListBox;
pub use nav::{NavDirection, find_next_selectable};
pub use scroll::{ScrollChanged, ScrollViewer, ScrollingStyle};
pub use selection::{NO_SELECTION, SelectionChanged, SelectionController};
pub use stack::StackPanel;
