//! Core types and traits for the trellis embedded UI toolkit.
//!
//! trellis is a retained-mode control tree for memory-constrained devices:
//! controls are mounted into a [`Tree`] arena, laid out with a two-phase
//! measure/arrange protocol, projected into screen space through clamped
//! scroll offsets, and rendered onto a pixel surface supplied by a native
//! graphics engine behind the [`RenderSurface`] trait.

/// The `Control` trait and event outcomes.
mod control;
/// Arena element records.
mod element;
/// Error taxonomy.
pub mod error;
/// Multicast notification lists.
mod events;
/// Decoded input events.
pub mod event;
/// Control names for diagnostics.
mod name;
/// Render abstraction over the native surface.
pub mod render;
/// Clamped scroll geometry.
mod scroll;
/// Opaque color and font value types.
pub mod style;
/// Test harness and recording surface.
pub mod testing;
/// The element tree arena and layout driver.
mod tree;

pub use control::{Control, EventOutcome};
pub use element::ElementId;
pub use error::{Error, Result};
pub use event::{Event, NavIntent};
pub use events::{Multicast, Subscription};
pub use name::ControlName;
pub use render::{Render, RenderSurface};
pub use scroll::ScrollGeometry;
pub use style::{Color, Font};
pub use tree::Tree;

pub use geom;
