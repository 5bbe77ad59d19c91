//! Error taxonomy for tree, layout, and selection operations.

use thiserror::Error;

use crate::element::ElementId;

/// Result alias used throughout trellis.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the toolkit core.
///
/// Index and state violations from direct API misuse fail fast. Geometry
/// values such as scroll offsets are never rejected; they clamp silently.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// A selection index below the `-1` no-selection sentinel.
    #[error("selection index out of range: {0}")]
    OutOfRange(i32),

    /// An operation that requires a different control state, such as
    /// selecting an item that is not selectable.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A stale element id with no backing element in the arena.
    #[error("element not found: {0:?}")]
    ElementNotFound(ElementId),

    /// A mutator was invoked from a thread that does not own the tree.
    #[error("tree accessed from a foreign thread")]
    ThreadAccess,

    /// An invalid value, such as a malformed control name.
    #[error("invalid: {0}")]
    Invalid(String),

    /// A layout pass invariant was violated.
    #[error("layout: {0}")]
    Layout(String),

    /// An internal invariant was violated.
    #[error("internal: {0}")]
    Internal(String),
}
