//! Element records stored in the tree arena.

use geom::{Point, Rect, RectI32, Size};

use crate::{ControlName, control::Control};

slotmap::new_key_type! {
    /// Identifier for an element in the tree arena.
    ///
    /// Ids are stable for the lifetime of the element and safe to hold
    /// across mutations; a lookup with an id whose element was removed
    /// simply fails.
    pub struct ElementId;
}

/// Arena record for one element of the logical tree.
///
/// Geometry invariants: `rect` is relative to the parent's content origin
/// and written only by the parent during arrangement; `canvas` is the
/// scrollable content extent, never smaller than meaningful content; and
/// `scroll` always satisfies `0 <= scroll <= max(0, canvas - rect.size())`
/// per axis.
pub(crate) struct Element {
    /// Control behavior slot; vacant while a control hook is running.
    pub(crate) control: Option<Box<dyn Control>>,

    /// Non-owning back-reference to the logical parent.
    pub(crate) parent: Option<ElementId>,
    /// Owned, ordered logical children.
    pub(crate) children: Vec<ElementId>,

    /// Control name captured at mount for diagnostics.
    pub(crate) name: ControlName,

    /// Arranged bounds relative to the parent's content origin.
    pub(crate) rect: Rect,
    /// Cached desired size from the last measure.
    pub(crate) desired: Size,
    /// The available constraint the cached desired size was computed for.
    pub(crate) last_available: Option<Size>,
    /// Scroll offset into this element's canvas.
    pub(crate) scroll: Point,
    /// Scrollable content extent in content coordinates.
    pub(crate) canvas: Size,

    /// Projected absolute screen bounds.
    pub(crate) screen: RectI32,
    /// Visible screen region after ancestor clipping.
    pub(crate) clip: Rect,

    /// Hidden elements are measured as zero and skipped by rendering.
    pub(crate) hidden: bool,
    /// The desired size must be recomputed.
    pub(crate) needs_measure: bool,
    /// Children must be re-placed.
    pub(crate) needs_arrange: bool,
}

impl Element {
    /// Create a fresh element record for a mounted control.
    pub(crate) fn new(control: Box<dyn Control>, parent: Option<ElementId>) -> Self {
        let name = control.name();
        Self {
            control: Some(control),
            parent,
            children: Vec::new(),
            name,
            rect: Rect::zero(),
            desired: Size::zero(),
            last_available: None,
            scroll: Point::zero(),
            canvas: Size::zero(),
            screen: RectI32::default(),
            clip: Rect::zero(),
            hidden: false,
            needs_measure: true,
            needs_arrange: true,
        }
    }
}
