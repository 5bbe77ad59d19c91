use geom::{Point, Rect, Size};
use trellis_core::{Control, ElementId, Multicast, Result, Tree};

/// How navigation-driven scrolling interprets a "line" step.
///
/// The style never changes the clamping invariant, only the deltas
/// applied by [`ScrollViewer::line_down`] and [`ScrollViewer::line_up`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollingStyle {
    /// Scroll by a fixed number of physical pixels.
    #[default]
    Pixels,
    /// Jump between the top edges of the wrapped panel's items.
    Items,
}

/// Notification payload for an offset change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollChanged {
    /// The offset before the change.
    pub old: Point,
    /// The offset after clamping.
    pub new: Point,
}

/// A container presenting a clipped, offsettable view over one child.
///
/// The child is measured without constraint, so the viewer learns the full
/// content extent; the viewer's own arranged size is the viewport. Offset
/// writes clamp to `[0, max(0, extent - viewport)]` and raise a
/// scroll-changed notification when the clamped value differs from the
/// previous one.
pub struct ScrollViewer {
    /// Line-step interpretation for navigation-driven scrolling.
    style: ScrollingStyle,
    /// Pixel delta for a line step in [`ScrollingStyle::Pixels`].
    line_step: u32,
    /// Offset-change notifications.
    changed: Multicast<ScrollChanged>,
}

impl ScrollViewer {
    /// Construct a viewer with pixel scrolling and a one-pixel line step.
    pub fn new() -> Self {
        Self {
            style: ScrollingStyle::default(),
            line_step: 1,
            changed: Multicast::new(),
        }
    }

    /// Set the scrolling style.
    pub fn with_style(mut self, style: ScrollingStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the pixel delta used per line step in pixel scrolling.
    pub fn with_line_step(mut self, step: u32) -> Self {
        self.line_step = step.max(1);
        self
    }

    /// The configured scrolling style.
    pub fn style(&self) -> ScrollingStyle {
        self.style
    }

    /// Offset-change notifications.
    pub fn scroll_changed(&self) -> &Multicast<ScrollChanged> {
        &self.changed
    }

    /// The single wrapped child, if one has been mounted.
    fn child(tree: &Tree, id: ElementId) -> Option<ElementId> {
        tree.children(id).first().copied()
    }

    /// Emit the scroll-changed notification when an offset write moved.
    fn report(&self, id: ElementId, old: Point, new: Point) -> bool {
        if old == new {
            return false;
        }
        tracing::debug!(?id, ?old, ?new, "scroll offset changed");
        self.changed.emit(&ScrollChanged { old, new });
        true
    }

    /// The horizontal offset.
    pub fn horizontal_offset(&self, tree: &Tree, id: ElementId) -> Result<u32> {
        Ok(tree.scroll_offset(id)?.x)
    }

    /// The vertical offset.
    pub fn vertical_offset(&self, tree: &Tree, id: ElementId) -> Result<u32> {
        Ok(tree.scroll_offset(id)?.y)
    }

    /// The content extent.
    pub fn extent(&self, tree: &Tree, id: ElementId) -> Result<Size> {
        tree.canvas(id)
    }

    /// The viewport size.
    pub fn viewport(&self, tree: &Tree, id: ElementId) -> Result<Size> {
        Ok(tree.rect(id)?.size())
    }

    /// Write the horizontal offset, clamped into range. Returns true when
    /// the stored offset changed.
    pub fn set_horizontal_offset(
        &mut self,
        tree: &mut Tree,
        id: ElementId,
        offset: u32,
    ) -> Result<bool> {
        let y = tree.scroll_offset(id)?.y;
        let (old, new) = tree.scroll_to(id, offset, y)?;
        Ok(self.report(id, old, new))
    }

    /// Write the vertical offset, clamped into range. Returns true when
    /// the stored offset changed.
    pub fn set_vertical_offset(
        &mut self,
        tree: &mut Tree,
        id: ElementId,
        offset: u32,
    ) -> Result<bool> {
        let x = tree.scroll_offset(id)?.x;
        let (old, new) = tree.scroll_to(id, x, offset)?;
        Ok(self.report(id, old, new))
    }

    /// Shift both offsets by a signed delta, clamped into range.
    pub fn scroll_by(&mut self, tree: &mut Tree, id: ElementId, dx: i32, dy: i32) -> Result<bool> {
        let (old, new) = tree.scroll_by(id, dx, dy)?;
        Ok(self.report(id, old, new))
    }

    /// Scroll down one line according to the scrolling style.
    pub fn line_down(&mut self, tree: &mut Tree, id: ElementId) -> Result<bool> {
        match self.style {
            ScrollingStyle::Pixels => {
                let step = self.line_step.min(i32::MAX as u32) as i32;
                self.scroll_by(tree, id, 0, step)
            }
            ScrollingStyle::Items => {
                let offset = tree.scroll_offset(id)?.y;
                let next = Self::item_edges(tree, id)?.into_iter().find(|e| *e > offset);
                match next {
                    Some(edge) => self.set_vertical_offset(tree, id, edge),
                    None => Ok(false),
                }
            }
        }
    }

    /// Scroll up one line according to the scrolling style.
    pub fn line_up(&mut self, tree: &mut Tree, id: ElementId) -> Result<bool> {
        match self.style {
            ScrollingStyle::Pixels => {
                let step = self.line_step.min(i32::MAX as u32) as i32;
                self.scroll_by(tree, id, 0, -step)
            }
            ScrollingStyle::Items => {
                let offset = tree.scroll_offset(id)?.y;
                let previous = Self::item_edges(tree, id)?
                    .into_iter()
                    .rev()
                    .find(|e| *e < offset);
                match previous {
                    Some(edge) => self.set_vertical_offset(tree, id, edge),
                    None => Ok(false),
                }
            }
        }
    }

    /// Scroll down one viewport height.
    pub fn page_down(&mut self, tree: &mut Tree, id: ElementId) -> Result<bool> {
        let page = tree.rect(id)?.h.min(i32::MAX as u32) as i32;
        self.scroll_by(tree, id, 0, page)
    }

    /// Scroll up one viewport height.
    pub fn page_up(&mut self, tree: &mut Tree, id: ElementId) -> Result<bool> {
        let page = tree.rect(id)?.h.min(i32::MAX as u32) as i32;
        self.scroll_by(tree, id, 0, -page)
    }

    /// Adjust the vertical offset minimally so `target` (a rectangle in
    /// content coordinates) falls within the viewport. Returns true when
    /// the offset moved.
    ///
    /// The bottom edge is reconciled first, then the top; only one side
    /// applies per call, and a target taller than the viewport is an
    /// accepted limitation.
    pub fn scroll_into_view(&mut self, tree: &mut Tree, id: ElementId, target: Rect) -> Result<bool> {
        let mut geometry = tree.scroll_geometry(id)?;
        if !geometry.scroll_into_view(target) {
            return Ok(false);
        }
        let wanted = geometry.offset();
        let (old, new) = tree.scroll_to(id, wanted.x, wanted.y)?;
        Ok(self.report(id, old, new))
    }

    /// Top edges of the wrapped panel's children, in content coordinates.
    ///
    /// Empty when the child is not a panel of items, which degrades item
    /// scrolling to a no-op.
    fn item_edges(tree: &Tree, id: ElementId) -> Result<Vec<u32>> {
        let Some(panel) = Self::child(tree, id) else {
            return Ok(Vec::new());
        };
        tree.children(panel)
            .iter()
            .map(|item| tree.rect(*item).map(|r| r.tl.y))
            .collect()
    }
}

impl Default for ScrollViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for ScrollViewer {
    fn measure(&mut self, tree: &mut Tree, id: ElementId, available: Size) -> Result<Size> {
        let Some(child) = Self::child(tree, id) else {
            return Ok(Size::zero());
        };
        // The child sees no constraint, so the full content extent is
        // reported back; the viewer itself never asks for more than the
        // space it was offered.
        let content = tree.measure_child(child, Size::new(u32::MAX, u32::MAX))?;
        Ok(content.min(available))
    }

    fn arrange(&mut self, tree: &mut Tree, id: ElementId, size: Size) -> Result<()> {
        let Some(child) = Self::child(tree, id) else {
            return Ok(());
        };
        let extent = tree.desired(child)?.max(size);
        tree.set_canvas(id, extent)?;
        tree.arrange_child(child, extent.rect())
    }
}
