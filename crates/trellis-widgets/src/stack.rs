use geom::{Point, Rect, Size};
use trellis_core::{Control, ElementId, Result, Tree};

/// A panel that stacks its children vertically.
///
/// Children are measured against the panel's available width with an
/// unbounded height, so content taller than the display is still reported
/// in full and an enclosing [`crate::ScrollViewer`] can decide to scroll.
/// Each child keeps its own desired size; nothing is stretched.
pub struct StackPanel;

impl StackPanel {
    /// Construct an empty stack panel. Children are mounted through the
    /// tree.
    pub fn new() -> Self {
        Self
    }

    /// The layout offset a child was assigned within the panel, for
    /// ancestors computing scroll positions.
    pub fn child_offset(&self, tree: &Tree, child: ElementId) -> Result<Point> {
        Ok(tree.rect(child)?.tl)
    }
}

impl Default for StackPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for StackPanel {
    fn measure(&mut self, tree: &mut Tree, id: ElementId, available: Size) -> Result<Size> {
        let constraint = Size::new(available.w, u32::MAX);
        let mut width = 0u32;
        let mut height = 0u32;
        for child in tree.children(id) {
            let desired = tree.measure_child(child, constraint)?;
            width = width.max(desired.w);
            height = height.saturating_add(desired.h);
        }
        Ok(Size::new(width, height))
    }

    fn arrange(&mut self, tree: &mut Tree, id: ElementId, _size: Size) -> Result<()> {
        let mut y = 0u32;
        for child in tree.children(id) {
            let desired = tree.desired(child)?;
            tree.arrange_child(child, Rect::new(0, y, desired.w, desired.h))?;
            y = y.saturating_add(desired.h);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::testing::Harness;

    /// A leaf with a fixed desired size.
    struct Block {
        /// The size reported from measure.
        size: Size,
    }

    impl Block {
        /// Construct a block of the given size.
        fn new(w: u32, h: u32) -> Self {
            Self {
                size: Size::new(w, h),
            }
        }
    }

    impl Control for Block {
        fn measure(&mut self, _tree: &mut Tree, _id: ElementId, _available: Size) -> Result<Size> {
            Ok(self.size)
        }
    }

    #[test]
    fn offsets_accumulate() -> Result<()> {
        let mut h = Harness::builder(StackPanel::new()).size(100, 100).build()?;
        let root = h.root();
        let children: Vec<ElementId> = [10, 20, 30]
            .into_iter()
            .map(|height| h.tree.mount(root, Block::new(40, height)))
            .collect::<Result<_>>()?;
        h.layout()?;

        let tops: Vec<u32> = children
            .iter()
            .map(|c| h.tree.rect(*c).map(|r| r.tl.y))
            .collect::<Result<_>>()?;
        assert_eq!(tops, vec![0, 10, 30]);
        assert_eq!(h.tree.desired(root)?, Size::new(40, 60));

        // The same offsets are exposed to ancestors for scroll math.
        let offset = h.with_control::<StackPanel, _>(root, |tree, panel| {
            panel.child_offset(tree, children[2])
        })?;
        assert_eq!(offset, Point::new(0, 30));
        Ok(())
    }

    #[test]
    fn desired_height_ignores_available_width() -> Result<()> {
        let mut h = Harness::builder(StackPanel::new()).size(100, 100).build()?;
        let root = h.root();
        for height in [10, 20, 30] {
            h.tree.mount(root, Block::new(40, height))?;
        }
        h.layout()?;
        assert_eq!(h.tree.desired(root)?.h, 60);

        h.resize(17, 100)?;
        assert_eq!(h.tree.desired(root)?.h, 60);
        Ok(())
    }

    #[test]
    fn excess_height_is_still_reported() -> Result<()> {
        let mut h = Harness::builder(StackPanel::new()).size(100, 50).build()?;
        let root = h.root();
        for _ in 0..4 {
            h.tree.mount(root, Block::new(10, 30))?;
        }
        h.layout()?;
        // 120 pixels of content against a 50 pixel display.
        assert_eq!(h.tree.desired(root)?.h, 120);
        Ok(())
    }

    #[test]
    fn hidden_children_take_no_space() -> Result<()> {
        let mut h = Harness::builder(StackPanel::new()).size(100, 100).build()?;
        let root = h.root();
        let first = h.tree.mount(root, Block::new(10, 10))?;
        let second = h.tree.mount(root, Block::new(10, 10))?;
        h.tree.set_hidden(first, true)?;
        h.layout()?;

        assert_eq!(h.tree.rect(second)?.tl.y, 0);
        assert_eq!(h.tree.desired(root)?.h, 10);
        Ok(())
    }
}
