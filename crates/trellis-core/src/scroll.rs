//! Clamped scroll geometry.
//!
//! A `ScrollGeometry` relates three quantities along each axis: the
//! `extent` (total content size), the `viewport` (visible size), and the
//! `offset` of the viewport into the content. Every mutation maintains
//! `0 <= offset <= max(0, extent - viewport)`; assignments outside that
//! range are clamped, never rejected.

use geom::{Point, Rect, Size};

/// Scroll state for one scrollable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollGeometry {
    /// Total content size.
    extent: Size,
    /// Visible size.
    viewport: Size,
    /// Offset of the viewport into the content.
    offset: Point,
}

impl ScrollGeometry {
    /// Build a geometry, clamping the given offset into range.
    pub fn new(extent: Size, viewport: Size, offset: Point) -> Self {
        let mut geometry = Self {
            extent,
            viewport,
            offset: Point::zero(),
        };
        geometry.scroll_to(offset.x, offset.y);
        geometry
    }

    /// The content extent.
    pub fn extent(&self) -> Size {
        self.extent
    }

    /// The visible viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// The current offset.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// The largest admissible offset on each axis.
    pub fn max_offset(&self) -> Point {
        Point {
            x: self.extent.w.saturating_sub(self.viewport.w),
            y: self.extent.h.saturating_sub(self.viewport.h),
        }
    }

    /// Set the offset, clamping into range. Returns true when the stored
    /// offset changed. Assigning an already-clamped value is a no-op.
    pub fn scroll_to(&mut self, x: u32, y: u32) -> bool {
        let max = self.max_offset();
        let clamped = Point {
            x: x.min(max.x),
            y: y.min(max.y),
        };
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    /// Shift the offset by a signed delta, clamping into range.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) -> bool {
        let target = self.offset.shift(dx, dy);
        self.scroll_to(target.x, target.y)
    }

    /// Scroll up by one viewport height.
    pub fn page_up(&mut self) -> bool {
        self.scroll_by(0, -(self.viewport.h.min(i32::MAX as u32) as i32))
    }

    /// Scroll down by one viewport height.
    pub fn page_down(&mut self) -> bool {
        self.scroll_by(0, self.viewport.h.min(i32::MAX as u32) as i32)
    }

    /// Adjust the vertical offset minimally so `target` (in content
    /// coordinates) falls within the viewport.
    ///
    /// The bottom edge is checked first: content is scrolled up just far
    /// enough to align the target's bottom with the viewport's bottom.
    /// Otherwise, if the target starts above the viewport, content is
    /// scrolled down to align its top. Only one side can apply per call; a
    /// target taller than the viewport is an accepted limitation and ends
    /// up bottom-aligned.
    pub fn scroll_into_view(&mut self, target: Rect) -> bool {
        let top = target.tl.y as i64 - self.offset.y as i64;
        let bottom = top + target.h as i64;
        let viewport_h = self.viewport.h as i64;

        if bottom > viewport_h {
            let delta = (bottom - viewport_h).min(i32::MAX as i64) as i32;
            self.scroll_by(0, delta)
        } else if top < 0 {
            let delta = top.max(i32::MIN as i64) as i32;
            self.scroll_by(0, delta)
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_on_construction() {
        let geometry = ScrollGeometry::new(
            Size::new(50, 200),
            Size::new(50, 100),
            Point::new(10, 500),
        );
        assert_eq!(geometry.offset(), Point::new(0, 100));
    }

    #[test]
    fn scroll_movement() {
        fn check(
            geometry: &ScrollGeometry,
            f: &dyn Fn(&mut ScrollGeometry) -> bool,
            offset: (u32, u32),
        ) {
            let mut g = *geometry;
            assert!(f(&mut g));
            assert_eq!(g.offset(), offset.into());
        }

        let g = ScrollGeometry::new(Size::new(100, 100), Size::new(10, 10), Point::zero());

        check(&g, &|g| g.scroll_by(10, 10), (10, 10));
        check(&g, &|g| g.page_down(), (0, 10));
        check(&g, &|g| g.scroll_to(50, 50), (50, 50));
        check(&g, &|g| g.scroll_to(150, 150), (90, 90));

        let mut pinned = g;
        assert!(!pinned.scroll_by(-20, -20));
        assert!(!pinned.page_up());
        assert_eq!(pinned.offset(), Point::zero());
    }

    #[test]
    fn idempotent_clamp() {
        let mut g = ScrollGeometry::new(Size::new(10, 300), Size::new(10, 100), Point::zero());
        assert!(g.scroll_to(0, 9999));
        assert_eq!(g.offset().y, 200);
        // Re-assigning the clamped value reports no change.
        assert!(!g.scroll_to(0, 200));
        assert!(!g.scroll_to(0, 9999));
    }

    #[test]
    fn into_view_below() {
        // Viewport height 100, item at content (top=80, bottom=140): the
        // offset grows by exactly 40 so the bottom edge aligns.
        let mut g = ScrollGeometry::new(Size::new(10, 300), Size::new(10, 100), Point::zero());
        assert!(g.scroll_into_view(Rect::new(0, 80, 10, 60)));
        assert_eq!(g.offset().y, 40);
    }

    #[test]
    fn into_view_above() {
        let mut g = ScrollGeometry::new(Size::new(10, 300), Size::new(10, 100), Point::new(0, 150));
        assert!(g.scroll_into_view(Rect::new(0, 120, 10, 20)));
        assert_eq!(g.offset().y, 120);
    }

    #[test]
    fn into_view_visible_is_noop() {
        let mut g = ScrollGeometry::new(Size::new(10, 300), Size::new(10, 100), Point::new(0, 50));
        assert!(!g.scroll_into_view(Rect::new(0, 60, 10, 30)));
        assert_eq!(g.offset().y, 50);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn offsets_stay_within_the_clamp_range(
                extent in any::<(u32, u32)>(),
                viewport in any::<(u32, u32)>(),
                target in any::<(u32, u32)>(),
            ) {
                let mut g = ScrollGeometry::new(extent.into(), viewport.into(), Point::zero());
                g.scroll_to(target.0, target.1);
                let max = g.max_offset();
                prop_assert!(g.offset().x <= max.x);
                prop_assert!(g.offset().y <= max.y);
            }

            #[test]
            fn scroll_by_round_trips_within_range(
                offset in 0u32..500,
                delta in -500i32..500,
            ) {
                let mut g = ScrollGeometry::new(
                    Size::new(10, 1000),
                    Size::new(10, 100),
                    Point::new(0, offset),
                );
                let before = g.offset().y;
                g.scroll_by(0, delta);
                g.scroll_by(0, -delta);
                // Within the clamp range a shift and its inverse cancel.
                if before as i64 + delta as i64 >= 0
                    && before as i64 + delta as i64 <= 900
                {
                    prop_assert_eq!(g.offset().y, before);
                }
            }
        }
    }
}
