use super::{PointI32, Rect};

/// A rectangle with a signed origin and unsigned size.
///
/// Used for screen-space projections: a scrolled element's bounds can start
/// above or to the left of the display origin while still being partially
/// visible.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct RectI32 {
    /// Top-left corner.
    pub tl: PointI32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl RectI32 {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            tl: PointI32 { x, y },
            w,
            h,
        }
    }

    /// Does this rect have a zero size?
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Place an unsigned local rectangle at a signed screen origin.
    pub fn from_local(r: Rect, origin: PointI32) -> Self {
        Self {
            tl: PointI32 {
                x: origin.x.saturating_add_unsigned(r.tl.x),
                y: origin.y.saturating_add_unsigned(r.tl.y),
            },
            w: r.w,
            h: r.h,
        }
    }

    /// Shift the rectangle by a signed offset.
    pub fn translate(&self, x: i32, y: i32) -> Self {
        Self {
            tl: PointI32 {
                x: self.tl.x.saturating_add(x),
                y: self.tl.y.saturating_add(y),
            },
            w: self.w,
            h: self.h,
        }
    }

    /// Intersect this signed rect with an unsigned rect in the same
    /// coordinate space. The result, if any, lies in the non-negative
    /// quadrant and is returned unsigned.
    pub fn intersect_rect(&self, other: Rect) -> Option<Rect> {
        let left = self.tl.x as i64;
        let top = self.tl.y as i64;
        let right = left + self.w as i64;
        let bottom = top + self.h as i64;

        let other_left = other.tl.x as i64;
        let other_top = other.tl.y as i64;
        let other_right = other_left + other.w as i64;
        let other_bottom = other_top + other.h as i64;

        let inter_left = left.max(other_left);
        let inter_top = top.max(other_top);
        let inter_right = right.min(other_right);
        let inter_bottom = bottom.min(other_bottom);

        if inter_right <= inter_left || inter_bottom <= inter_top {
            return None;
        }

        Some(Rect::new(
            inter_left as u32,
            inter_top as u32,
            (inter_right - inter_left) as u32,
            (inter_bottom - inter_top) as u32,
        ))
    }
}

impl From<Rect> for RectI32 {
    fn from(r: Rect) -> Self {
        Self {
            tl: PointI32 {
                x: r.tl.x as i32,
                y: r.tl.y as i32,
            },
            w: r.w,
            h: r.h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_rect() {
        let scrolled = RectI32::new(-5, -5, 10, 10);
        let screen = Rect::new(0, 0, 100, 100);
        assert_eq!(scrolled.intersect_rect(screen), Some(Rect::new(0, 0, 5, 5)));

        let offscreen = RectI32::new(-20, 0, 10, 10);
        assert_eq!(offscreen.intersect_rect(screen), None);
    }

    #[test]
    fn from_local() {
        let r = RectI32::from_local(Rect::new(2, 3, 4, 5), PointI32::new(-1, -1));
        assert_eq!(r, RectI32::new(1, 2, 4, 5));
    }
}
