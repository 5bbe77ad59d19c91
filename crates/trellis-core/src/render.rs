//! Render abstraction over the native graphics engine.
//!
//! The core never touches pixels. Controls draw in their own local
//! coordinates through a [`Render`] frame, which projects every operation
//! into screen space, clips it against the visible region computed during
//! projection, and forwards the result to the engine-supplied
//! [`RenderSurface`].

use geom::{Point, PointI32, Rect, RectI32, Size};

use crate::{
    Result,
    style::{Color, Font},
};

/// The drawing operations the native engine must supply.
pub trait RenderSurface {
    /// Fill a screen-space rectangle with a solid color.
    fn fill(&mut self, rect: Rect, color: Color) -> Result<()>;

    /// Draw one line of text with its top-left corner at `origin`.
    ///
    /// The origin is signed: text may start above or left of the display
    /// edge when scrolled, and the engine clips glyphs itself.
    fn text(&mut self, origin: PointI32, text: &str, color: Color, font: &Font) -> Result<()>;

    /// Push a finished screen region out to the display.
    fn flush(&mut self, region: Rect) -> Result<()>;
}

/// A per-control drawing frame.
///
/// Local coordinates are relative to the control's content origin; the
/// frame owns the translation to screen space and the clip.
pub struct Render<'a> {
    /// The native surface being drawn to.
    surface: &'a mut dyn RenderSurface,
    /// Screen position of the control's content origin.
    origin: PointI32,
    /// The control's arranged size, bounding its local coordinates.
    size: Size,
    /// Visible screen region for this control.
    clip: Rect,
}

impl<'a> Render<'a> {
    /// Create a frame for a control of `size` whose content origin
    /// projects to `origin` with visible region `clip`.
    pub fn new(surface: &'a mut dyn RenderSurface, origin: PointI32, size: Size, clip: Rect) -> Self {
        Self {
            surface,
            origin,
            size,
            clip,
        }
    }

    /// The control's full local bounds, origin at (0, 0).
    pub fn bounds(&self) -> Rect {
        self.size.rect()
    }

    /// Fill a local-coordinate rectangle.
    pub fn fill(&mut self, rect: Rect, color: Color) -> Result<()> {
        let screen = RectI32::from_local(rect, self.origin);
        if let Some(visible) = screen.intersect_rect(self.clip) {
            self.surface.fill(visible, color)?;
        }
        Ok(())
    }

    /// Draw one line of text at a local-coordinate origin.
    ///
    /// Clipping is coarse: the call is skipped entirely when the line box
    /// misses the visible region, and otherwise forwarded whole, since the
    /// engine clips at glyph granularity.
    pub fn text(&mut self, origin: Point, text: &str, color: Color, font: &Font) -> Result<()> {
        let line = font.measure(text).rect().at(origin);
        let screen = RectI32::from_local(line, self.origin);
        if screen.intersect_rect(self.clip).is_some() {
            self.surface.text(screen.tl, text, color, font)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawOp, TestSurface};

    #[test]
    fn fill_is_clipped_to_the_visible_region() -> Result<()> {
        let mut surface = TestSurface::new();
        let mut frame = Render::new(
            &mut surface,
            PointI32::new(-5, 0),
            Size::new(10, 10),
            Rect::new(0, 0, 20, 20),
        );

        frame.fill(frame.bounds(), Color::WHITE)?;
        assert_eq!(
            surface.ops,
            vec![DrawOp::Fill {
                rect: Rect::new(0, 0, 5, 10),
                color: Color::WHITE,
            }]
        );
        Ok(())
    }

    #[test]
    fn offscreen_text_is_skipped() -> Result<()> {
        let mut surface = TestSurface::new();
        let mut frame = Render::new(
            &mut surface,
            PointI32::new(0, -100),
            Size::new(20, 20),
            Rect::new(0, 0, 20, 20),
        );

        frame.text(Point::zero(), "gone", Color::WHITE, &Font::default())?;
        assert!(surface.ops.is_empty());
        Ok(())
    }
}
