use geom::{PointI32, Rect};

use crate::{
    Result,
    render::RenderSurface,
    style::{Color, Font},
};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// A solid rectangle fill.
    Fill {
        /// Screen-space rectangle.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// A line of text.
    Text {
        /// Screen-space origin of the line box.
        origin: PointI32,
        /// The text drawn.
        text: String,
        /// Text color.
        color: Color,
    },
}

/// A render surface that records operations instead of touching pixels.
#[derive(Debug, Default)]
pub struct TestSurface {
    /// Recorded draw operations in call order.
    pub ops: Vec<DrawOp>,
    /// Regions flushed to the display.
    pub flushed: Vec<Rect>,
}

impl TestSurface {
    /// Create an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all recorded operations.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.flushed.clear();
    }

    /// True when some recorded text operation contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.ops.iter().any(|op| match op {
            DrawOp::Text { text, .. } => text.contains(needle),
            DrawOp::Fill { .. } => false,
        })
    }

    /// The screen origin of the first text operation containing `needle`.
    pub fn text_origin(&self, needle: &str) -> Option<PointI32> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text { origin, text, .. } if text.contains(needle) => Some(*origin),
            _ => None,
        })
    }
}

impl RenderSurface for TestSurface {
    fn fill(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.ops.push(DrawOp::Fill { rect, color });
        Ok(())
    }

    fn text(&mut self, origin: PointI32, text: &str, color: Color, _font: &Font) -> Result<()> {
        self.ops.push(DrawOp::Text {
            origin,
            text: text.to_string(),
            color,
        });
        Ok(())
    }

    fn flush(&mut self, region: Rect) -> Result<()> {
        self.flushed.push(region);
        Ok(())
    }
}
