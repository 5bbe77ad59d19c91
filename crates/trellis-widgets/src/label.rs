use geom::{Point, Size};
use trellis_core::{Color, Control, ElementId, Font, Render, Result, Tree};

/// A single line of text.
///
/// Labels are the standard list item control: they carry a selectable
/// flag, track their selected state from the selection callbacks, and
/// render inverted while selected. Desired size comes straight from the
/// font metrics.
pub struct Label {
    /// The displayed text.
    text: String,
    /// Font metrics used for measurement and drawing.
    font: Font,
    /// Text color.
    foreground: Color,
    /// Fill color behind the text.
    background: Color,
    /// May selection land on this label?
    selectable: bool,
    /// Current selected state, driven by the selection controller.
    selected: bool,
}

impl Label {
    /// Construct a selectable label with default colors and font.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
            foreground: Color::WHITE,
            background: Color::BLACK,
            selectable: true,
            selected: false,
        }
    }

    /// Set the font.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Set the foreground and background colors.
    pub fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    /// Set whether selection may land on this label. Non-selectable labels
    /// serve as separators and captions inside lists.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and invalidate layout so the new size takes
    /// effect on the next pass.
    pub fn set_text(
        &mut self,
        tree: &mut Tree,
        id: ElementId,
        text: impl Into<String>,
    ) -> Result<()> {
        self.text = text.into();
        tree.invalidate_measure(id)
    }

    /// Current selected state.
    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

impl Control for Label {
    fn measure(&mut self, _tree: &mut Tree, _id: ElementId, _available: Size) -> Result<Size> {
        Ok(self.font.measure(&self.text))
    }

    fn render(&mut self, r: &mut Render<'_>) -> Result<()> {
        // Selected items render inverted.
        let (fg, bg) = if self.selected {
            (self.background, self.foreground)
        } else {
            (self.foreground, self.background)
        };
        r.fill(r.bounds(), bg)?;
        r.text(Point::zero(), &self.text, fg, &self.font)
    }

    fn selectable(&self) -> bool {
        self.selectable
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::testing::{DrawOp, Harness};

    #[test]
    fn measures_from_font_metrics() -> Result<()> {
        let label = Label::new("abc").with_font(Font::new(10, 5));
        let mut h = Harness::new(label)?;
        // The root fills the display, but its desired size is the text box.
        assert_eq!(h.tree.desired(h.root())?, Size::new(15, 10));
        Ok(())
    }

    #[test]
    fn renders_text_over_background() -> Result<()> {
        let mut h = Harness::new(Label::new("hello"))?;
        h.render()?;
        assert!(h.surface.contains_text("hello"));
        assert!(matches!(h.surface.ops.first(), Some(DrawOp::Fill { .. })));
        Ok(())
    }

    #[test]
    fn selection_inverts_colors() -> Result<()> {
        let mut h = Harness::new(Label::new("x"))?;
        let root = h.root();
        h.with_control::<Label, _>(root, |_, label| label.set_selected(true));
        h.render()?;
        let fill = h.surface.ops.first().cloned();
        assert!(
            matches!(fill, Some(DrawOp::Fill { color, .. }) if color == Color::WHITE),
            "selected label fills with the foreground color"
        );
        Ok(())
    }
}
