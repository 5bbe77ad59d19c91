//! Integration tests for rendering the composite list through the
//! recording surface.

#[cfg(test)]
mod tests {
    use trellis_core::{NavIntent, Result, testing::Harness};
    use trellis_widgets::{Label, ListBox};

    /// A list box harness holding `count` default labels.
    fn list_harness(count: usize, size: (u32, u32)) -> Result<Harness> {
        let mut h = Harness::builder(ListBox::new()).size(size.0, size.1).build()?;
        let root = h.root();
        for i in 0..count {
            h.with_control::<ListBox, _>(root, |tree, lb| {
                lb.append_item(tree, Label::new(format!("item {i}")))
            })?;
        }
        Ok(h)
    }

    #[test]
    fn visible_items_are_drawn_and_clipped_ones_skipped() -> Result<()> {
        // Labels are 12 pixels tall; a 40 pixel viewport shows items 0..4.
        let mut h = list_harness(10, (80, 40))?;
        h.render()?;

        assert!(h.surface.contains_text("item 0"));
        assert!(h.surface.contains_text("item 3"));
        assert!(!h.surface.contains_text("item 9"));
        assert_eq!(h.surface.flushed.len(), 1);
        Ok(())
    }

    #[test]
    fn scrolling_reveals_later_items() -> Result<()> {
        let mut h = list_harness(10, (80, 40))?;
        let root = h.root();
        for _ in 0..10 {
            h.nav(root, NavIntent::MoveSelectionDown)?;
        }
        h.surface.clear();
        h.render()?;

        assert!(h.surface.contains_text("item 9"));
        assert!(!h.surface.contains_text("item 0"));

        // The last item is bottom-aligned: 10 items of 12 pixels against a
        // 40 pixel viewport puts its line box at y = 28.
        assert_eq!(h.surface.text_origin("item 9").map(|p| p.y), Some(28));
        Ok(())
    }
}
