//! The `Control` trait: behavior attached to elements in the tree arena.

use std::any::{Any, type_name};

use geom::Size;

use crate::{
    ControlName, Result,
    element::ElementId,
    event::Event,
    render::Render,
    tree::Tree,
};

/// The result of an event handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was processed and propagation stops.
    Handle,
    /// The event was not handled and will bubble up the tree.
    Ignore,
}

/// Controls are the behavior attached to elements in the [`Tree`] arena.
///
/// A control never stores its own position: parents assign child rectangles
/// during arrangement, and the tree keeps the resulting geometry on the
/// element record. Reentrant tree access during the hooks below is safe;
/// the control's own slot is temporarily vacant while a hook runs.
pub trait Control: Any + Send {
    /// Name used in diagnostics and tree dumps.
    fn name(&self) -> ControlName {
        let name = type_name::<Self>();
        let short = name.rsplit("::").next().unwrap_or(name);
        ControlName::convert(short)
    }

    /// Report the size this control wants given an available constraint.
    ///
    /// Children must be measured (via [`Tree::measure_child`]) before the
    /// parent can finalize its own desired size. The default envelops all
    /// children measured against the same constraint.
    fn measure(&mut self, tree: &mut Tree, id: ElementId, available: Size) -> Result<Size> {
        let mut desired = Size::zero();
        for child in tree.children(id) {
            desired = desired.max(tree.measure_child(child, available)?);
        }
        Ok(desired)
    }

    /// Place children within this control's final size.
    ///
    /// The control's own rectangle has already been assigned by its parent;
    /// `size` is that rectangle's size. The default gives every child its
    /// desired size at the content origin.
    fn arrange(&mut self, tree: &mut Tree, id: ElementId, _size: Size) -> Result<()> {
        for child in tree.children(id) {
            let desired = tree.desired(child)?;
            tree.arrange_child(child, desired.rect())?;
        }
        Ok(())
    }

    /// Render this control's own content. Does not render children.
    fn render(&mut self, _r: &mut Render<'_>) -> Result<()> {
        Ok(())
    }

    /// Handle a dispatched event. Unhandled events bubble to the parent.
    fn on_event(
        &mut self,
        _tree: &mut Tree,
        _id: ElementId,
        _event: &Event,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    /// Called exactly once when the control is mounted into the tree.
    fn on_mount(&mut self, _tree: &mut Tree, _id: ElementId) -> Result<()> {
        Ok(())
    }

    /// May selection logic land on this control when it is a list item?
    fn selectable(&self) -> bool {
        false
    }

    /// Notification that this control's selected state changed.
    fn set_selected(&mut self, _selected: bool) {}
}

/// Convert controls into boxed trait objects.
impl<C> From<C> for Box<dyn Control>
where
    C: Control + 'static,
{
    fn from(control: C) -> Self {
        Box::new(control)
    }
}
