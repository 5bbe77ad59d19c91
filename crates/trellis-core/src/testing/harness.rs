use geom::Size;

use super::surface::TestSurface;
use crate::{
    Result,
    control::{Control, EventOutcome},
    element::ElementId,
    event::{Event, NavIntent},
    tree::Tree,
};

/// A test harness holding a [`Tree`] and a recording [`TestSurface`].
///
/// Tests drive the UI by dispatching navigation intents and triggering
/// layout and render passes, then inspect the recorded operations or the
/// tree geometry.
pub struct Harness {
    /// The tree under test.
    pub tree: Tree,
    /// The recording surface renders land on.
    pub surface: TestSurface,
    /// Display size used for layout passes.
    size: Size,
}

/// Builder for creating a test harness with a fluent API.
pub struct HarnessBuilder<C> {
    /// Root control under test.
    root: C,
    /// Display size for the harness.
    size: Size,
}

impl<C: Control + 'static> HarnessBuilder<C> {
    /// Create a new harness builder with the given root control.
    fn new(root: C) -> Self {
        Self {
            root,
            size: Size::new(100, 100),
        }
    }

    /// Set the display size of the harness.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Build the harness and run an initial layout pass.
    pub fn build(self) -> Result<Harness> {
        let mut tree = Tree::new(self.root)?;
        tree.layout(self.size)?;
        Ok(Harness {
            tree,
            surface: TestSurface::new(),
            size: self.size,
        })
    }
}

impl Harness {
    /// Create a harness builder for the given root control.
    pub fn builder<C: Control + 'static>(root: C) -> HarnessBuilder<C> {
        HarnessBuilder::new(root)
    }

    /// Create a harness with a default display size of 100x100.
    pub fn new<C: Control + 'static>(root: C) -> Result<Self> {
        Self::builder(root).build()
    }

    /// The root element id.
    pub fn root(&self) -> ElementId {
        self.tree.root()
    }

    /// Run a layout pass at the harness display size.
    pub fn layout(&mut self) -> Result<()> {
        self.tree.layout(self.size)
    }

    /// Change the display size and re-run layout.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.size = Size::new(width, height);
        self.layout()
    }

    /// Lay out and render into the recording surface.
    pub fn render(&mut self) -> Result<()> {
        self.layout()?;
        self.tree.render(&mut self.surface)
    }

    /// Dispatch an event to a target element, after a layout pass so
    /// geometry queried by handlers is current.
    pub fn dispatch(&mut self, target: ElementId, event: &Event) -> Result<EventOutcome> {
        self.layout()?;
        self.tree.dispatch(target, event)
    }

    /// Dispatch a navigation intent to a target element.
    pub fn nav(&mut self, target: ElementId, intent: NavIntent) -> Result<EventOutcome> {
        self.dispatch(target, &Event::Nav(intent))
    }

    /// Execute a closure with mutable access to a control by element id.
    ///
    /// Panics on a stale id or a control type mismatch; this is a test
    /// convenience, not library API.
    pub fn with_control<C, R>(&mut self, id: ElementId, f: impl FnOnce(&mut Tree, &mut C) -> R) -> R
    where
        C: Control + 'static,
    {
        self.tree
            .with_control_as::<C, R>(id, f)
            .expect("harness control access failed")
    }
}
