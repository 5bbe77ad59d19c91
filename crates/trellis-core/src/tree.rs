//! The element tree arena and layout driver.
//!
//! A [`Tree`] owns every element of one logical tree in a slotmap arena.
//! Parent links are non-owning back-references; the ordered `children`
//! vectors own the structure. The tree also drives the two layout phases:
//! measurement runs bottom-up with per-element caching so a pass recomputes
//! only from the nearest invalidated ancestor, and arrangement runs
//! top-down with parents assigning child rectangles. A projection sweep
//! then maps parent-relative rectangles into screen space, shifting the
//! content of scrolled elements by the negative scroll offset.
//!
//! The tree is owned by the thread that created it. Every mutating entry
//! point verifies the calling thread and fails with
//! [`Error::ThreadAccess`] on a mismatch; cross-thread mutation is a
//! programming error here, not a condition to synchronize around.

use std::{
    any::Any,
    fmt::Write as _,
    thread::{self, ThreadId},
};

use geom::{Point, PointI32, Rect, RectI32, Size};
use slotmap::SlotMap;

use crate::{
    ControlName, Result,
    control::{Control, EventOutcome},
    element::{Element, ElementId},
    error::Error,
    event::Event,
    render::{Render, RenderSurface},
    scroll::ScrollGeometry,
};

/// An element tree bound to its owning thread.
pub struct Tree {
    /// Element storage arena.
    elements: SlotMap<ElementId, Element>,
    /// The root element, installed at construction and never removed.
    root: ElementId,
    /// The thread that owns this tree.
    owner: ThreadId,
    /// The display size given to the most recent layout pass.
    root_size: Size,
}

impl Tree {
    /// Create a tree with `root` as its root control.
    ///
    /// The calling thread becomes the tree's owning thread.
    pub fn new(root: impl Into<Box<dyn Control>>) -> Result<Self> {
        let mut elements = SlotMap::with_key();
        let root_id = elements.insert(Element::new(root.into(), None));
        let mut tree = Self {
            elements,
            root: root_id,
            owner: thread::current().id(),
            root_size: Size::zero(),
        };
        tree.with_control(root_id, |t, c| c.on_mount(t, root_id))??;
        Ok(tree)
    }

    /// The root element id.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// The number of live elements.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Fail fast when called from a thread other than the owner.
    fn verify_access(&self) -> Result<()> {
        if thread::current().id() == self.owner {
            Ok(())
        } else {
            Err(Error::ThreadAccess)
        }
    }

    /// Immutable element lookup.
    fn element(&self, id: ElementId) -> Result<&Element> {
        self.elements.get(id).ok_or(Error::ElementNotFound(id))
    }

    /// Mutable element lookup.
    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.elements.get_mut(id).ok_or(Error::ElementNotFound(id))
    }

    // ----- structure -----

    /// Mount a control as the last child of `parent`.
    pub fn mount(
        &mut self,
        parent: ElementId,
        control: impl Into<Box<dyn Control>>,
    ) -> Result<ElementId> {
        let index = self.element(parent)?.children.len();
        self.insert(parent, index, control)
    }

    /// Mount a control as a child of `parent` at `index` (clamped to the
    /// end of the child list).
    pub fn insert(
        &mut self,
        parent: ElementId,
        index: usize,
        control: impl Into<Box<dyn Control>>,
    ) -> Result<ElementId> {
        self.verify_access()?;
        self.element(parent)?;

        let element = Element::new(control.into(), Some(parent));
        let name = element.name.clone();
        let id = self.elements.insert(element);
        if let Some(parent_el) = self.elements.get_mut(parent) {
            let clamped = index.min(parent_el.children.len());
            parent_el.children.insert(clamped, id);
        }
        self.invalidate_measure(parent)?;
        tracing::debug!(%name, ?id, ?parent, index, "mounted control");

        self.with_control(id, |tree, c| c.on_mount(tree, id))??;
        Ok(id)
    }

    /// Remove an element and its whole subtree, returning the removed
    /// control.
    ///
    /// The root cannot be removed, and removing an element from within its
    /// own hook is an error.
    pub fn remove(&mut self, id: ElementId) -> Result<Box<dyn Control>> {
        self.verify_access()?;
        if id == self.root {
            return Err(Error::InvalidState("cannot remove the root element".into()));
        }
        let parent = self.element(id)?.parent;
        if let Some(pid) = parent
            && let Some(parent_el) = self.elements.get_mut(pid)
        {
            parent_el.children.retain(|c| *c != id);
        }

        let mut removed = None;
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(el) = self.elements.remove(cur) {
                stack.extend(el.children.iter().copied());
                if cur == id {
                    removed = el.control;
                }
            }
        }

        if let Some(pid) = parent {
            self.invalidate_measure(pid)?;
        }
        tracing::debug!(?id, "removed element");
        removed.ok_or_else(|| Error::Internal(format!("control for {id:?} is already borrowed")))
    }

    /// The ordered children of an element; empty for a stale id.
    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.elements
            .get(id)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    /// The child of `parent` at `index`, if any.
    pub fn child_at(&self, parent: ElementId, index: usize) -> Option<ElementId> {
        self.elements.get(parent)?.children.get(index).copied()
    }

    /// Identity lookup of `child` within `parent`'s child list.
    pub fn index_of(&self, parent: ElementId, child: ElementId) -> Option<usize> {
        self.elements
            .get(parent)?
            .children
            .iter()
            .position(|c| *c == child)
    }

    /// The logical parent of an element, if any.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|e| e.parent)
    }

    // ----- element state -----

    /// The cached desired size from the last measure.
    pub fn desired(&self, id: ElementId) -> Result<Size> {
        Ok(self.element(id)?.desired)
    }

    /// The arranged bounds relative to the parent's content origin.
    pub fn rect(&self, id: ElementId) -> Result<Rect> {
        Ok(self.element(id)?.rect)
    }

    /// The projected absolute screen bounds from the last projection sweep.
    pub fn screen_rect(&self, id: ElementId) -> Result<RectI32> {
        Ok(self.element(id)?.screen)
    }

    /// The scrollable content extent.
    pub fn canvas(&self, id: ElementId) -> Result<Size> {
        Ok(self.element(id)?.canvas)
    }

    /// The current scroll offset.
    pub fn scroll_offset(&self, id: ElementId) -> Result<Point> {
        Ok(self.element(id)?.scroll)
    }

    /// The element's scroll geometry: extent, viewport, and offset.
    pub fn scroll_geometry(&self, id: ElementId) -> Result<ScrollGeometry> {
        let el = self.element(id)?;
        Ok(ScrollGeometry::new(el.canvas, el.rect.size(), el.scroll))
    }

    /// The control name captured at mount.
    pub fn name(&self, id: ElementId) -> Result<ControlName> {
        Ok(self.element(id)?.name.clone())
    }

    /// Is the element hidden?
    pub fn is_hidden(&self, id: ElementId) -> Result<bool> {
        Ok(self.element(id)?.hidden)
    }

    /// May selection land on this element's control?
    pub fn is_selectable(&self, id: ElementId) -> Result<bool> {
        let el = self.element(id)?;
        el.control
            .as_ref()
            .map(|c| c.selectable())
            .ok_or_else(|| Error::Internal(format!("control for {id:?} is already borrowed")))
    }

    /// Hide or reveal an element and its subtree.
    pub fn set_hidden(&mut self, id: ElementId, hidden: bool) -> Result<()> {
        self.verify_access()?;
        if self.element(id)?.hidden == hidden {
            return Ok(());
        }
        self.element_mut(id)?.hidden = hidden;
        self.invalidate_measure(id)
    }

    /// Set the scrollable content extent for an element.
    ///
    /// Intended for scrollable containers during their arrange phase; the
    /// scroll offset is re-clamped against the new extent when the phase
    /// completes.
    pub fn set_canvas(&mut self, id: ElementId, extent: Size) -> Result<()> {
        self.verify_access()?;
        self.element_mut(id)?.canvas = extent;
        Ok(())
    }

    /// Mark an element's desired size stale and propagate the mark to the
    /// logical parent chain, stopping at an already-dirty ancestor so a
    /// later pass recomputes from the nearest valid point rather than the
    /// root.
    pub fn invalidate_measure(&mut self, id: ElementId) -> Result<()> {
        self.verify_access()?;
        let el = self.element_mut(id)?;
        el.needs_measure = true;
        el.needs_arrange = true;
        let mut cur = el.parent;
        while let Some(pid) = cur {
            let Some(parent) = self.elements.get_mut(pid) else {
                break;
            };
            if parent.needs_measure {
                break;
            }
            parent.needs_measure = true;
            parent.needs_arrange = true;
            cur = parent.parent;
        }
        Ok(())
    }

    // ----- control access -----

    /// Run a closure with the element's control and the tree.
    ///
    /// The control is taken out of its slot for the duration of the call,
    /// so the closure may re-enter the tree freely; accessing the same
    /// element's control recursively is an error.
    pub fn with_control<R>(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut Self, &mut dyn Control) -> R,
    ) -> Result<R> {
        self.verify_access()?;
        let slot = self.elements.get_mut(id).ok_or(Error::ElementNotFound(id))?;
        let mut control = slot
            .control
            .take()
            .ok_or_else(|| Error::Internal(format!("control for {id:?} is already borrowed")))?;
        let out = f(self, control.as_mut());
        if let Some(el) = self.elements.get_mut(id) {
            el.control = Some(control);
        }
        Ok(out)
    }

    /// Run a closure with the element's control downcast to `C`.
    pub fn with_control_as<C: Control, R>(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut Self, &mut C) -> R,
    ) -> Result<R> {
        self.with_control(id, |tree, control| {
            let any = control as &mut dyn Any;
            match any.downcast_mut::<C>() {
                Some(concrete) => Ok(f(tree, concrete)),
                None => Err(Error::Internal(format!("control type mismatch for {id:?}"))),
            }
        })?
    }

    // ----- layout -----

    /// Measure an element against an available-size constraint, returning
    /// its desired size.
    ///
    /// Clean elements re-measured with an unchanged constraint return the
    /// cached result; hidden elements measure as zero. Called by parent
    /// controls from their own measure phase, and by the layout driver for
    /// the root.
    pub fn measure_child(&mut self, id: ElementId, available: Size) -> Result<Size> {
        let hidden = {
            let el = self.element(id)?;
            if !el.needs_measure && el.last_available == Some(available) {
                return Ok(el.desired);
            }
            el.hidden
        };

        let desired = if hidden {
            Size::zero()
        } else {
            self.with_control(id, |tree, c| c.measure(tree, id, available))??
        };

        let el = self.element_mut(id)?;
        el.desired = desired;
        el.last_available = Some(available);
        el.needs_measure = false;
        el.needs_arrange = true;
        tracing::trace!(?id, ?available, ?desired, "measured");
        Ok(desired)
    }

    /// Assign an element its final rectangle, relative to the parent's
    /// content origin, and let its control place children.
    ///
    /// Re-arranging a clean element with an unchanged rectangle is a no-op.
    pub fn arrange_child(&mut self, id: ElementId, rect: Rect) -> Result<()> {
        let (skip, hidden) = {
            let el = self.element_mut(id)?;
            let skip = !el.needs_arrange && el.rect == rect;
            el.rect = rect;
            (skip, el.hidden)
        };
        if skip {
            return Ok(());
        }
        if hidden {
            self.element_mut(id)?.needs_arrange = false;
            return Ok(());
        }

        // Default extent; scrollable containers override via set_canvas
        // during their arrange.
        self.element_mut(id)?.canvas = rect.size();

        let size = rect.size();
        self.with_control(id, |tree, c| c.arrange(tree, id, size))??;

        self.element_mut(id)?.needs_arrange = false;
        self.clamp_scroll(id);
        tracing::trace!(?id, ?rect, "arranged");
        Ok(())
    }

    /// Run a full layout pass for a display of the given size.
    ///
    /// Measurement runs bottom-up from the nearest dirty elements,
    /// arrangement top-down, and a projection sweep refreshes screen-space
    /// geometry. The root always fills the display.
    pub fn layout(&mut self, available: Size) -> Result<()> {
        self.verify_access()?;
        let root = self.root;
        self.measure_child(root, available)?;
        self.arrange_child(root, available.rect())?;
        self.root_size = available;
        self.reproject();
        Ok(())
    }

    /// Silently re-clamp an element's scroll offset after its extent or
    /// viewport changed.
    fn clamp_scroll(&mut self, id: ElementId) {
        if let Some(el) = self.elements.get_mut(id) {
            let geometry = ScrollGeometry::new(el.canvas, el.rect.size(), el.scroll);
            el.scroll = geometry.offset();
        }
    }

    // ----- scrolling -----

    /// Set an element's scroll offset, clamped into range. Returns the
    /// (old, new) offsets; they are equal when the write was a no-op.
    pub fn scroll_to(&mut self, id: ElementId, x: u32, y: u32) -> Result<(Point, Point)> {
        self.verify_access()?;
        let (old, new) = {
            let el = self.element(id)?;
            let mut geometry = ScrollGeometry::new(el.canvas, el.rect.size(), el.scroll);
            let old = geometry.offset();
            geometry.scroll_to(x, y);
            (old, geometry.offset())
        };
        if new != old {
            self.element_mut(id)?.scroll = new;
            tracing::debug!(?id, ?old, ?new, "scrolled");
            self.reproject();
        }
        Ok((old, new))
    }

    /// Shift an element's scroll offset by a signed delta, clamped into
    /// range. Returns the (old, new) offsets.
    pub fn scroll_by(&mut self, id: ElementId, dx: i32, dy: i32) -> Result<(Point, Point)> {
        let target = {
            let el = self.element(id)?;
            el.scroll.shift(dx, dy)
        };
        self.scroll_to(id, target.x, target.y)
    }

    // ----- projection -----

    /// Refresh screen-space geometry for the whole tree.
    fn reproject(&mut self) {
        let root = self.root;
        let clip = self.root_size.rect();
        self.project(root, PointI32::zero(), clip);
    }

    /// Project one element and its subtree into screen space.
    ///
    /// `origin` is the screen position of the parent's content origin,
    /// already shifted by the parent's scroll offset; `clip` is the
    /// visible region accumulated from all ancestors.
    fn project(&mut self, id: ElementId, origin: PointI32, clip: Rect) {
        let Some(el) = self.elements.get_mut(id) else {
            return;
        };
        if el.hidden {
            el.screen = RectI32::default();
            el.clip = Rect::zero();
            return;
        }
        let screen = RectI32::from_local(el.rect, origin);
        let visible = screen.intersect_rect(clip).unwrap_or_else(Rect::zero);
        el.screen = screen;
        el.clip = visible;

        // Content scrolls opposite to the offset.
        let child_origin = PointI32::new(
            screen.tl.x.saturating_sub_unsigned(el.scroll.x),
            screen.tl.y.saturating_sub_unsigned(el.scroll.y),
        );
        let children = el.children.clone();
        for child in children {
            self.project(child, child_origin, visible);
        }
    }

    // ----- events -----

    /// Deliver an event to `target`, bubbling it up through ancestors
    /// until a control handles it.
    pub fn dispatch(&mut self, target: ElementId, event: &Event) -> Result<EventOutcome> {
        self.verify_access()?;
        let mut cur = Some(target);
        while let Some(id) = cur {
            let outcome = self.with_control(id, |tree, c| c.on_event(tree, id, event))??;
            if outcome == EventOutcome::Handle {
                return Ok(EventOutcome::Handle);
            }
            cur = self.parent(id);
        }
        Ok(EventOutcome::Ignore)
    }

    // ----- rendering -----

    /// Render the tree onto a native surface and flush the display region.
    pub fn render(&mut self, surface: &mut dyn RenderSurface) -> Result<()> {
        self.verify_access()?;
        self.reproject();
        let root = self.root;
        self.render_element(root, surface)?;
        surface.flush(self.root_size.rect())
    }

    /// Render one element and recurse into its children.
    fn render_element(&mut self, id: ElementId, surface: &mut dyn RenderSurface) -> Result<()> {
        let (hidden, origin, size, clip, children) = {
            let el = self.element(id)?;
            (
                el.hidden,
                el.screen.tl,
                el.rect.size(),
                el.clip,
                el.children.clone(),
            )
        };
        if hidden || clip.is_zero() {
            return Ok(());
        }
        self.with_control(id, |_tree, c| {
            let mut frame = Render::new(&mut *surface, origin, size, clip);
            c.render(&mut frame)
        })??;
        for child in children {
            self.render_element(child, surface)?;
        }
        Ok(())
    }

    // ----- diagnostics -----

    /// A human-readable dump of the tree's geometry, one element per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_element(self.root, 0, &mut out);
        out
    }

    /// Append one element's dump line and recurse.
    fn dump_element(&self, id: ElementId, depth: usize, out: &mut String) {
        let Some(el) = self.elements.get(id) else {
            return;
        };
        writeln!(
            out,
            "{:indent$}{} rect={:?} desired={:?} canvas={:?} scroll={:?}",
            "",
            el.name,
            el.rect,
            el.desired,
            el.canvas,
            el.scroll,
            indent = depth * 2
        )
        .ok();
        for child in &el.children {
            self.dump_element(*child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A leaf with a fixed desired size.
    struct Fixed {
        /// The size reported from measure.
        size: Size,
    }

    impl Fixed {
        /// Construct a fixed-size leaf.
        fn new(w: u32, h: u32) -> Self {
            Self {
                size: Size::new(w, h),
            }
        }
    }

    impl Control for Fixed {
        fn measure(&mut self, _tree: &mut Tree, _id: ElementId, _available: Size) -> Result<Size> {
            Ok(self.size)
        }
    }

    /// A container that counts how often it is measured.
    struct Counting {
        /// Measure invocations observed.
        hits: usize,
    }

    impl Counting {
        /// Construct with a zero hit count.
        fn new() -> Self {
            Self { hits: 0 }
        }
    }

    impl Control for Counting {
        fn measure(&mut self, tree: &mut Tree, id: ElementId, available: Size) -> Result<Size> {
            self.hits += 1;
            let mut desired = Size::zero();
            for child in tree.children(id) {
                desired = desired.max(tree.measure_child(child, available)?);
            }
            Ok(desired)
        }
    }

    /// Read the hit count of a `Counting` element.
    fn hits(tree: &mut Tree, id: ElementId) -> usize {
        tree.with_control_as::<Counting, _>(id, |_, c| c.hits).unwrap()
    }

    #[test]
    fn mount_links_parent_and_children() -> Result<()> {
        let mut tree = Tree::new(Counting::new())?;
        let root = tree.root();
        let first = tree.mount(root, Fixed::new(10, 10))?;
        let second = tree.mount(root, Fixed::new(20, 20))?;

        assert_eq!(tree.children(root), vec![first, second]);
        assert_eq!(tree.parent(first), Some(root));
        assert_eq!(tree.index_of(root, second), Some(1));
        assert_eq!(tree.child_at(root, 0), Some(first));
        assert_eq!(tree.element_count(), 3);
        assert_eq!(tree.name(root)?, "counting");
        assert!(tree.dump().contains("fixed"));
        Ok(())
    }

    #[test]
    fn insert_orders_children() -> Result<()> {
        let mut tree = Tree::new(Counting::new())?;
        let root = tree.root();
        let tail = tree.mount(root, Fixed::new(1, 1))?;
        let head = tree.insert(root, 0, Fixed::new(2, 2))?;
        let clamped = tree.insert(root, 99, Fixed::new(3, 3))?;

        assert_eq!(tree.children(root), vec![head, tail, clamped]);
        Ok(())
    }

    #[test]
    fn remove_detaches_subtree() -> Result<()> {
        let mut tree = Tree::new(Counting::new())?;
        let root = tree.root();
        let branch = tree.mount(root, Counting::new())?;
        let leaf = tree.mount(branch, Fixed::new(5, 5))?;

        let _control = tree.remove(branch)?;
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.rect(leaf), Err(Error::ElementNotFound(leaf)));
        assert_eq!(tree.element_count(), 1);
        Ok(())
    }

    #[test]
    fn remove_root_is_rejected() -> Result<()> {
        let mut tree = Tree::new(Counting::new())?;
        let root = tree.root();
        assert!(matches!(tree.remove(root), Err(Error::InvalidState(_))));
        Ok(())
    }

    #[test]
    fn measure_is_cached_until_invalidated() -> Result<()> {
        let mut tree = Tree::new(Counting::new())?;
        let root = tree.root();
        let branch = tree.mount(root, Counting::new())?;
        let sibling = tree.mount(root, Counting::new())?;
        let leaf = tree.mount(branch, Fixed::new(5, 5))?;

        let display = Size::new(100, 100);
        tree.layout(display)?;
        assert_eq!(hits(&mut tree, root), 1);
        assert_eq!(hits(&mut tree, branch), 1);

        // A clean second pass hits the root cache and never descends.
        tree.layout(display)?;
        assert_eq!(hits(&mut tree, root), 1);

        // Invalidation recomputes the dirty chain but not the sibling.
        tree.invalidate_measure(leaf)?;
        tree.layout(display)?;
        assert_eq!(hits(&mut tree, root), 2);
        assert_eq!(hits(&mut tree, branch), 2);
        assert_eq!(hits(&mut tree, sibling), 1);
        Ok(())
    }

    #[test]
    fn hidden_elements_measure_as_zero() -> Result<()> {
        let mut tree = Tree::new(Counting::new())?;
        let root = tree.root();
        let leaf = tree.mount(root, Fixed::new(30, 30))?;

        tree.layout(Size::new(100, 100))?;
        assert_eq!(tree.desired(leaf)?, Size::new(30, 30));

        tree.set_hidden(leaf, true)?;
        tree.layout(Size::new(100, 100))?;
        assert_eq!(tree.desired(leaf)?, Size::zero());
        assert_eq!(tree.desired(root)?, Size::zero());
        Ok(())
    }

    #[test]
    fn composite_controls_mount_children() -> Result<()> {
        /// Mounts one fixed child from its mount hook.
        struct Composite;

        impl Control for Composite {
            fn on_mount(&mut self, tree: &mut Tree, id: ElementId) -> Result<()> {
                tree.mount(id, Fixed::new(1, 1))?;
                Ok(())
            }
        }

        let mut tree = Tree::new(Composite)?;
        assert_eq!(tree.children(tree.root()).len(), 1);
        Ok(())
    }

    #[test]
    fn foreign_thread_mutation_fails() -> Result<()> {
        let mut tree = Tree::new(Counting::new())?;
        thread::scope(|scope| {
            scope
                .spawn(|| {
                    assert_eq!(tree.layout(Size::new(10, 10)), Err(Error::ThreadAccess));
                    let root = tree.root();
                    assert_eq!(
                        tree.mount(root, Fixed::new(1, 1)).unwrap_err(),
                        Error::ThreadAccess
                    );
                })
                .join()
                .unwrap();
        });
        // The owning thread still has full access.
        tree.layout(Size::new(10, 10))?;
        Ok(())
    }

    #[test]
    fn scroll_is_clamped_and_projected() -> Result<()> {
        let mut tree = Tree::new(Counting::new())?;
        let root = tree.root();
        let leaf = tree.mount(root, Fixed::new(40, 300))?;
        tree.layout(Size::new(40, 100))?;

        // Root viewport is 40x100; give it a taller canvas to scroll over.
        tree.set_canvas(root, Size::new(40, 300))?;
        let (old, new) = tree.scroll_to(root, 0, 9999)?;
        assert_eq!(old, Point::zero());
        assert_eq!(new, Point::new(0, 200));

        // The child is projected shifted by the negative offset.
        assert_eq!(tree.screen_rect(leaf)?.tl.y, -200);

        // Assigning the clamped value again reports no change.
        let (old, new) = tree.scroll_to(root, 0, 200)?;
        assert_eq!(old, new);
        Ok(())
    }
}
