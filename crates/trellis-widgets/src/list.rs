use geom::Size;
use trellis_core::{
    Control, ElementId, Event, EventOutcome, Multicast, NavIntent, Result, Tree,
};

use crate::{
    nav::{NavDirection, find_next_selectable},
    scroll::ScrollViewer,
    selection::{SelectionChanged, SelectionController},
    stack::StackPanel,
};

/// A selectable list: a [`ScrollViewer`] wrapping a [`StackPanel`] of
/// item controls.
///
/// The list owns the selection state and interprets navigation intents,
/// skipping items whose control reports itself non-selectable and keeping
/// the selected item scrolled into view. Unconsumable moves (off either
/// end) are left unhandled so the event can bubble to an ancestor.
pub struct ListBox {
    /// The wrapping scroll viewer, mounted on first mount.
    viewer: ElementId,
    /// The item panel inside the viewer.
    panel: ElementId,
    /// Selection state over the panel's children.
    selection: SelectionController,
}

impl ListBox {
    /// Construct an empty list box. The viewer and panel are mounted when
    /// the list itself is mounted into a tree.
    pub fn new() -> Self {
        Self {
            viewer: ElementId::default(),
            panel: ElementId::default(),
            selection: SelectionController::new(),
        }
    }

    /// The element id of the wrapping scroll viewer.
    pub fn viewer(&self) -> ElementId {
        self.viewer
    }

    /// The element id of the item panel.
    pub fn panel(&self) -> ElementId {
        self.panel
    }

    /// The item ids in collection order.
    pub fn items(&self, tree: &Tree) -> Vec<ElementId> {
        tree.children(self.panel)
    }

    /// The number of items.
    pub fn len(&self, tree: &Tree) -> usize {
        tree.children(self.panel).len()
    }

    /// True when the list holds no items.
    pub fn is_empty(&self, tree: &Tree) -> bool {
        self.len(tree) == 0
    }

    /// Append an item control to the end of the list.
    pub fn append_item(
        &mut self,
        tree: &mut Tree,
        item: impl Into<Box<dyn Control>>,
    ) -> Result<ElementId> {
        let index = self.len(tree);
        self.insert_item(tree, index, item)
    }

    /// Insert an item control at `index` (clamped to the end). A selection
    /// at or past the insertion point shifts with the items it names.
    pub fn insert_item(
        &mut self,
        tree: &mut Tree,
        index: usize,
        item: impl Into<Box<dyn Control>>,
    ) -> Result<ElementId> {
        let id = tree.insert(self.panel, index, item)?;
        let landed = tree.index_of(self.panel, id).unwrap_or(index);
        self.selection.note_inserted(landed);
        Ok(id)
    }

    /// Remove and return the item at `index`, or `None` when the index is
    /// out of bounds. Removing the selected item clears the selection.
    pub fn remove_item(
        &mut self,
        tree: &mut Tree,
        index: usize,
    ) -> Result<Option<Box<dyn Control>>> {
        let Some(item) = tree.child_at(self.panel, index) else {
            return Ok(None);
        };
        let control = tree.remove(item)?;
        self.selection.note_removed(index);
        Ok(Some(control))
    }

    /// The selected index, or [`crate::NO_SELECTION`].
    pub fn selected_index(&self) -> i32 {
        self.selection.selected_index()
    }

    /// The selected item, when the stored index is within bounds.
    pub fn selected_item(&self, tree: &Tree) -> Option<ElementId> {
        self.selection.selected_item(tree, self.panel)
    }

    /// Select an item by index. See
    /// [`SelectionController::set_selected_index`] for the contract.
    pub fn set_selected_index(&mut self, tree: &mut Tree, index: i32) -> Result<()> {
        self.selection.set_selected_index(tree, self.panel, index)
    }

    /// Select an item by identity; unknown items leave the selection
    /// untouched.
    pub fn set_selected_item(&mut self, tree: &mut Tree, item: ElementId) -> Result<()> {
        self.selection.set_selected_item(tree, self.panel, item)
    }

    /// Aggregate selection-change notifications.
    pub fn selection_changed(&self) -> &Multicast<SelectionChanged> {
        self.selection.changed()
    }

    /// Scroll the item at `index` into the viewport. Returns true when the
    /// offset moved.
    pub fn scroll_into_view(&mut self, tree: &mut Tree, index: usize) -> Result<bool> {
        let Some(item) = tree.child_at(self.panel, index) else {
            return Ok(false);
        };
        // The panel sits at the viewer's content origin, so an item's
        // panel-relative rect is already in content coordinates.
        let target = tree.rect(item)?;
        let viewer = self.viewer;
        tree.with_control_as::<ScrollViewer, _>(viewer, |tree, sv| {
            sv.scroll_into_view(tree, viewer, target)
        })?
    }

    /// Move the selection to the first selectable item and scroll to it.
    pub fn select_first(&mut self, tree: &mut Tree) -> Result<bool> {
        self.move_selection_from(tree, -1, NavDirection::Down)
    }

    /// Move the selection to the last selectable item and scroll to it.
    pub fn select_last(&mut self, tree: &mut Tree) -> Result<bool> {
        let count = self.len(tree) as i32;
        self.move_selection_from(tree, count, NavDirection::Up)
    }

    /// The selectable flag of every item, in collection order.
    fn selectable_flags(&self, tree: &Tree) -> Result<Vec<bool>> {
        tree.children(self.panel)
            .iter()
            .map(|item| tree.is_selectable(*item))
            .collect()
    }

    /// Move the selection from the stored index in `direction`.
    fn move_selection(&mut self, tree: &mut Tree, direction: NavDirection) -> Result<bool> {
        self.move_selection_from(tree, self.selection.selected_index(), direction)
    }

    /// Scan for the next selectable item from `from`, select it, and
    /// scroll it into view. Returns false, leaving all state untouched,
    /// when no selectable item lies in that direction.
    fn move_selection_from(
        &mut self,
        tree: &mut Tree,
        from: i32,
        direction: NavDirection,
    ) -> Result<bool> {
        let flags = self.selectable_flags(tree)?;
        match find_next_selectable(&flags, from, direction) {
            Some(next) => {
                self.selection.set_selected_index(tree, self.panel, next as i32)?;
                self.scroll_into_view(tree, next)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Default for ListBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for ListBox {
    fn on_mount(&mut self, tree: &mut Tree, id: ElementId) -> Result<()> {
        self.viewer = tree.mount(id, ScrollViewer::new())?;
        self.panel = tree.mount(self.viewer, StackPanel::new())?;
        Ok(())
    }

    fn arrange(&mut self, tree: &mut Tree, _id: ElementId, size: Size) -> Result<()> {
        // The viewer fills the list box; its arranged size is the viewport.
        tree.arrange_child(self.viewer, size.rect())
    }

    fn on_event(&mut self, tree: &mut Tree, _id: ElementId, event: &Event) -> Result<EventOutcome> {
        let direction = match event {
            Event::Nav(NavIntent::MoveSelectionDown) => NavDirection::Down,
            Event::Nav(NavIntent::MoveSelectionUp) => NavDirection::Up,
        };
        if self.move_selection(tree, direction)? {
            Ok(EventOutcome::Handle)
        } else {
            Ok(EventOutcome::Ignore)
        }
    }
}
