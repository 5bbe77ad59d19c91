use trellis_core::{ElementId, Error, Multicast, Result, Tree};

/// The sentinel index meaning "nothing is selected".
pub const NO_SELECTION: i32 = -1;

/// Notification payload for a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged {
    /// The previously selected index, or [`NO_SELECTION`].
    pub old: i32,
    /// The newly selected index, or [`NO_SELECTION`].
    pub new: i32,
}

/// Single-selection state over a panel's item collection.
///
/// The controller stores a bare index; items are resolved against the
/// panel's current children at each operation, so the index tolerates
/// external mutation of the collection (a stale index simply resolves to
/// no item). An item that loses its selectable flag after being selected
/// stays selected; revalidation happens only on the next assignment or
/// navigation.
pub struct SelectionController {
    /// Selected index, or [`NO_SELECTION`].
    index: i32,
    /// Aggregate selection-change notifications.
    changed: Multicast<SelectionChanged>,
}

impl SelectionController {
    /// Construct a controller with nothing selected.
    pub fn new() -> Self {
        Self {
            index: NO_SELECTION,
            changed: Multicast::new(),
        }
    }

    /// The selected index, or [`NO_SELECTION`].
    pub fn selected_index(&self) -> i32 {
        self.index
    }

    /// Aggregate selection-change notifications.
    pub fn changed(&self) -> &Multicast<SelectionChanged> {
        &self.changed
    }

    /// The item at the selected index, when that index is within the
    /// panel's current bounds.
    pub fn selected_item(&self, tree: &Tree, panel: ElementId) -> Option<ElementId> {
        if self.index < 0 {
            return None;
        }
        tree.child_at(panel, self.index as usize)
    }

    /// Select an item by index.
    ///
    /// `NO_SELECTION` clears the selection; anything below it fails with
    /// [`Error::OutOfRange`]. An index beyond the current item count is
    /// stored without resolving an item. Selecting the current index is a
    /// no-op. On success the previous item is notified first, then the
    /// index is updated, then the new item is notified, and finally the
    /// aggregate notification fires with the old and new indices.
    pub fn set_selected_index(
        &mut self,
        tree: &mut Tree,
        panel: ElementId,
        index: i32,
    ) -> Result<()> {
        if index == self.index {
            return Ok(());
        }
        if index < NO_SELECTION {
            return Err(Error::OutOfRange(index));
        }

        let target = if index >= 0 {
            tree.child_at(panel, index as usize)
        } else {
            None
        };
        if let Some(item) = target
            && !tree.is_selectable(item)?
        {
            return Err(Error::InvalidState(format!(
                "item at index {index} is not selectable"
            )));
        }

        let old = self.index;
        let previous = if old >= 0 {
            tree.child_at(panel, old as usize)
        } else {
            None
        };

        if let Some(item) = previous {
            tree.with_control(item, |_, c| c.set_selected(false))?;
        }
        self.index = index;
        if let Some(item) = target {
            tree.with_control(item, |_, c| c.set_selected(true))?;
        }
        tracing::debug!(old, new = index, "selection changed");
        self.changed.emit(&SelectionChanged { old, new: index });
        Ok(())
    }

    /// Select an item by identity.
    ///
    /// Delegates to [`Self::set_selected_index`] when the item is found in
    /// the panel; an unknown item leaves the current selection untouched.
    pub fn set_selected_item(
        &mut self,
        tree: &mut Tree,
        panel: ElementId,
        item: ElementId,
    ) -> Result<()> {
        match tree.index_of(panel, item) {
            Some(index) => self.set_selected_index(tree, panel, index as i32),
            None => Ok(()),
        }
    }

    /// Account for an item inserted at `index`: a selection at or past the
    /// insertion point shifts down by one so it keeps naming the same item.
    pub(crate) fn note_inserted(&mut self, index: usize) {
        if self.index >= 0 && (index as i32) <= self.index {
            self.index += 1;
        }
    }

    /// Account for the removal of the item at `index`, after it has left
    /// the collection.
    ///
    /// Removing an item before the selection shifts the index up by one;
    /// removing the selected item itself clears the selection, since the
    /// successor was never validated as selectable.
    pub(crate) fn note_removed(&mut self, index: usize) {
        if self.index < 0 {
            return;
        }
        let removed = index as i32;
        if removed < self.index {
            self.index -= 1;
        } else if removed == self.index {
            let old = self.index;
            self.index = NO_SELECTION;
            tracing::debug!(old, "selected item removed, selection cleared");
            self.changed.emit(&SelectionChanged {
                old,
                new: NO_SELECTION,
            });
        }
    }
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}
