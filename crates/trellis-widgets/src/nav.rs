//! Selection navigation scanning.
//!
//! The scan is a pure function over the items' selectable flags so it can
//! be tested without any tree state.

/// Direction of a selection move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    /// Toward lower indices.
    Up,
    /// Toward higher indices.
    Down,
}

/// Find the next selectable index from `current` in `direction`.
///
/// `current` may be `-1` (no selection), in which case a downward move
/// scans from the start and an upward move has nowhere to go. There is no
/// wraparound: reaching either boundary without a hit returns `None`, and
/// the caller leaves the triggering event unconsumed so it can bubble.
pub fn find_next_selectable(
    selectable: &[bool],
    current: i32,
    direction: NavDirection,
) -> Option<usize> {
    let count = selectable.len() as i32;
    match direction {
        NavDirection::Down => {
            if current >= count - 1 {
                return None;
            }
            let start = (current + 1).max(0) as usize;
            (start..selectable.len()).find(|&i| selectable[i])
        }
        NavDirection::Up => {
            if current <= 0 {
                return None;
            }
            let end = (current as usize).min(selectable.len());
            (0..end).rev().find(|&i| selectable[i])
        }
    }
}
