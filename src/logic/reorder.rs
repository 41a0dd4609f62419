// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Drag-and-drop reordering of sections and entries.
//!
//! Two steps:
//! - [`DragTracker`] remembers what was picked up at drag start and turns the
//!   drop into a [`Move`] (or nothing).
//! - [`apply_move`] computes the reordered document as a new value.
//!
//! Keyboard reordering goes through [`step_move`] and ends up in the same
//! reconciler, one position at a time.
//!
//! The kind recorded at drag start is authoritative: a section drag only
//! resolves against section ids, an entry drag only against entry ids.
//! Anything that does not resolve is dropped without touching the document.

use tracing::debug;

use crate::models::{ItemId, Resume};

/// What kind of item a drag carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    Section,
    Entry,
}

/// Drag payload captured when a drag starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragItem {
    pub id: ItemId,
    pub kind: DragKind,
}

impl DragItem {
    pub fn section(id: ItemId) -> Self {
        Self {
            id,
            kind: DragKind::Section,
        }
    }

    pub fn entry(id: ItemId) -> Self {
        Self {
            id,
            kind: DragKind::Entry,
        }
    }
}

/// A classified, index-based move ready to be reconciled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// Move a section within the top-level sequence.
    Section { from: usize, to: usize },
    /// Move an entry within or across sections.
    Entry {
        source_section: usize,
        old_index: usize,
        target_section: usize,
        new_index: usize,
    },
}

/// Holds the active drag between start and end events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DragTracker {
    active: Option<DragItem>,
}

impl DragTracker {
    /// Record the item being dragged. Replaces any stale drag.
    pub fn start(&mut self, item: DragItem) {
        debug!(id = %item.id, kind = ?item.kind, "drag started");
        self.active = Some(item);
    }

    pub fn active(&self) -> Option<&DragItem> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Drop without a target; clears the active drag.
    pub fn cancel(&mut self) {
        if let Some(item) = self.active.take() {
            debug!(id = %item.id, "drag cancelled");
        }
    }

    /// Finish the drag on `over` and classify it against `resume`.
    ///
    /// Always clears the active drag, whatever the outcome.
    pub fn finish(&mut self, resume: &Resume, over: Option<&ItemId>) -> Option<Move> {
        let item = self.active.take()?;
        let Some(over) = over else {
            debug!(id = %item.id, "drag ended outside any drop target");
            return None;
        };
        let classified = classify(resume, &item, over);
        if classified.is_none() && item.id != *over {
            debug!(id = %item.id, over = %over, kind = ?item.kind, "unresolved drop ignored");
        }
        classified
    }
}

/// Resolve a drop of `item` onto `over` into index positions.
///
/// Returns `None` for self-drops and for ids that do not resolve in the id
/// space matching the item's kind.
pub fn classify(resume: &Resume, item: &DragItem, over: &ItemId) -> Option<Move> {
    if &item.id == over {
        return None;
    }

    match item.kind {
        DragKind::Section => {
            let from = resume.section_index(&item.id)?;
            let to = resume.section_index(over)?;
            Some(Move::Section { from, to })
        }
        DragKind::Entry => {
            let (source_section, old_index) = resume.locate_entry(&item.id)?;
            let (target_section, new_index) = resume.locate_entry(over)?;
            Some(Move::Entry {
                source_section,
                old_index,
                target_section,
                new_index,
            })
        }
    }
}

/// Produce the document after applying `mv`; the input is left untouched.
///
/// Indices outside the current sequences yield an unchanged copy.
pub fn apply_move(resume: &Resume, mv: Move) -> Resume {
    let mut next = resume.clone();
    match mv {
        Move::Section { from, to } => {
            array_move(&mut next.sections, from, to);
        }
        Move::Entry {
            source_section,
            old_index,
            target_section,
            new_index,
        } if source_section == target_section => {
            if let Some(section) = next.sections.get_mut(source_section) {
                array_move(&mut section.entries, old_index, new_index);
            }
        }
        Move::Entry {
            source_section,
            old_index,
            target_section,
            new_index,
        } => {
            let valid = next
                .sections
                .get(source_section)
                .is_some_and(|s| old_index < s.entries.len())
                && next
                    .sections
                    .get(target_section)
                    .is_some_and(|s| new_index <= s.entries.len());
            if valid {
                let moved = next.sections[source_section].entries.remove(old_index);
                next.sections[target_section]
                    .entries
                    .insert(new_index, moved);
            }
        }
    }
    next
}

/// Move the element at `from` so it ends up at index `to`, shifting the items in between.
///
/// Out-of-range indices leave the slice untouched.
pub fn array_move<T>(items: &mut [T], from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else {
        items[to..=from].rotate_right(1);
    }
}

/// Finish a drag and, when it resolves, commit the reordered document in one assignment.
///
/// Returns whether the document changed.
pub fn handle_drag_end(tracker: &mut DragTracker, resume: &mut Resume, over: Option<&ItemId>) -> bool {
    match tracker.finish(resume, over) {
        Some(mv) => commit(resume, mv),
        None => false,
    }
}

/// One keyboard reorder step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// Resolve a single keyboard step of `item` into a move.
///
/// Sections swap with their neighbour. Entries move within their section and,
/// past either end, continue into the adjacent section: appended to the
/// previous one when moving up, prepended to the next one when moving down.
pub fn step_move(resume: &Resume, item: &DragItem, step: Step) -> Option<Move> {
    match item.kind {
        DragKind::Section => {
            let from = resume.section_index(&item.id)?;
            let to = match step {
                Step::Up => from.checked_sub(1)?,
                Step::Down => from + 1,
            };
            (to < resume.sections.len()).then_some(Move::Section { from, to })
        }
        DragKind::Entry => {
            let (section, index) = resume.locate_entry(&item.id)?;
            let len = resume.sections.get(section)?.entries.len();
            let (target_section, new_index) = match step {
                Step::Up if index > 0 => (section, index - 1),
                Step::Up => {
                    let previous = section.checked_sub(1)?;
                    (previous, resume.sections.get(previous)?.entries.len())
                }
                Step::Down if index + 1 < len => (section, index + 1),
                Step::Down => {
                    let next = section + 1;
                    resume.sections.get(next)?;
                    (next, 0)
                }
            };
            Some(Move::Entry {
                source_section: section,
                old_index: index,
                target_section,
                new_index,
            })
        }
    }
}

/// Apply one keyboard step to `item`. Returns whether the document changed.
pub fn handle_step(resume: &mut Resume, item: &DragItem, step: Step) -> bool {
    match step_move(resume, item, step) {
        Some(mv) => {
            debug!(id = %item.id, ?step, "keyboard reorder");
            commit(resume, mv)
        }
        None => false,
    }
}

fn commit(resume: &mut Resume, mv: Move) -> bool {
    let next = apply_move(resume, mv);
    debug_assert!(same_items(resume, &next), "reorder lost or duplicated items");
    let changed = next != *resume;
    *resume = next;
    changed
}

/// Both documents hold the same sections and entries, in any order.
fn same_items(a: &Resume, b: &Resume) -> bool {
    fn sorted(mut ids: Vec<&ItemId>) -> Vec<&ItemId> {
        ids.sort();
        ids
    }
    sorted(a.section_ids()) == sorted(b.section_ids())
        && sorted(a.entry_ids()) == sorted(b.entry_ids())
}
