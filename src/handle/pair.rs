use super::controller::{DragUpdate, HandleController, HandleView, Side};
use crate::layout::{LayoutAdapter, Point};
use crate::options::SelectionOptions;
use crate::resolver::OffsetResolver;
use crate::selection::SelectionRange;

/// The two handles of one session.
///
/// Slots are fixed (slot 0 starts as the left handle); which side a slot
/// represents changes when a drag crosses the other handle.
#[derive(Debug, Clone)]
pub struct HandlePair {
    handles: [HandleController; 2],
}

impl HandlePair {
    pub fn new(options: &SelectionOptions) -> Self {
        Self {
            handles: [
                HandleController::new(Side::Left, options),
                HandleController::new(Side::Right, options),
            ],
        }
    }

    pub fn by_side(&self, side: Side) -> &HandleController {
        if self.handles[0].side() == side {
            &self.handles[0]
        } else {
            &self.handles[1]
        }
    }

    /// The handle currently marking the other boundary
    pub fn opposite(&self, side: Side) -> &HandleController {
        self.by_side(side.opposite())
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandleController> {
        self.handles.iter()
    }

    pub fn views(&self) -> impl Iterator<Item = HandleView> + '_ {
        self.handles.iter().filter_map(HandleController::view)
    }

    pub fn is_showing(&self) -> bool {
        self.handles.iter().any(HandleController::is_showing)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging_slot().is_some()
    }

    fn dragging_slot(&self) -> Option<usize> {
        self.handles.iter().position(HandleController::is_dragging)
    }

    /// Slot of the handle under `raw`; the later-shown right handle wins
    /// when both overlap
    fn hit_slot(&self, raw: Point) -> Option<usize> {
        (0..self.handles.len()).rev().find(|&slot| self.handles[slot].hit_test(raw))
    }

    pub fn hit_test(&self, raw: Point) -> bool {
        self.hit_slot(raw).is_some()
    }

    /// (slot, other slot) as two mutable borrows
    fn split(&mut self, slot: usize) -> (&mut HandleController, &mut HandleController) {
        let (first, second) = self.handles.split_at_mut(1);
        if slot == 0 {
            (&mut first[0], &mut second[0])
        } else {
            (&mut second[0], &mut first[0])
        }
    }

    pub fn show(&mut self, adapter: &LayoutAdapter<'_>, range: &SelectionRange) {
        for handle in &mut self.handles {
            handle.show(adapter, range);
        }
    }

    pub fn dismiss(&mut self) {
        for handle in &mut self.handles {
            handle.dismiss();
        }
    }

    /// Start dragging the handle under `raw`, if any
    pub fn begin_drag(
        &mut self,
        adapter: &LayoutAdapter<'_>,
        raw: Point,
        range: &SelectionRange,
    ) -> Option<Side> {
        let slot = self.hit_slot(raw)?;
        let handle = &mut self.handles[slot];
        handle.begin_drag(adapter, raw, range);
        Some(handle.side())
    }

    pub fn drag_to(
        &mut self,
        adapter: &LayoutAdapter<'_>,
        resolver: &OffsetResolver,
        range: &mut SelectionRange,
        raw: Point,
    ) -> DragUpdate {
        let Some(slot) = self.dragging_slot() else {
            return DragUpdate::Unchanged;
        };
        let (handle, opposite) = self.split(slot);
        handle.drag_to(opposite, adapter, resolver, range, raw)
    }

    /// End any drag; true if one was in progress
    pub fn end_drag(&mut self) -> bool {
        self.handles
            .iter_mut()
            .fold(false, |ended, handle| handle.end_drag() || ended)
    }
}
