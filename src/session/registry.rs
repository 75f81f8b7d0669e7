use crate::layout::SurfaceId;

/// Slot for the one session allowed to be showing or armed at a time.
///
/// The slot only tracks ownership; whoever evicts an occupant must tear it
/// down before installing the next one.
#[derive(Debug, Clone, Default)]
pub struct ActiveSlot {
    occupant: Option<SurfaceId>,
}

impl ActiveSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupant(&self) -> Option<SurfaceId> {
        self.occupant
    }

    pub fn holds(&self, id: SurfaceId) -> bool {
        self.occupant == Some(id)
    }

    /// Install `id`, returning a different previous occupant
    pub fn install(&mut self, id: SurfaceId) -> Option<SurfaceId> {
        self.occupant.replace(id).filter(|previous| *previous != id)
    }

    pub fn evict(&mut self) -> Option<SurfaceId> {
        self.occupant.take()
    }

    /// Clear the slot if `id` holds it
    pub fn release(&mut self, id: SurfaceId) -> bool {
        if self.holds(id) {
            self.occupant = None;
            true
        } else {
            false
        }
    }
}
