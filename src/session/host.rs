use super::event::PointerEvent;
use super::registry::ActiveSlot;
use super::session::{SelectionSession, Visibility};
use crate::clipboard::Clipboard;
use crate::layout::{Point, SurfaceId, TextSurface};
use crate::options::SelectionOptions;
use crate::selection::SelectListener;
use std::collections::HashMap;
use std::time::Instant;

/// Entry point for bindings: one session per surface, at most one of them
/// showing or armed at a time.
pub struct SelectionHost {
    sessions: HashMap<SurfaceId, SelectionSession>,
    active: ActiveSlot,
    clipboard: Box<dyn Clipboard>,
}

impl SelectionHost {
    pub fn new(clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            sessions: HashMap::new(),
            active: ActiveSlot::new(),
            clipboard,
        }
    }

    pub fn session(&self, surface: SurfaceId) -> Option<&SelectionSession> {
        self.sessions.get(&surface)
    }

    /// Surface whose session is currently showing or armed
    pub fn active_surface(&self) -> Option<SurfaceId> {
        self.active.occupant()
    }

    pub fn active_session(&self) -> Option<&SelectionSession> {
        self.active.occupant().and_then(|id| self.sessions.get(&id))
    }

    /// Make `surface` selectable, replacing any earlier session on it
    pub fn enable_selection(&mut self, surface: SurfaceId, options: SelectionOptions) {
        self.remove_session(surface);
        self.sessions
            .insert(surface, SelectionSession::new(surface, options));
        tracing::debug!(%surface, "selection enabled");
    }

    /// Prepare `surface` for a later [`show_armed_selection`](Self::show_armed_selection),
    /// tearing down whatever session was showing or armed before
    pub fn arm_deferred_selection(&mut self, surface: SurfaceId, options: SelectionOptions) {
        let options = options.with_show_on_long_press(false);
        self.evict_active();

        let session = self
            .sessions
            .entry(surface)
            .or_insert_with(|| SelectionSession::new(surface, options.clone()));
        session.set_options(options);
        session.arm();
        self.install(surface);
    }

    /// Promote the armed session, either at its last touch point or with the
    /// whole text selected
    pub fn show_armed_selection(&mut self, surface: &dyn TextSurface, select_all: bool) -> bool {
        let id = surface.id();
        let armed = self.active.holds(id)
            && self
                .sessions
                .get(&id)
                .is_some_and(|session| session.visibility() == Visibility::ArmedWaiting);
        if !armed {
            tracing::debug!(surface = %id, "no armed selection to show");
            return false;
        }

        if select_all {
            let shown = self
                .sessions
                .get_mut(&id)
                .is_some_and(|session| session.show_all(surface));
            self.sync_active(id);
            shown
        } else {
            let touch = self.sessions[&id].last_touch();
            self.show_session_at(surface, touch)
        }
    }

    /// Dismiss the active selection if it is on screen
    pub fn hide_active_selection(&mut self) {
        let Some(id) = self.active.occupant() else {
            return;
        };
        let Some(session) = self.sessions.get_mut(&id) else {
            return;
        };
        if matches!(
            session.visibility(),
            Visibility::Visible | Visibility::HiddenForScroll
        ) {
            session.dismiss();
            self.active.release(id);
        }
    }

    pub fn set_select_listener(&mut self, surface: SurfaceId, listener: SelectListener) {
        if let Some(session) = self.sessions.get_mut(&surface) {
            session.set_listener(Some(listener));
        }
    }

    /// Long-press on a surface: shows at the last touch point when the
    /// surface was enabled with `show_on_long_press`
    pub fn on_long_press(&mut self, surface: &dyn TextSurface) -> bool {
        let Some(session) = self.sessions.get(&surface.id()) else {
            return false;
        };
        if !session.options().show_on_long_press {
            return false;
        }
        let touch = session.last_touch();
        self.show_session_at(surface, touch)
    }

    pub fn on_pointer_event(&mut self, surface: &dyn TextSurface, event: PointerEvent) -> bool {
        let id = surface.id();
        let Some(session) = self.sessions.get_mut(&id) else {
            return false;
        };
        let consumed = session.on_pointer_event(surface, event, self.clipboard.as_mut());
        self.sync_active(id);
        consumed
    }

    /// A scroll started somewhere in the window
    pub fn on_scroll_start(&mut self) {
        for session in self.sessions.values_mut() {
            session.on_scroll_start();
        }
    }

    /// Layout settled before a draw
    pub fn on_layout_settled(&mut self, now: Instant) {
        for session in self.sessions.values_mut() {
            session.on_layout_settled(now);
        }
    }

    /// Run a due re-show for `surface`
    pub fn tick(&mut self, surface: &dyn TextSurface, now: Instant) -> bool {
        self.sessions
            .get_mut(&surface.id())
            .is_some_and(|session| session.tick(surface, now))
    }

    /// Earliest scheduled re-show across all sessions
    pub fn next_deadline(&self) -> Option<Instant> {
        self.sessions
            .values()
            .filter_map(SelectionSession::reshow_deadline)
            .min()
    }

    /// The surface left the window; later events for it are ignored
    pub fn on_detach(&mut self, surface: SurfaceId) {
        self.remove_session(surface);
        tracing::debug!(%surface, "surface detached");
    }

    fn remove_session(&mut self, surface: SurfaceId) {
        if let Some(mut session) = self.sessions.remove(&surface) {
            session.destroy();
        }
        self.active.release(surface);
    }

    /// Empty the active slot, fully tearing down its occupant
    fn evict_active(&mut self) {
        if let Some(previous) = self.active.evict() {
            self.destroy_session(previous);
        }
    }

    fn install(&mut self, surface: SurfaceId) {
        if let Some(previous) = self.active.install(surface) {
            self.destroy_session(previous);
        }
    }

    fn destroy_session(&mut self, surface: SurfaceId) {
        if let Some(session) = self.sessions.get_mut(&surface) {
            session.destroy();
        }
    }

    fn show_session_at(&mut self, surface: &dyn TextSurface, touch: Point) -> bool {
        let id = surface.id();
        if !self.sessions.contains_key(&id) {
            return false;
        }
        // The previous occupant goes even if this show misses
        if !self.active.holds(id) {
            self.evict_active();
        }
        let shown = self
            .sessions
            .get_mut(&id)
            .is_some_and(|session| session.show_at(surface, touch));
        if shown {
            self.install(id);
        } else {
            self.sync_active(id);
        }
        shown
    }

    /// A registered session that ended up hidden gives up the slot
    fn sync_active(&mut self, surface: SurfaceId) {
        let hidden = self
            .sessions
            .get(&surface)
            .map_or(true, |session| session.visibility() == Visibility::Hidden);
        if hidden {
            self.active.release(surface);
        }
    }
}
