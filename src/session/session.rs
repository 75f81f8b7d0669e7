use super::event::{PointerEvent, PointerKind};
use super::timer::ReshowTimer;
use super::toolbar::{Toolbar, ToolbarAction, ToolbarView};
use crate::clipboard::Clipboard;
use crate::error::SelectionError;
use crate::handle::{DragUpdate, HandlePair, HandleView};
use crate::layout::{LayoutAdapter, Point, SurfaceId, TextSurface};
use crate::options::SelectionOptions;
use crate::resolver::OffsetResolver;
use crate::selection::{Highlight, SelectListener, SelectionRange};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    /// Prepared, waiting for an explicit show
    ArmedWaiting,
    Visible,
    /// Views dismissed by a scroll, selection kept for the re-show
    HiddenForScroll,
}

/// Selection state for one text surface: range, handles, toolbar and the
/// post-scroll re-show.
///
/// Sessions never talk to the platform directly. The binding feeds events in
/// and reads views back out; [`SelectionHost`](super::SelectionHost) enforces
/// the one-active-session rule on top.
pub struct SelectionSession {
    surface: SurfaceId,
    options: SelectionOptions,
    resolver: OffsetResolver,
    range: SelectionRange,
    handles: Option<HandlePair>,
    toolbar: Option<Toolbar>,
    visibility: Visibility,
    reshow_pending: bool,
    reshow: ReshowTimer,
    touch: Point,
}

impl SelectionSession {
    pub fn new(surface: SurfaceId, options: SelectionOptions) -> Self {
        Self {
            surface,
            resolver: OffsetResolver::new(options.dead_zone),
            range: SelectionRange::new(options.highlight_color),
            handles: None,
            toolbar: None,
            visibility: Visibility::Hidden,
            reshow_pending: false,
            reshow: ReshowTimer::new(),
            touch: Point::zero(),
            options,
        }
    }

    pub fn surface_id(&self) -> SurfaceId {
        self.surface
    }

    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    /// Restyle; handles and toolbar are rebuilt on the next show
    pub fn set_options(&mut self, options: SelectionOptions) {
        self.resolver = OffsetResolver::new(options.dead_zone);
        self.range.set_color(options.highlight_color);
        self.handles = None;
        self.toolbar = None;
        self.options = options;
    }

    pub fn set_listener(&mut self, listener: Option<SelectListener>) {
        self.range.set_listener(listener);
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn range(&self) -> &SelectionRange {
        &self.range
    }

    pub fn content(&self) -> Option<&str> {
        self.range.content()
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.range.highlight()
    }

    pub fn handles(&self) -> Option<&HandlePair> {
        self.handles.as_ref()
    }

    pub fn handle_views(&self) -> Vec<HandleView> {
        self.handles
            .as_ref()
            .map(|handles| handles.views().collect())
            .unwrap_or_default()
    }

    pub fn toolbar_view(&self) -> Option<ToolbarView> {
        self.toolbar.as_ref().and_then(Toolbar::view)
    }

    /// Last touch point recorded on the surface (surface-local)
    pub fn last_touch(&self) -> Point {
        self.touch
    }

    pub fn reshow_deadline(&self) -> Option<Instant> {
        self.reshow.deadline()
    }

    fn hide_views(&mut self) {
        if let Some(handles) = self.handles.as_mut() {
            handles.dismiss();
        }
        if let Some(toolbar) = self.toolbar.as_mut() {
            toolbar.dismiss();
        }
    }

    fn show_views(&mut self, adapter: &LayoutAdapter<'_>) {
        let options = &self.options;
        let handles = self.handles.get_or_insert_with(|| HandlePair::new(options));
        handles.show(adapter, &self.range);
        let toolbar = self.toolbar.get_or_insert_with(|| Toolbar::new(options));
        toolbar.show(adapter, &self.range);
    }

    /// Dismiss views and any scheduled re-show, keeping the range
    pub fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
        self.reshow_pending = false;
        self.reshow.cancel();
        self.hide_views();
    }

    /// Select `initial_span` chars under `point` (surface-local) and show.
    ///
    /// Returns false, leaving the session hidden, when the layout is not
    /// measured yet or the point lies past the end of the text.
    pub fn show_at(&mut self, surface: &dyn TextSurface, point: Point) -> bool {
        self.hide();
        self.range.clear();
        self.touch = point;

        match self.try_show_at(surface, point) {
            Ok(()) => {
                tracing::debug!(
                    surface = %self.surface,
                    start = self.range.start(),
                    end = self.range.end(),
                    "selection shown"
                );
                true
            }
            Err(err) => {
                tracing::debug!(surface = %self.surface, %err, "no selection at touch point");
                false
            }
        }
    }

    fn try_show_at(&mut self, surface: &dyn TextSurface, point: Point) -> Result<(), SelectionError> {
        let adapter = LayoutAdapter::new(surface)?;
        let local = adapter.local_to_layout(point);
        let offset = self.resolver.precise_offset(adapter.layout(), local.x, local.y);
        let len = adapter.text_len();
        if offset >= len {
            return Err(SelectionError::OffsetPastEnd { offset, len });
        }

        self.range.set(
            adapter.text(),
            Some(offset),
            Some(offset.saturating_add(self.options.initial_span)),
        );
        self.show_views(&adapter);
        self.visibility = Visibility::Visible;
        Ok(())
    }

    /// Prepare without showing anything
    pub fn arm(&mut self) {
        self.hide();
        self.range.reset();
        self.visibility = Visibility::ArmedWaiting;
        tracing::debug!(surface = %self.surface, "selection armed");
    }

    /// Select the whole text and show
    pub fn show_all(&mut self, surface: &dyn TextSurface) -> bool {
        self.hide();
        let adapter = match LayoutAdapter::new(surface) {
            Ok(adapter) => adapter,
            Err(err) => {
                tracing::debug!(surface = %self.surface, %err, "select all deferred");
                return false;
            }
        };

        self.range.select_all(adapter.text());
        self.show_views(&adapter);
        self.visibility = Visibility::Visible;
        tracing::debug!(surface = %self.surface, len = self.range.end(), "all text selected");
        true
    }

    /// Hide everything and clear the selection
    pub fn dismiss(&mut self) {
        self.hide();
        self.range.clear();
    }

    /// Dismiss and drop the handles and toolbar
    pub fn destroy(&mut self) {
        self.dismiss();
        self.handles = None;
        self.toolbar = None;
        tracing::debug!(surface = %self.surface, "selection session destroyed");
    }

    /// Copy the selection, then reset and hide. Returns the copied text.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard) -> Option<String> {
        let content = self.range.content()?.to_string();
        if let Err(err) = write_clipboard(clipboard, &content) {
            tracing::warn!(surface = %self.surface, %err, "copy failed");
        }
        self.range.notify();
        self.range.reset();
        self.hide();
        Some(content)
    }

    pub fn run_action(
        &mut self,
        surface: &dyn TextSurface,
        action: ToolbarAction,
        clipboard: &mut dyn Clipboard,
    ) {
        tracing::debug!(surface = %self.surface, ?action, "toolbar action");
        match action {
            ToolbarAction::Copy => {
                self.copy(clipboard);
            }
            ToolbarAction::SelectAll => {
                self.show_all(surface);
            }
        }
    }

    pub fn on_scroll_start(&mut self) {
        match self.visibility {
            Visibility::Visible => {
                self.hide_views();
                self.visibility = Visibility::HiddenForScroll;
                self.reshow_pending = true;
                self.reshow.cancel();
                tracing::trace!(surface = %self.surface, "hidden for scroll");
            }
            Visibility::HiddenForScroll => {
                self.reshow_pending = true;
                self.reshow.cancel();
            }
            Visibility::Hidden | Visibility::ArmedWaiting => {}
        }
    }

    pub fn on_layout_settled(&mut self, now: Instant) {
        if self.reshow_pending {
            self.reshow_pending = false;
            self.reshow.schedule(now, self.options.reshow_delay());
        }
    }

    /// Run a due re-show. Returns true if the views came back.
    pub fn tick(&mut self, surface: &dyn TextSurface, now: Instant) -> bool {
        if !self.reshow.fire(now) || self.visibility != Visibility::HiddenForScroll {
            return false;
        }
        match LayoutAdapter::new(surface) {
            Ok(adapter) => {
                self.show_views(&adapter);
                self.visibility = Visibility::Visible;
                tracing::trace!(surface = %self.surface, "re-shown after scroll");
                true
            }
            Err(err) => {
                // Retry after the next layout pass
                tracing::debug!(surface = %self.surface, %err, "re-show deferred");
                self.reshow_pending = true;
                false
            }
        }
    }

    /// Route a pointer event; true when the selection consumed it
    pub fn on_pointer_event(
        &mut self,
        surface: &dyn TextSurface,
        event: PointerEvent,
        clipboard: &mut dyn Clipboard,
    ) -> bool {
        match event.kind {
            PointerKind::Down => {
                if self.visibility == Visibility::Visible {
                    let action = self.toolbar.as_ref().and_then(|t| t.hit_test(event.raw));
                    if let Some(action) = action {
                        self.run_action(surface, action, clipboard);
                        return true;
                    }
                    if self.begin_drag(surface, event) {
                        return true;
                    }
                }
                self.touch = event.local;
                false
            }
            PointerKind::Move => {
                if self.handles.as_ref().is_some_and(HandlePair::is_dragging) {
                    self.drag_to(surface, event);
                    return true;
                }
                self.touch = event.local;
                false
            }
            PointerKind::Up | PointerKind::Cancel => self.end_drag(surface),
        }
    }

    fn begin_drag(&mut self, surface: &dyn TextSurface, event: PointerEvent) -> bool {
        let Some(handles) = self.handles.as_mut() else {
            return false;
        };
        if !handles.hit_test(event.raw) {
            return false;
        }
        let Ok(adapter) = LayoutAdapter::new(surface) else {
            return false;
        };
        handles.begin_drag(&adapter, event.raw, &self.range).is_some()
    }

    fn drag_to(&mut self, surface: &dyn TextSurface, event: PointerEvent) {
        if let Some(toolbar) = self.toolbar.as_mut() {
            toolbar.dismiss();
        }
        let adapter = match LayoutAdapter::new(surface) {
            Ok(adapter) => adapter,
            Err(err) => {
                tracing::debug!(surface = %self.surface, %err, "drag move ignored");
                return;
            }
        };
        let Some(handles) = self.handles.as_mut() else {
            return;
        };
        let update = handles.drag_to(&adapter, &self.resolver, &mut self.range, event.raw);
        if update != DragUpdate::Unchanged {
            tracing::trace!(
                surface = %self.surface,
                start = self.range.start(),
                end = self.range.end(),
                "selection dragged"
            );
        }
    }

    fn end_drag(&mut self, surface: &dyn TextSurface) -> bool {
        let ended = self.handles.as_mut().is_some_and(HandlePair::end_drag);
        if !ended {
            return false;
        }
        match LayoutAdapter::new(surface) {
            Ok(adapter) => {
                let options = &self.options;
                let toolbar = self.toolbar.get_or_insert_with(|| Toolbar::new(options));
                toolbar.show(&adapter, &self.range);
            }
            Err(err) => tracing::debug!(surface = %self.surface, %err, "toolbar not re-shown"),
        }
        true
    }
}

fn write_clipboard(clipboard: &mut dyn Clipboard, content: &str) -> Result<(), SelectionError> {
    clipboard.set_text(content)?;
    Ok(())
}
