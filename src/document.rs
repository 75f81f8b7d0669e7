use crate::clipboard::Clipboard;
use crate::handle::HandlePair;
use crate::layout::{Point, Rect, SurfaceId, TextBlock, TextSurface};
use crate::options::SelectionOptions;
use crate::session::{PointerEvent, PointerKind, SelectionHost};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Hold time before a press counts as a long-press
pub const LONG_PRESS: Duration = Duration::from_millis(500);

/// Paragraphs shown by the bundled front ends: (title, text, deferred)
pub const SAMPLE_PARAGRAPHS: [(&str, &str, bool); 3] = [
    (
        "Long-press to select",
        "Press and hold on any word to select it. Drag either handle to grow \
         the selection, or pull one handle past the other and they trade places. \
         The small toolbar above the text copies the selection or selects everything.",
        false,
    ),
    (
        "Another paragraph",
        "Only one paragraph can hold a selection at a time. Starting a selection \
         here clears the one above.\nScrolling hides the handles and brings them \
         back a moment after the page comes to rest.",
        false,
    ),
    (
        "Ask first",
        "This paragraph is armed by a long-press instead of selecting right away. \
         The front end then asks whether to select at the touch point or select all.",
        true,
    ),
];

/// One paragraph of a [`Document`]
#[derive(Debug)]
pub struct Entry {
    pub title: String,
    pub block: TextBlock,
    /// Long-press arms the block and the front end confirms before showing
    pub deferred: bool,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    /// Entry under the press, if any
    index: Option<usize>,
    raw: Point,
    started: Instant,
}

/// What a long-press turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongPress {
    /// Selection shown on the entry at this index
    Shown(usize),
    /// Deferred entry armed; finish with [`Document::show_armed`]
    Armed(usize),
    /// Nothing selectable under the touch
    Missed,
}

type LastSelection = Rc<RefCell<Option<(SurfaceId, String)>>>;

/// A column of text blocks sharing one [`SelectionHost`].
///
/// Front ends place the blocks, then feed raw pointer input and frame
/// timing in. The document routes each event to the right surface and turns
/// held presses into long-presses.
pub struct Document {
    entries: Vec<Entry>,
    host: SelectionHost,
    options: SelectionOptions,
    press: Option<Press>,
    /// Pointer travel that cancels a pending long-press
    touch_slop: f32,
    selected: LastSelection,
}

impl Document {
    pub fn new(options: SelectionOptions, clipboard: Box<dyn Clipboard>, touch_slop: f32) -> Self {
        Self {
            entries: Vec::new(),
            host: SelectionHost::new(clipboard),
            options,
            press: None,
            touch_slop,
            selected: Rc::new(RefCell::new(None)),
        }
    }

    /// Document holding [`SAMPLE_PARAGRAPHS`]
    pub fn sample(options: SelectionOptions, clipboard: Box<dyn Clipboard>, touch_slop: f32) -> Self {
        let mut document = Self::new(options, clipboard, touch_slop);
        for (title, text, deferred) in SAMPLE_PARAGRAPHS {
            document.push(title, text, deferred);
        }
        document
    }

    /// Append a paragraph; its block still has to be measured and placed
    pub fn push(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        deferred: bool,
    ) -> SurfaceId {
        let id = SurfaceId(self.entries.len() as u64 + 1);
        let options = self.options.clone().with_show_on_long_press(!deferred);
        self.host.enable_selection(id, options);

        let selected = self.selected.clone();
        self.host.set_select_listener(
            id,
            Box::new(move |content: Option<&str>| {
                let mut selected = selected.borrow_mut();
                match content {
                    Some(text) => *selected = Some((id, text.to_string())),
                    // Another surface may have selected since
                    None if selected.as_ref().is_some_and(|(owner, _)| *owner == id) => {
                        *selected = None
                    }
                    None => {}
                }
            }),
        );

        self.entries.push(Entry {
            title: title.into(),
            block: TextBlock::new(id, text),
            deferred,
        });
        id
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// For measuring and placing blocks before a frame
    pub fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    pub fn host(&self) -> &SelectionHost {
        &self.host
    }

    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    /// Text most recently reported by any surface's listener
    pub fn selected_text(&self) -> Option<String> {
        self.selected.borrow().as_ref().map(|(_, text)| text.clone())
    }

    pub fn active_index(&self) -> Option<usize> {
        let id = self.host.active_surface()?;
        self.entries.iter().position(|entry| entry.block.id() == id)
    }

    fn dragging_index(&self) -> Option<usize> {
        let index = self.active_index()?;
        let session = self.host.session(self.entries[index].block.id())?;
        session
            .handles()
            .is_some_and(HandlePair::is_dragging)
            .then_some(index)
    }

    /// Entry whose block covers `raw`
    pub fn entry_at(&self, raw: Point) -> Option<usize> {
        self.entries.iter().position(|entry| {
            let block = &entry.block;
            let origin = block.screen_origin();
            Rect::new(origin, block.viewport_width() - origin.x, block.height()).contains(raw)
        })
    }

    fn deliver(&mut self, index: usize, kind: PointerKind, raw: Point) -> bool {
        let block = &self.entries[index].block;
        let event = PointerEvent::at(kind, raw, block.screen_origin());
        self.host.on_pointer_event(block, event)
    }

    /// Primary button went down. True when the selection took the press.
    pub fn pointer_down(&mut self, raw: Point, now: Instant) -> bool {
        self.press = None;
        let active = self.active_index();
        if let Some(index) = active {
            if self.deliver(index, PointerKind::Down, raw) {
                return true;
            }
        }

        let index = self.entry_at(raw);
        if let Some(index) = index.filter(|&index| active != Some(index)) {
            self.deliver(index, PointerKind::Down, raw);
        }
        self.press = Some(Press {
            index,
            raw,
            started: now,
        });
        false
    }

    pub fn pointer_move(&mut self, raw: Point) -> bool {
        if let Some(press) = self.press {
            let travel = raw - press.raw;
            if travel.x.hypot(travel.y) > self.touch_slop {
                self.press = None;
            }
        }
        match self.dragging_index() {
            Some(index) => self.deliver(index, PointerKind::Move, raw),
            None => false,
        }
    }

    /// Primary button released. A press that neither moved nor turned into
    /// a long-press is a tap, and a tap the selection did not take dismisses it.
    pub fn pointer_up(&mut self, raw: Point) -> bool {
        let tapped = self.press.take().is_some();
        let consumed = match self.active_index() {
            Some(index) => self.deliver(index, PointerKind::Up, raw),
            None => false,
        };
        if tapped && !consumed {
            self.hide_selection();
        }
        consumed
    }

    /// Secondary click, treated as an immediate long-press
    pub fn secondary_click(&mut self, raw: Point) -> Option<LongPress> {
        self.press = None;
        let index = self.entry_at(raw)?;
        self.deliver(index, PointerKind::Down, raw);
        Some(self.long_press(index))
    }

    /// Long-press on the entry at `index`, at its last recorded touch
    pub fn long_press(&mut self, index: usize) -> LongPress {
        let entry = &self.entries[index];
        if entry.deferred {
            self.host
                .arm_deferred_selection(entry.block.id(), self.options.clone());
            LongPress::Armed(index)
        } else if self.host.on_long_press(&entry.block) {
            LongPress::Shown(index)
        } else {
            LongPress::Missed
        }
    }

    pub fn show_armed(&mut self, index: usize, select_all: bool) -> bool {
        let block = &self.entries[index].block;
        self.host.show_armed_selection(block, select_all)
    }

    pub fn hide_selection(&mut self) {
        self.host.hide_active_selection();
    }

    pub fn scroll_started(&mut self) {
        self.press = None;
        self.host.on_scroll_start();
    }

    /// The blocks are placed for this frame: run due re-shows and report a
    /// press that has been held long enough
    pub fn frame(&mut self, now: Instant) -> Option<LongPress> {
        self.host.on_layout_settled(now);
        for entry in &self.entries {
            self.host.tick(&entry.block, now);
        }

        let press = self.press?;
        let index = press.index?;
        if now.duration_since(press.started) < LONG_PRESS {
            return None;
        }
        self.press = None;
        Some(self.long_press(index))
    }

    /// When [`frame`](Self::frame) next has work to do
    pub fn next_wakeup(&self) -> Option<Instant> {
        let press = self
            .press
            .filter(|press| press.index.is_some())
            .map(|press| press.started + LONG_PRESS);
        [self.host.next_deadline(), press].into_iter().flatten().min()
    }
}
