use selectable_text::document::LONG_PRESS;
use selectable_text::{
    Document, LongPress, MemoryClipboard, Point, SelectionOptions, TextSurface, Visibility,
};
use std::time::{Duration, Instant};

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

// Three one-line blocks at y = 200, 300 and 400, 10x20 cells
fn document() -> (Document, MemoryClipboard) {
    let clipboard = MemoryClipboard::new();
    let options = SelectionOptions::default()
        .with_handle_size(20.0)
        .with_handle_padding(0.0);
    let mut document = Document::new(options, Box::new(clipboard.clone()), 1.0);
    document.push("first", ALPHABET, false);
    document.push("second", "hello world", false);
    document.push("third", "ask before selecting", true);

    for (index, entry) in document.entries_mut().iter_mut().enumerate() {
        entry.block.measure(40, 10.0, 20.0);
        entry
            .block
            .set_origin(Point::new(100.0, 200.0 + 100.0 * index as f32));
        entry.block.set_viewport_width(1000.0);
    }
    (document, clipboard)
}

fn content(document: &Document, index: usize) -> Option<String> {
    let id = document.entries()[index].block.id();
    document
        .host()
        .session(id)
        .and_then(|session| session.content().map(str::to_string))
}

#[test]
fn test_entry_at_finds_block() {
    let (document, _) = document();
    assert_eq!(document.entry_at(Point::new(134.0, 210.0)), Some(0));
    assert_eq!(document.entry_at(Point::new(134.0, 310.0)), Some(1));
    assert_eq!(document.entry_at(Point::new(134.0, 250.0)), None);
    assert_eq!(document.entry_at(Point::new(50.0, 210.0)), None);
}

#[test]
fn test_held_press_becomes_long_press() {
    let (mut document, _) = document();
    let t0 = Instant::now();

    assert!(!document.pointer_down(Point::new(134.0, 210.0), t0));
    assert_eq!(document.next_wakeup(), Some(t0 + LONG_PRESS));
    assert_eq!(document.frame(t0 + Duration::from_millis(100)), None);

    assert_eq!(document.frame(t0 + LONG_PRESS), Some(LongPress::Shown(0)));
    assert_eq!(content(&document, 0).as_deref(), Some("d"));
    assert_eq!(document.selected_text().as_deref(), Some("d"));
    assert_eq!(document.active_index(), Some(0));

    // Fires once
    assert_eq!(document.frame(t0 + LONG_PRESS * 2), None);
}

#[test]
fn test_moving_cancels_long_press() {
    let (mut document, _) = document();
    let t0 = Instant::now();

    document.pointer_down(Point::new(134.0, 210.0), t0);
    assert!(!document.pointer_move(Point::new(140.0, 210.0)));
    assert_eq!(document.next_wakeup(), None);
    assert_eq!(document.frame(t0 + LONG_PRESS), None);
}

#[test]
fn test_release_and_scroll_cancel_long_press() {
    let (mut document, _) = document();
    let t0 = Instant::now();

    document.pointer_down(Point::new(134.0, 210.0), t0);
    document.pointer_up(Point::new(134.0, 210.0));
    assert_eq!(document.frame(t0 + LONG_PRESS), None);

    document.pointer_down(Point::new(134.0, 210.0), t0);
    document.scroll_started();
    assert_eq!(document.frame(t0 + LONG_PRESS), None);
}

#[test]
fn test_press_outside_blocks() {
    let (mut document, _) = document();
    assert!(!document.pointer_down(Point::new(20.0, 20.0), Instant::now()));
    assert_eq!(document.next_wakeup(), None);
}

#[test]
fn test_secondary_click_selects_immediately() {
    let (mut document, _) = document();

    let long_press = document.secondary_click(Point::new(114.0, 310.0));
    assert_eq!(long_press, Some(LongPress::Shown(1)));
    assert_eq!(content(&document, 1).as_deref(), Some("e"));
    assert_eq!(document.secondary_click(Point::new(20.0, 20.0)), None);
}

#[test]
fn test_past_end_of_text_misses() {
    let (mut document, _) = document();
    let long_press = document.secondary_click(Point::new(300.0, 310.0));
    assert_eq!(long_press, Some(LongPress::Missed));
    assert_eq!(document.active_index(), None);
}

#[test]
fn test_deferred_entry_is_armed_then_shown() {
    let (mut document, _) = document();

    let long_press = document.secondary_click(Point::new(104.0, 410.0));
    assert_eq!(long_press, Some(LongPress::Armed(2)));
    let id = document.entries()[2].block.id();
    assert_eq!(
        document.host().session(id).unwrap().visibility(),
        Visibility::ArmedWaiting
    );

    assert!(document.show_armed(2, false));
    assert_eq!(content(&document, 2).as_deref(), Some("a"));
}

#[test]
fn test_drag_routes_to_active_block() {
    let (mut document, _) = document();
    document.secondary_click(Point::new(134.0, 210.0));

    // The left handle hangs below the block, outside its bounds
    assert!(document.pointer_down(Point::new(125.0, 230.0), Instant::now()));
    assert!(document.pointer_move(Point::new(215.0, 230.0)));
    assert!(document.pointer_up(Point::new(215.0, 230.0)));

    assert_eq!(content(&document, 0).as_deref(), Some("efghijkl"));
    assert_eq!(document.selected_text().as_deref(), Some("efghijkl"));
}

#[test]
fn test_selected_text_follows_newest_selection() {
    let (mut document, _) = document();

    document.secondary_click(Point::new(134.0, 210.0));
    document.secondary_click(Point::new(114.0, 310.0));

    // Tearing down the first selection does not wipe the second
    assert_eq!(document.selected_text().as_deref(), Some("e"));
    assert_eq!(content(&document, 0), None);

    document.hide_selection();
    assert_eq!(document.selected_text(), None);
}

#[test]
fn test_copy_from_toolbar() {
    let (mut document, clipboard) = document();
    document.secondary_click(Point::new(134.0, 210.0));

    let id = document.entries()[0].block.id();
    let toolbar = document.host().session(id).unwrap().toolbar_view().unwrap();
    let (_, copy) = toolbar.buttons[0];

    assert!(document.pointer_down(copy.center(), Instant::now()));
    assert_eq!(clipboard.contents().as_deref(), Some("d"));
    assert_eq!(document.active_index(), None);
}

#[test]
fn test_sample_document() {
    let clipboard = Box::new(MemoryClipboard::new());
    let document = Document::sample(SelectionOptions::default(), clipboard, 1.0);
    assert_eq!(document.entries().len(), 3);
    assert!(document.entries().iter().any(|entry| entry.deferred));
    assert!(document
        .entries()
        .iter()
        .all(|entry| document.host().session(entry.block.id()).is_some()));
}

#[test]
fn test_tap_elsewhere_dismisses() {
    let (mut document, _) = document();
    document.secondary_click(Point::new(134.0, 210.0));
    assert_eq!(document.active_index(), Some(0));

    let tap = Point::new(300.0, 310.0);
    assert!(!document.pointer_down(tap, Instant::now()));
    assert!(!document.pointer_up(tap));

    assert_eq!(document.active_index(), None);
    assert_eq!(content(&document, 0), None);
}

#[test]
fn test_long_press_release_keeps_selection() {
    let (mut document, _) = document();
    let t0 = Instant::now();

    document.pointer_down(Point::new(134.0, 210.0), t0);
    document.frame(t0 + LONG_PRESS);
    document.pointer_up(Point::new(134.0, 210.0));

    assert_eq!(document.active_index(), Some(0));
    assert_eq!(content(&document, 0).as_deref(), Some("d"));
}

#[test]
fn test_tap_on_empty_space_dismisses() {
    let (mut document, _) = document();
    document.secondary_click(Point::new(134.0, 210.0));

    let tap = Point::new(20.0, 20.0);
    document.pointer_down(tap, Instant::now());
    document.pointer_up(tap);
    assert_eq!(document.active_index(), None);
}
