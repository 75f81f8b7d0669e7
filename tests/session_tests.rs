use selectable_text::{
    MemoryClipboard, Point, PointerEvent, PointerKind, SelectionHost, SelectionOptions, Side,
    SurfaceId, TextBlock, TextSurface, ToolbarAction, Visibility,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";
const FIFTY: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWX";

// 40 columns of 10x20 cells
fn block_at(id: u64, text: &str, origin: Point) -> TextBlock {
    let mut block = TextBlock::new(SurfaceId(id), text);
    block.measure(40, 10.0, 20.0);
    block.set_origin(origin);
    block.set_viewport_width(1000.0);
    block
}

fn block(id: u64, text: &str) -> TextBlock {
    block_at(id, text, Point::new(100.0, 200.0))
}

fn options() -> SelectionOptions {
    SelectionOptions::default()
        .with_handle_size(20.0)
        .with_handle_padding(0.0)
}

fn host() -> (SelectionHost, MemoryClipboard) {
    let clipboard = MemoryClipboard::new();
    (SelectionHost::new(Box::new(clipboard.clone())), clipboard)
}

fn pointer(host: &mut SelectionHost, block: &TextBlock, kind: PointerKind, raw: Point) -> bool {
    let event = PointerEvent::at(kind, raw, block.screen_origin());
    host.on_pointer_event(block, event)
}

/// Touch down at a surface-local point, then report a long-press
fn long_press(host: &mut SelectionHost, block: &TextBlock, x: f32, y: f32) -> bool {
    let raw = block.screen_origin() + Point::new(x, y);
    pointer(host, block, PointerKind::Down, raw);
    host.on_long_press(block)
}

fn record(host: &mut SelectionHost, id: SurfaceId) -> Rc<RefCell<Vec<Option<String>>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    host.set_select_listener(
        id,
        Box::new(move |content: Option<&str>| {
            sink.borrow_mut().push(content.map(str::to_string));
        }),
    );
    seen
}

#[test]
fn test_long_press_selects_char_under_touch() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    host.enable_selection(a.id(), options());

    // 'd' spans local x 30..40
    assert!(long_press(&mut host, &a, 34.0, 10.0));

    let session = host.session(a.id()).unwrap();
    assert_eq!(session.visibility(), Visibility::Visible);
    assert_eq!(session.range().range(), 3..4);
    assert_eq!(session.content(), Some("d"));
    assert!(session.highlight().is_some());
    assert_eq!(session.handle_views().len(), 2);
    assert!(session.toolbar_view().is_some());
    assert_eq!(host.active_surface(), Some(a.id()));
}

#[test]
fn test_initial_span_is_configurable() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    host.enable_selection(a.id(), options().with_initial_span(3));

    assert!(long_press(&mut host, &a, 34.0, 10.0));
    assert_eq!(host.session(a.id()).unwrap().content(), Some("def"));
}

#[test]
fn test_long_press_respects_padding() {
    let (mut host, _) = host();
    let mut a = block(1, ALPHABET);
    a.set_padding(Point::new(5.0, 5.0));
    host.enable_selection(a.id(), options());

    assert!(long_press(&mut host, &a, 39.0, 15.0));
    let session = host.session(a.id()).unwrap();
    assert_eq!(session.range().range(), 3..4);

    let left = session.handles().unwrap().by_side(Side::Left).view().unwrap();
    assert_eq!(left.bounds.origin, Point::new(115.0, 225.0));
}

#[test]
fn test_long_press_past_end_of_text_is_ignored() {
    let (mut host, _) = host();
    let a = block(1, "abc");
    host.enable_selection(a.id(), options());

    assert!(!long_press(&mut host, &a, 200.0, 10.0));

    let session = host.session(a.id()).unwrap();
    assert_eq!(session.visibility(), Visibility::Hidden);
    assert!(session.handles().is_none());
    assert!(session.highlight().is_none());
    assert_eq!(host.active_surface(), None);
}

#[test]
fn test_long_press_before_layout_is_ignored() {
    let (mut host, _) = host();
    let a = TextBlock::new(SurfaceId(1), ALPHABET);
    host.enable_selection(a.id(), options());

    assert!(!long_press(&mut host, &a, 34.0, 10.0));
    assert_eq!(
        host.session(a.id()).unwrap().visibility(),
        Visibility::Hidden
    );
}

#[test]
fn test_long_press_on_unknown_surface() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    assert!(!long_press(&mut host, &a, 34.0, 10.0));
    assert!(host.session(a.id()).is_none());
}

#[test]
fn test_showing_one_surface_tears_down_the_other() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    let b = block_at(2, ALPHABET, Point::new(100.0, 400.0));
    host.enable_selection(a.id(), options());
    host.enable_selection(b.id(), options());
    let seen = record(&mut host, a.id());

    assert!(long_press(&mut host, &a, 34.0, 10.0));
    assert!(long_press(&mut host, &b, 54.0, 10.0));

    let first = host.session(a.id()).unwrap();
    assert_eq!(first.visibility(), Visibility::Hidden);
    assert!(first.highlight().is_none());
    assert!(first.handle_views().is_empty());
    assert!(first.toolbar_view().is_none());

    let second = host.session(b.id()).unwrap();
    assert_eq!(second.visibility(), Visibility::Visible);
    assert_eq!(second.content(), Some("f"));
    assert_eq!(host.active_surface(), Some(b.id()));

    assert_eq!(*seen.borrow(), vec![Some("d".to_string()), None]);
}

#[test]
fn test_copy_writes_clipboard_and_resets() {
    let (mut host, clipboard) = host();
    let a = block(1, ALPHABET);
    host.enable_selection(a.id(), options());
    let seen = record(&mut host, a.id());
    long_press(&mut host, &a, 34.0, 10.0);

    // Toolbar sits above line 0 at the selection start: x = 130, y = 200 - 40 - 16
    let toolbar = host.session(a.id()).unwrap().toolbar_view().unwrap();
    assert_eq!(toolbar.bounds.origin, Point::new(130.0, 144.0));
    let (action, copy) = toolbar.buttons[0];
    assert_eq!(action, ToolbarAction::Copy);

    assert!(pointer(&mut host, &a, PointerKind::Down, copy.center()));

    assert_eq!(clipboard.contents().as_deref(), Some("d"));
    let session = host.session(a.id()).unwrap();
    assert_eq!(session.visibility(), Visibility::Hidden);
    assert_eq!(session.content(), None);
    assert!(session.highlight().is_none());
    assert!(session.handle_views().is_empty());
    assert_eq!(host.active_surface(), None);
    assert_eq!(
        *seen.borrow(),
        vec![Some("d".to_string()), Some("d".to_string())]
    );
}

#[test]
fn test_select_all_from_toolbar() {
    let (mut host, _) = host();
    let a = block(1, FIFTY);
    host.enable_selection(a.id(), options());
    long_press(&mut host, &a, 34.0, 10.0);

    let toolbar = host.session(a.id()).unwrap().toolbar_view().unwrap();
    let (action, select_all) = toolbar.buttons[1];
    assert_eq!(action, ToolbarAction::SelectAll);
    assert!(pointer(&mut host, &a, PointerKind::Down, select_all.center()));

    let session = host.session(a.id()).unwrap();
    assert_eq!(session.range().range(), 0..50);
    assert_eq!(session.content(), Some(FIFTY));
    assert_eq!(session.visibility(), Visibility::Visible);

    // End of text is 10 cells into the wrapped second line
    let handles = session.handles().unwrap();
    let right = handles.by_side(Side::Right).view().unwrap();
    assert_eq!(right.bounds.origin, Point::new(200.0, 240.0));
    let left = handles.by_side(Side::Left).view().unwrap();
    assert_eq!(left.bounds.origin, Point::new(80.0, 220.0));
}

#[test]
fn test_dragging_a_handle_across_the_other() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    host.enable_selection(a.id(), options());
    long_press(&mut host, &a, 34.0, 10.0);

    // Grab the left handle, 5px left of its boundary
    assert!(pointer(&mut host, &a, PointerKind::Down, Point::new(125.0, 230.0)));
    assert!(pointer(&mut host, &a, PointerKind::Move, Point::new(215.0, 230.0)));

    let session = host.session(a.id()).unwrap();
    assert_eq!(session.range().range(), 4..12);
    assert_eq!(session.content(), Some("efghijkl"));
    assert!(session.toolbar_view().is_none());

    assert!(pointer(&mut host, &a, PointerKind::Up, Point::new(215.0, 230.0)));
    let toolbar = host.session(a.id()).unwrap().toolbar_view().unwrap();
    assert_eq!(toolbar.bounds.origin, Point::new(140.0, 144.0));
    assert_eq!(host.active_surface(), Some(a.id()));
}

#[test]
fn test_pointer_outside_selection_is_not_consumed() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    host.enable_selection(a.id(), options());
    long_press(&mut host, &a, 34.0, 10.0);

    assert!(!pointer(&mut host, &a, PointerKind::Down, Point::new(300.0, 210.0)));
    assert!(!pointer(&mut host, &a, PointerKind::Move, Point::new(310.0, 210.0)));
    assert!(!pointer(&mut host, &a, PointerKind::Up, Point::new(310.0, 210.0)));
    assert_eq!(
        host.session(a.id()).unwrap().last_touch(),
        Point::new(210.0, 10.0)
    );
}

#[test]
fn test_scroll_hides_then_reshows_after_delay() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    host.enable_selection(a.id(), options());
    long_press(&mut host, &a, 34.0, 10.0);

    host.on_scroll_start();
    let session = host.session(a.id()).unwrap();
    assert_eq!(session.visibility(), Visibility::HiddenForScroll);
    assert!(session.handle_views().is_empty());
    assert!(session.toolbar_view().is_none());
    assert_eq!(session.content(), Some("d"));

    let t0 = Instant::now();
    host.on_layout_settled(t0);
    assert_eq!(host.next_deadline(), Some(t0 + Duration::from_millis(100)));

    assert!(!host.tick(&a, t0 + Duration::from_millis(50)));
    assert_eq!(
        host.session(a.id()).unwrap().visibility(),
        Visibility::HiddenForScroll
    );

    assert!(host.tick(&a, t0 + Duration::from_millis(100)));
    let session = host.session(a.id()).unwrap();
    assert_eq!(session.visibility(), Visibility::Visible);
    assert_eq!(session.range().range(), 3..4);
    assert_eq!(session.handle_views().len(), 2);
    assert!(session.toolbar_view().is_some());
    assert_eq!(host.next_deadline(), None);
}

#[test]
fn test_scroll_again_cancels_pending_reshow() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    host.enable_selection(a.id(), options());
    long_press(&mut host, &a, 34.0, 10.0);

    let t0 = Instant::now();
    host.on_scroll_start();
    host.on_layout_settled(t0);
    host.on_scroll_start();
    assert_eq!(host.next_deadline(), None);
    assert!(!host.tick(&a, t0 + Duration::from_millis(500)));

    let t1 = t0 + Duration::from_millis(600);
    host.on_layout_settled(t1);
    assert!(host.tick(&a, t1 + Duration::from_millis(100)));
}

#[test]
fn test_scroll_without_selection_schedules_nothing() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    host.enable_selection(a.id(), options());

    host.on_scroll_start();
    host.on_layout_settled(Instant::now());
    assert_eq!(host.next_deadline(), None);
    assert_eq!(
        host.session(a.id()).unwrap().visibility(),
        Visibility::Hidden
    );
}

#[test]
fn test_armed_selection_waits_for_explicit_show() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    host.arm_deferred_selection(a.id(), options());

    assert_eq!(
        host.session(a.id()).unwrap().visibility(),
        Visibility::ArmedWaiting
    );
    assert_eq!(host.active_surface(), Some(a.id()));

    // Long-press only records the touch
    assert!(!long_press(&mut host, &a, 54.0, 10.0));
    assert_eq!(
        host.session(a.id()).unwrap().visibility(),
        Visibility::ArmedWaiting
    );

    assert!(host.show_armed_selection(&a, false));
    let session = host.session(a.id()).unwrap();
    assert_eq!(session.visibility(), Visibility::Visible);
    assert_eq!(session.content(), Some("f"));

    // Already shown, nothing armed any more
    assert!(!host.show_armed_selection(&a, false));
}

#[test]
fn test_armed_selection_select_all() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    host.arm_deferred_selection(a.id(), options());

    assert!(host.show_armed_selection(&a, true));
    let session = host.session(a.id()).unwrap();
    assert_eq!(session.range().range(), 0..26);
    assert_eq!(session.content(), Some(ALPHABET));
}

#[test]
fn test_arming_evicts_visible_selection() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    let b = block_at(2, ALPHABET, Point::new(100.0, 400.0));
    host.enable_selection(a.id(), options());
    long_press(&mut host, &a, 34.0, 10.0);

    host.arm_deferred_selection(b.id(), options());

    assert_eq!(
        host.session(a.id()).unwrap().visibility(),
        Visibility::Hidden
    );
    assert_eq!(host.active_surface(), Some(b.id()));
    assert!(!host.show_armed_selection(&a, false));
}

#[test]
fn test_hide_active_selection() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    host.enable_selection(a.id(), options());
    let seen = record(&mut host, a.id());
    long_press(&mut host, &a, 34.0, 10.0);

    host.hide_active_selection();

    let session = host.session(a.id()).unwrap();
    assert_eq!(session.visibility(), Visibility::Hidden);
    assert!(session.highlight().is_none());
    assert_eq!(host.active_surface(), None);
    assert_eq!(seen.borrow().last(), Some(&None));
}

#[test]
fn test_detached_surface_ignores_events() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    host.enable_selection(a.id(), options());
    long_press(&mut host, &a, 34.0, 10.0);

    host.on_scroll_start();
    host.on_layout_settled(Instant::now());
    host.on_detach(a.id());

    assert!(host.session(a.id()).is_none());
    assert_eq!(host.active_surface(), None);
    assert_eq!(host.next_deadline(), None);
    assert!(!long_press(&mut host, &a, 34.0, 10.0));
    assert!(!pointer(&mut host, &a, PointerKind::Down, Point::new(125.0, 230.0)));
    assert!(!host.tick(&a, Instant::now() + Duration::from_secs(1)));
}

#[test]
fn test_missed_long_press_tears_down_other_selection() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    let b = block_at(2, "abc", Point::new(100.0, 400.0));
    host.enable_selection(a.id(), options());
    host.enable_selection(b.id(), options());
    let seen = record(&mut host, a.id());

    assert!(long_press(&mut host, &a, 34.0, 10.0));
    // "abc" ends at local x 30
    assert!(!long_press(&mut host, &b, 200.0, 10.0));

    let first = host.session(a.id()).unwrap();
    assert_eq!(first.visibility(), Visibility::Hidden);
    assert!(first.highlight().is_none());
    assert!(first.handle_views().is_empty());
    assert_eq!(host.session(b.id()).unwrap().visibility(), Visibility::Hidden);
    assert_eq!(host.active_surface(), None);
    assert_eq!(*seen.borrow(), vec![Some("d".to_string()), None]);
}

#[test]
fn test_missed_repress_clears_listener() {
    let (mut host, _) = host();
    let a = block(1, "abcdefghij");
    host.enable_selection(a.id(), options());
    let seen = record(&mut host, a.id());

    assert!(long_press(&mut host, &a, 34.0, 10.0));
    assert!(!long_press(&mut host, &a, 300.0, 10.0));

    let session = host.session(a.id()).unwrap();
    assert_eq!(session.visibility(), Visibility::Hidden);
    assert_eq!(session.content(), None);
    assert_eq!(host.active_surface(), None);
    assert_eq!(*seen.borrow(), vec![Some("d".to_string()), None]);
}

#[test]
fn test_huge_initial_span_clamps_to_text_end() {
    let (mut host, _) = host();
    let a = block(1, ALPHABET);
    host.enable_selection(a.id(), options().with_initial_span(usize::MAX));

    assert!(long_press(&mut host, &a, 34.0, 10.0));

    let session = host.session(a.id()).unwrap();
    assert_eq!(session.range().range(), 3..26);
    assert_eq!(session.content(), Some(&ALPHABET[3..]));
}
