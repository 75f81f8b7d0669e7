use selectable_text::{
    MemoryClipboard, Point, PointerEvent, PointerKind, SelectionHost, SelectionOptions, Side,
    SurfaceId, TextBlock, TextSurface, ToolbarAction,
};
use std::time::{Duration, Instant};

const TEXT: &str = "The quick brown fox jumps over the lazy dog";

fn pointer(host: &mut SelectionHost, block: &TextBlock, kind: PointerKind, raw: Point) -> bool {
    host.on_pointer_event(block, PointerEvent::at(kind, raw, block.screen_origin()))
}

fn report(host: &SelectionHost, id: SurfaceId) {
    if let Some(session) = host.session(id) {
        println!(
            "   {:?} | range {:?} | content {:?}",
            session.visibility(),
            session.range().range(),
            session.content()
        );
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    println!("Selectable text walkthrough\n");

    // 10x20 cells, 40 columns, placed at (100, 200)
    let mut block = TextBlock::new(SurfaceId(1), TEXT);
    block.measure(40, 10.0, 20.0);
    block.set_origin(Point::new(100.0, 200.0));
    block.set_viewport_width(800.0);
    let origin = block.screen_origin();

    let clipboard = MemoryClipboard::new();
    let mut host = SelectionHost::new(Box::new(clipboard.clone()));
    host.enable_selection(block.id(), SelectionOptions::default());
    host.set_select_listener(
        block.id(),
        Box::new(|content: Option<&str>| println!("   listener: {content:?}")),
    );

    println!("Long-press on 'q'...");
    pointer(&mut host, &block, PointerKind::Down, origin + Point::new(45.0, 10.0));
    host.on_long_press(&block);
    report(&host, block.id());

    println!("\nDrag the right handle to the end of \"fox\"...");
    let Some(grab) = host
        .session(block.id())
        .and_then(|session| session.handles())
        .and_then(|handles| handles.by_side(Side::Right).view())
        .map(|view| view.center)
    else {
        println!("   no handles showing");
        return;
    };
    pointer(&mut host, &block, PointerKind::Down, grab);
    for step in 1..=14 {
        let raw = grab + Point::new(step as f32 * 10.0, 0.0);
        pointer(&mut host, &block, PointerKind::Move, raw);
    }
    pointer(&mut host, &block, PointerKind::Up, grab + Point::new(140.0, 0.0));
    report(&host, block.id());

    println!("\nScroll, then let the page settle...");
    host.on_scroll_start();
    report(&host, block.id());
    let settled = Instant::now();
    host.on_layout_settled(settled);
    host.tick(&block, settled + Duration::from_millis(100));
    report(&host, block.id());

    println!("\nTap Copy...");
    let copy = host
        .session(block.id())
        .and_then(|session| session.toolbar_view())
        .and_then(|toolbar| {
            toolbar
                .buttons
                .iter()
                .find(|(action, _)| *action == ToolbarAction::Copy)
                .map(|(_, rect)| rect.center())
        });
    if let Some(copy) = copy {
        pointer(&mut host, &block, PointerKind::Down, copy);
    }
    report(&host, block.id());
    println!("   clipboard: {:?}", clipboard.contents());
}
