use crate::handle::{HandleView, Side};
use crate::layout::{TextBlock, TextSurface};
use crate::options;
use crate::selection::{char_slice, Highlight};
use crate::session::ToolbarView;
use crate::ui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// (title bar, document, status bar)
fn chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Document
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Where block text goes for a frame of `area`: the document chunk inside
/// its border
pub fn document_area(area: Rect) -> Rect {
    let [_, document, _] = chunks(area);
    Block::default().borders(Borders::ALL).inner(document)
}

pub fn render(app: &App, frame: &mut Frame) {
    let [title, document, status] = chunks(frame.area());

    render_title_bar(frame, title);
    render_document(app, frame, document);
    render_selection(app, frame);
    render_status_bar(app, frame, status);

    if app.dialog.is_some() {
        render_dialog(frame);
    }
}

/// Terminal color for an ARGB option color; alpha is dropped
pub fn terminal_color(color: options::Color) -> Color {
    Color::Rgb(color.red(), color.green(), color.blue())
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " Selectable",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("-"),
        Span::styled(
            "Text",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ]);

    let title_bar = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(title_bar, area);
}

fn render_document(app: &App, frame: &mut Frame, area: Rect) {
    let host = app.document.host();
    let mut lines: Vec<Line> = Vec::new();

    for entry in app.document.entries() {
        let title = if entry.deferred {
            format!("{} (asks first)", entry.title)
        } else {
            entry.title.clone()
        };
        lines.push(Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));

        let highlight = host
            .session(entry.block.id())
            .and_then(|session| session.highlight().copied());
        lines.extend(block_lines(&entry.block, highlight));
        lines.push(Line::default());
    }

    let document = Paragraph::new(lines)
        .scroll((app.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title("Document"));

    frame.render_widget(document, area);
}

/// One `Line` per wrapped line, selected chars on the highlight color
fn block_lines(block: &TextBlock, highlight: Option<Highlight>) -> Vec<Line<'_>> {
    let Some(layout) = block.monospace() else {
        return Vec::new();
    };
    let text = block.text();

    layout
        .lines()
        .iter()
        .map(|span| {
            let start = span.start;
            let end = span.start + span.visible;
            let selected = highlight.and_then(|highlight| highlight.intersect(start..end));

            match (selected, highlight) {
                (Some(range), Some(highlight)) => {
                    let style = Style::default()
                        .bg(terminal_color(highlight.color))
                        .fg(Color::Black);
                    Line::from(vec![
                        Span::raw(char_slice(text, start, range.start)),
                        Span::styled(char_slice(text, range.start, range.end), style),
                        Span::raw(char_slice(text, range.end, end)),
                    ])
                }
                _ => Line::from(char_slice(text, start, end)),
            }
        })
        .collect()
}

fn render_selection(app: &App, frame: &mut Frame) {
    let Some(session) = app.document.host().active_session() else {
        return;
    };
    let screen = frame.area();
    let document = document_area(screen);

    for view in session.handle_views() {
        render_handle(frame, &view, document);
    }
    if let Some(toolbar) = session.toolbar_view() {
        render_toolbar(frame, &toolbar, screen);
    }
}

/// Terminal cells covering `width` x 1 at (x, y), if fully inside `area`
fn cell_rect(x: f32, y: f32, width: u16, area: Rect) -> Option<Rect> {
    let (x, y) = (x.floor(), y.floor());
    if x < f32::from(area.x) || y < f32::from(area.y) {
        return None;
    }
    let rect = Rect::new(x as u16, y as u16, width, 1);
    (area.intersection(rect) == rect).then_some(rect)
}

fn render_handle(frame: &mut Frame, view: &HandleView, area: Rect) {
    let width = view.bounds.width.round().max(1.0) as u16;
    let Some(rect) = cell_rect(view.bounds.origin.x, view.bounds.origin.y, width, area) else {
        return;
    };
    // Knob away from the text, notch pointing up at the boundary
    let glyph = match view.side {
        Side::Left => "●◥",
        Side::Right => "◤●",
    };
    let handle = Paragraph::new(glyph).style(Style::default().fg(terminal_color(view.color)));
    frame.render_widget(handle, rect);
}

fn render_toolbar(frame: &mut Frame, toolbar: &ToolbarView, area: Rect) {
    for (action, bounds) in toolbar.buttons {
        let width = bounds.width.round().max(1.0) as u16;
        let Some(rect) = cell_rect(bounds.origin.x, bounds.origin.y, width, area) else {
            continue;
        };
        let button = Paragraph::new(action.label())
            .centered()
            .style(
                Style::default()
                    .bg(Color::Gray)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(Clear, rect);
        frame.render_widget(button, rect);
    }
}

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let status_text = if !app.status_message.is_empty() {
        format!(" {}", app.status_message)
    } else {
        format!(
            " Selected: {} | Clipboard: {} | Esc: clear | wheel: scroll | q: quit",
            preview(app.document.selected_text().as_deref()),
            preview(app.clipboard.contents().as_deref()),
        )
    };

    let status_bar =
        Paragraph::new(status_text).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

fn render_dialog(frame: &mut Frame) {
    let area = frame.area();
    let width = 44.min(area.width);
    let height = 3.min(area.height);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let dialog = Paragraph::new("y: select here   a: select all   n: cancel")
        .centered()
        .block(Block::default().borders(Borders::ALL).title("Show selection?"));
    frame.render_widget(Clear, rect);
    frame.render_widget(dialog, rect);
}

/// Short single-line form of `text` for the status bar
fn preview(text: Option<&str>) -> String {
    const MAX: usize = 24;
    match text {
        None => "-".to_string(),
        Some(text) => {
            let flat: String = text
                .chars()
                .map(|c| if c == '\n' { ' ' } else { c })
                .collect();
            if flat.chars().count() > MAX {
                let head: String = flat.chars().take(MAX).collect();
                format!("\"{head}…\"")
            } else {
                format!("\"{flat}\"")
            }
        }
    }
}
