use super::app::App;
use super::renderer::{document_area, render};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::time::Instant;

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Enter raw mode and the alternate screen with mouse capture on
pub fn init() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to normal state
pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Restore the terminal before a panic message is printed
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous(info);
    }));
}

/// Lay out, draw, settle and handle input until the app quits
pub fn run(terminal: &mut Tui, app: &mut App) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        app.layout(document_area(Rect::new(0, 0, size.width, size.height)));

        terminal.draw(|frame| render(app, frame))?;
        app.after_draw(Instant::now());

        app.handle_input()?;
        if app.should_quit {
            break;
        }
    }
    Ok(())
}
