use selectable_text::ui::{self, terminal_options, App};
use selectable_text::SelectionOptions;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Log to a file; the terminal belongs to the UI
fn init_tracing() -> std::io::Result<()> {
    let path = std::env::temp_dir().join("selectable-text-tui.log");
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    // Optional options JSON as the first argument
    let options = match std::env::args().nth(1) {
        Some(path) => {
            let options = SelectionOptions::from_path(&path)?;
            tracing::info!(%path, "loaded selection options");
            options
        }
        None => terminal_options(),
    };

    ui::install_panic_hook();
    let mut terminal = ui::init()?;
    let mut app = App::new(options);

    let result = ui::run(&mut terminal, &mut app);

    ui::restore()?;
    result?;
    Ok(())
}
