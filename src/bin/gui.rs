use selectable_text::gui::{theme, GuiApp};
use selectable_text::SelectionOptions;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Optional options JSON as the first argument
    let selection = match std::env::args().nth(1) {
        Some(path) => {
            let options = SelectionOptions::from_path(&path)?;
            tracing::info!(%path, "loaded selection options");
            options
        }
        None => SelectionOptions::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_title("Selectable Text"),
        ..Default::default()
    };

    eframe::run_native(
        "Selectable Text",
        options,
        Box::new(move |cc| {
            theme::setup_theme(&cc.egui_ctx);
            Ok(Box::new(GuiApp::new(cc, selection)))
        }),
    )?;
    Ok(())
}
