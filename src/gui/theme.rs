use crate::options::Color;
use egui::{Color32, Style, Visuals};

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();
    style.visuals = Visuals::dark();

    // Custom colors
    style.visuals.window_fill = Color32::from_rgb(30, 30, 30);
    style.visuals.panel_fill = BACKGROUND;
    style.visuals.extreme_bg_color = Color32::from_rgb(20, 20, 20);

    ctx.set_style(style);
}

/// egui color for an ARGB option color
pub fn color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.red(), color.green(), color.blue(), color.alpha())
}

pub const BACKGROUND: Color32 = Color32::from_rgb(30, 30, 30);
pub const TEXT_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
pub const TITLE_COLOR: Color32 = Color32::from_rgb(100, 100, 100);
pub const TOOLBAR_BG: Color32 = Color32::from_rgb(60, 60, 60);
pub const TOOLBAR_FG: Color32 = Color32::from_rgb(230, 230, 230);
pub const TOOLBAR_DIVIDER: Color32 = Color32::from_rgb(90, 90, 90);
