use egui::{Color32, Context, Rounding, Stroke, Style, Visuals};

/// Colors used when drawing pages
#[derive(Debug, Clone)]
pub struct PageTheme {
    pub dark_mode: bool,
    /// Missing-value markers in titles
    pub missing: Color32,
    /// Links to pages that no longer exist
    pub stale_link: Color32,
    /// Error messages under the page header
    pub error: Color32,
    /// Outline of a page a payload can be dropped on
    pub drop_highlight: Color32,
    /// Draggable axis handles
    pub handle: Color32,
}

impl Default for PageTheme {
    fn default() -> Self {
        Self {
            dark_mode: true,
            missing: Color32::from_rgb(230, 180, 80),
            stale_link: Color32::from_rgb(120, 120, 120),
            error: Color32::from_rgb(230, 80, 80),
            drop_highlight: Color32::from_rgb(100, 150, 250),
            handle: Color32::from_rgb(80, 200, 160),
        }
    }
}

/// Apply the application theme
pub fn apply_theme(ctx: &Context, theme: &PageTheme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };

    let panel_bg = Color32::from_rgb(31, 31, 31);
    let widget_bg = Color32::from_rgb(40, 40, 40);
    let accent_color = theme.drop_highlight;

    if theme.dark_mode {
        visuals.window_fill = panel_bg;
        visuals.panel_fill = panel_bg;
        visuals.faint_bg_color = widget_bg;
    }

    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);
    visuals.widgets.active.rounding = Rounding::same(4.0);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color);

    visuals.selection.bg_fill = accent_color.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent_color);
    visuals.hyperlink_color = accent_color;

    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(6.0, 2.0);

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}
