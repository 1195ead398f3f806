//! The frame around a page: header with title, handles and controls, the
//! page's messages, and the hosted view

use dv_core::{DragKind, PageId, PageSettings, TitleSegment};
use dv_views::Page;
use egui::{Align, Layout, RichText, Ui};
use std::time::Duration;

use crate::drag::{drag_handle, drop_target};
use crate::title::{link_ui, title_ui};
use crate::widget_utils::WidgetId;
use crate::PageTheme;

/// Something the user did to a page while it was drawn
#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    FollowLink(PageId),
    ToggleMinimized,
    MoveUp,
    MoveDown,
    Close,
    Drop(String),
    RequestEpsilon(f64),
    DismissMessages,
    /// The space given to the page changed
    Resize,
}

/// Apply an action to the page it was produced for
pub fn apply_action(page: &mut Page, action: PageAction) {
    match action {
        PageAction::FollowLink(target) => {
            page.follow_link(target);
        }
        PageAction::ToggleMinimized => {
            page.toggle_minimized();
        }
        PageAction::MoveUp => page.move_up(),
        PageAction::MoveDown => page.move_down(),
        PageAction::Close => page.close(),
        PageAction::Drop(payload) => {
            page.receive_drop(&payload);
        }
        PageAction::RequestEpsilon(epsilon) => {
            let columns = page.epsilon_columns().map(<[String]>::to_vec).unwrap_or_default();
            if let Err(e) = page.request_epsilon(&columns, epsilon) {
                page.report_error(e);
            }
        }
        PageAction::DismissMessages => page.dismiss_messages(),
        PageAction::Resize => page.resize(),
    }
}

/// Draws pages
pub struct PageFrame<'a> {
    settings: &'a PageSettings,
    theme: &'a PageTheme,
}

impl<'a> PageFrame<'a> {
    pub fn new(settings: &'a PageSettings, theme: &'a PageTheme) -> Self {
        Self { settings, theme }
    }

    /// Draw a page and apply whatever the user did to it
    pub fn show(&self, ui: &mut Ui, page: &mut Page) {
        let actions = self.draw(ui, page);
        for action in actions {
            apply_action(page, action);
        }
    }

    fn draw(&self, ui: &mut Ui, page: &mut Page) -> Vec<PageAction> {
        let mut actions = Vec::new();

        let frame = egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| self.header_ui(ui, page, &mut actions));
            self.messages_ui(ui, page, &mut actions);

            if page.shows_view() {
                if let Some(view) = page.view_mut() {
                    view.ui(ui);
                }
            }
        });

        let width_id = WidgetId::page(page.id()).with("width").id();
        let width = frame.response.rect.width();
        let previous = ui.memory(|mem| mem.data.get_temp::<f32>(width_id));
        ui.memory_mut(|mem| mem.data.insert_temp(width_id, width));
        if width_changed(previous, width) {
            actions.push(PageAction::Resize);
        }

        if let Some(payload) = drop_target(ui, frame.response.rect, self.theme) {
            actions.push(PageAction::Drop(payload));
        }
        actions
    }

    fn header_ui(&self, ui: &mut Ui, page: &Page, actions: &mut Vec<PageAction>) {
        let id = page.id();
        let theme = self.theme;

        if self.settings.show_page_numbers {
            ui.label(RichText::new(format!("{}.", id)).weak());
        }
        drag_handle(ui, id, DragKind::Title, "☰", page.drag_payload(DragKind::Title), theme);

        let title = page.render_title();
        if let Some(target) = title_ui(ui, &title, &page.title().provenance, theme) {
            actions.push(PageAction::FollowLink(target));
        }

        if let Some(TitleSegment::PageLink { page: source, live }) = page.source_link() {
            ui.label(RichText::new(" from ").weak());
            if link_ui(ui, source, live, theme) {
                actions.push(PageAction::FollowLink(source));
            }
        }

        for axis in page.axis_handles().axes() {
            let kind = axis.drag_kind();
            drag_handle(ui, id, kind, axis.label(), page.drag_payload(kind), theme);
        }

        let controls = page.controls();
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if controls.close && ui.small_button("✖").on_hover_text("Close this page").clicked() {
                actions.push(PageAction::Close);
            }
            if controls.minimize
                && ui
                    .small_button(page.minimize_glyph())
                    .on_hover_text(if page.is_minimized() { "Restore" } else { "Minimize" })
                    .clicked()
            {
                actions.push(PageAction::ToggleMinimized);
            }
            if controls.reorder {
                if ui.small_button("▼").on_hover_text("Move down").clicked() {
                    actions.push(PageAction::MoveDown);
                }
                if ui.small_button("▲").on_hover_text("Move up").clicked() {
                    actions.push(PageAction::MoveUp);
                }
            }
            if controls.help {
                if let Some(url) = page.help_url(&self.settings.docs_base) {
                    ui.hyperlink_to("?", url);
                }
            }
            if controls.privacy {
                self.epsilon_ui(ui, page, actions);
            }
        });
    }

    fn epsilon_ui(&self, ui: &mut Ui, page: &Page, actions: &mut Vec<PageAction>) {
        let confirmed = page.epsilon().and_then(|e| e.value);
        let id = WidgetId::page(page.id()).with("epsilon").id();
        let mut value = ui
            .memory(|mem| mem.data.get_temp::<f64>(id))
            .or(confirmed)
            .unwrap_or(1.0);

        if ui.small_button("set").clicked() {
            actions.push(PageAction::RequestEpsilon(value));
        }
        ui.add(egui::DragValue::new(&mut value).speed(0.01).clamp_range(0.001..=100.0));
        ui.memory_mut(|mem| mem.data.insert_temp(id, value));

        let label = match confirmed {
            Some(epsilon) => format!("ε={}", epsilon),
            None => "ε".to_string(),
        };
        let columns = page.epsilon_columns().map(|c| c.join(", ")).unwrap_or_default();
        ui.label(label).on_hover_text(format!("Privacy parameter for {}", columns));
    }

    fn messages_ui(&self, ui: &mut Ui, page: &Page, actions: &mut Vec<PageAction>) {
        let mut any = false;
        for message in page.messages() {
            any = true;
            ui.colored_label(self.theme.error, message.text.as_str())
                .on_hover_text(message_age(message.timestamp.elapsed()));
        }
        if any && ui.small_button("dismiss").clicked() {
            actions.push(PageAction::DismissMessages);
        }
    }
}

/// The first frame only records the width
fn width_changed(previous: Option<f32>, width: f32) -> bool {
    previous.map_or(false, |previous| (previous - width).abs() >= 1.0)
}

fn message_age(elapsed: Duration) -> String {
    match elapsed.as_secs() {
        0..=59 => format!("{}s ago", elapsed.as_secs()),
        secs => format!("{}m ago", secs / 60),
    }
}
