//! Drag and drop between pages
//!
//! While a handle is dragged its payload string is parked in egui's temporary
//! memory. A page that is under the pointer when the button is released takes
//! the payload and hands it to its drop targets.

use dv_core::{DragKind, PageId};
use egui::{Context, CursorIcon, Id, Rect, RichText, Sense, Stroke, Ui};

use crate::widget_utils::drag_handle_id;
use crate::PageTheme;

fn payload_id() -> Id {
    Id::new("dv_drag_payload")
}

/// Payload currently being dragged
pub fn dragged_payload(ctx: &Context) -> Option<String> {
    ctx.memory(|mem| mem.data.get_temp::<String>(payload_id()))
}

fn set_dragged_payload(ctx: &Context, payload: String) {
    tracing::debug!("Drag started: {}", payload);
    ctx.memory_mut(|mem| mem.data.insert_temp(payload_id(), payload));
}

/// Forget a payload whose drag ended without a target
pub fn clear_finished_drag(ctx: &Context) {
    if ctx.input(|i| i.pointer.any_released()) {
        ctx.memory_mut(|mem| mem.data.remove::<String>(payload_id()));
    }
}

/// A draggable handle. Nothing is drawn without a payload.
pub fn drag_handle(
    ui: &mut Ui,
    page: PageId,
    kind: DragKind,
    label: &str,
    payload: Option<String>,
    theme: &PageTheme,
) {
    let Some(payload) = payload else {
        return;
    };

    let response = ui
        .push_id(drag_handle_id(page, kind), |ui| {
            ui.add(egui::Label::new(RichText::new(label).color(theme.handle).strong()).sense(Sense::drag()))
        })
        .inner
        .on_hover_cursor(CursorIcon::Grab)
        .on_hover_text(format!("Drag {} onto another page", kind));

    if response.drag_started() {
        set_dragged_payload(ui.ctx(), payload);
    }
}

/// Take a payload released over `rect`, outlining the area while it is hovered
pub fn drop_target(ui: &mut Ui, rect: Rect, theme: &PageTheme) -> Option<String> {
    dragged_payload(ui.ctx())?;
    if !ui.rect_contains_pointer(rect) {
        return None;
    }

    ui.painter().rect_stroke(rect, 4.0, Stroke::new(2.0, theme.drop_highlight));

    if ui.input(|i| i.pointer.any_released()) {
        let payload = dragged_payload(ui.ctx());
        ui.ctx().memory_mut(|mem| mem.data.remove::<String>(payload_id()));
        return payload;
    }
    None
}
