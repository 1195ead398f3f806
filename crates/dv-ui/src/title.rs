//! Drawing rendered page titles

use dv_core::{PageId, RenderedTitle, TitleSegment, MISSING_MARKER};
use egui::{RichText, Ui};

use crate::PageTheme;

/// Draw a title inline; returns the page whose link was clicked, if any
pub fn title_ui(ui: &mut Ui, title: &RenderedTitle, provenance: &str, theme: &PageTheme) -> Option<PageId> {
    let mut clicked = None;

    let response = ui
        .horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            for segment in title.segments() {
                match segment {
                    TitleSegment::Text(text) => {
                        ui.label(RichText::new(text).strong());
                    }
                    TitleSegment::Missing => {
                        ui.label(RichText::new(MISSING_MARKER).italics().color(theme.missing));
                    }
                    TitleSegment::PageLink { page, live } => {
                        if link_ui(ui, *page, *live, theme) {
                            clicked = Some(*page);
                        }
                    }
                }
            }
        })
        .response;

    if !provenance.is_empty() {
        response.on_hover_text(provenance);
    }
    clicked
}

/// A clickable page reference; stale pages are drawn dimmed but stay clickable
/// so the user gets told the page is gone
pub fn link_ui(ui: &mut Ui, page: PageId, live: bool, theme: &PageTheme) -> bool {
    let text = if live {
        RichText::new(page.to_string())
    } else {
        RichText::new(page.to_string()).color(theme.stale_link).strikethrough()
    };
    ui.link(text).on_hover_text(format!("Go to page {}", page)).clicked()
}
