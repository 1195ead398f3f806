//! Main application entry point

use std::sync::Arc;

use anyhow::Result;
use eframe::egui::{self, Context};
use tracing::{info, warn};

use dv_core::events::events::{EpsilonChanged, PageClosed, PageCreated};
use dv_core::events::handler_from_fn;
use dv_core::{EventBus, PageId, PageSettings, PageTitle};
use dv_ui::{apply_theme, clear_finished_drag, PageFrame, PageTheme, ScrollAreaExt, WidgetId};
use dv_views::{DatasetView, Page};

mod demo;

/// Environment variable naming the page settings file
const CONFIG_ENV: &str = "DV_PAGES_CONFIG";

/// Main application state
struct PagesApp {
    settings: PageSettings,
    theme: PageTheme,

    /// Page listing the open datasets; it belongs to no dataset
    top: Page,

    dataset: Arc<DatasetView>,

    /// Page to bring into view on the next frame
    scroll_to: Option<PageId>,
}

impl PagesApp {
    fn new(cc: &eframe::CreationContext<'_>, settings: PageSettings) -> Self {
        let theme = PageTheme::default();
        apply_theme(&cc.egui_ctx, &theme);

        let event_bus = Arc::new(EventBus::new());
        log_page_events(&event_bus);

        let dataset = DatasetView::new("census", true, settings.clone(), event_bus);
        if demo::populate(&dataset).is_none() {
            warn!("Demo dataset is incomplete");
        }

        let top = Page::top_level(
            PageId::new(0),
            PageTitle::new(format!("Dataset {}", dataset.name()), "demo data"),
        );

        Self {
            settings,
            theme,
            top,
            dataset,
            scroll_to: None,
        }
    }
}

fn log_page_events(bus: &EventBus) {
    bus.subscribe::<PageCreated>(handler_from_fn(|event| {
        if let Some(created) = event.as_any().downcast_ref::<PageCreated>() {
            info!("Page {} created (source: {:?})", created.page, created.source);
        }
    }));
    bus.subscribe::<PageClosed>(handler_from_fn(|event| {
        if let Some(closed) = event.as_any().downcast_ref::<PageClosed>() {
            info!("Page {} closed", closed.page);
        }
    }));
    bus.subscribe::<EpsilonChanged>(handler_from_fn(|event| {
        if let Some(changed) = event.as_any().downcast_ref::<EpsilonChanged>() {
            info!("Epsilon for {:?} set to {}", changed.columns, changed.epsilon);
        }
    }));
}

impl eframe::App for PagesApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let scroll_to = self.scroll_to.take();

        egui::CentralPanel::default().show(ctx, |ui| {
            let frame = PageFrame::new(&self.settings, &self.theme);
            frame.show(ui, &mut self.top);
            ui.separator();

            egui::ScrollArea::vertical()
                .id_builder(WidgetId::new("dataset").with(self.dataset.name()))
                .show(ui, |ui| {
                    self.dataset.for_each_page_mut(|page| {
                        let response = ui.push_id(page.id(), |ui| frame.show(ui, page)).response;
                        if scroll_to == Some(page.id()) {
                            response.scroll_to_me(Some(egui::Align::TOP));
                        }
                        ui.add_space(4.0);
                    });
                });
        });

        clear_finished_drag(ctx);

        // Links are followed while pages are drawn, so scrolling waits a frame
        if let Some(page) = self.dataset.take_scroll_request() {
            self.scroll_to = Some(page);
            ctx.request_repaint();
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let settings = match std::env::var_os(CONFIG_ENV) {
        Some(path) => PageSettings::load_or_default(path),
        None => PageSettings::default(),
    };
    info!("Starting page viewer (docs at {})", settings.docs_base);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };

    eframe::run_native(
        "Dataset Pages",
        options,
        Box::new(move |cc| Box::new(PagesApp::new(cc, settings))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
