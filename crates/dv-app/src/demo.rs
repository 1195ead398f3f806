//! Demo dataset for the page viewer
//! Fills a private dataset with a few pages derived from each other

use dv_core::{Axis, PageId, PageTitle, ViewKind};
use dv_views::{CombineMode, DataView, DatasetView};
use egui::{Color32, Rect, Sense, Stroke, Ui};

/// Stand-in visualization that remembers what it was asked to do
pub struct DemoView {
    kind: ViewKind,
    values: Vec<f32>,
    combines: usize,
    borrowed_axes: Vec<(Axis, PageId)>,
}

impl DemoView {
    pub fn new(kind: ViewKind, values: Vec<f32>) -> Self {
        Self {
            kind,
            values,
            combines: 0,
            borrowed_axes: Vec::new(),
        }
    }

    fn bars_ui(&self, ui: &mut Ui) {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), 80.0), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_stroke(rect, 2.0, Stroke::new(1.0, Color32::from_gray(70)));

        let max = self.values.iter().copied().fold(f32::EPSILON, f32::max);
        let width = rect.width() / self.values.len().max(1) as f32;
        for (i, value) in self.values.iter().enumerate() {
            let height = rect.height() * (value / max);
            let left = rect.left() + i as f32 * width;
            let bar = Rect::from_min_max(
                egui::pos2(left + 1.0, rect.bottom() - height),
                egui::pos2(left + width - 1.0, rect.bottom()),
            );
            painter.rect_filled(bar, 0.0, Color32::from_rgb(90, 140, 220));
        }
    }
}

impl DataView for DemoView {
    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn combine(&mut self, how: CombineMode) {
        self.combines += 1;
        self.values.reverse();
        tracing::info!("{} view combined ({:?})", self.kind, how);
    }

    fn replace_axis(&mut self, axis: Axis, source: PageId) {
        self.borrowed_axes.retain(|(a, _)| *a != axis);
        self.borrowed_axes.push((axis, source));
    }

    fn ui(&mut self, ui: &mut Ui) {
        ui.label(format!("{} ({} values)", self.kind, self.values.len()));
        if self.combines > 0 {
            ui.label(format!("Combined {} time(s)", self.combines));
        }
        for (axis, source) in &self.borrowed_axes {
            ui.label(format!("{} axis taken from page {}", axis.label(), source));
        }
        self.bars_ui(ui);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Create the demo pages; `None` if the dataset ran out of page ids
pub fn populate(dataset: &DatasetView) -> Option<()> {
    let table = dataset.add_page(
        PageTitle::new("Census", "loaded from census.csv"),
        None,
        Some(Box::new(DemoView::new(ViewKind::Table, vec![3.0, 5.0, 2.0, 8.0, 6.0]))),
    )?;
    let heatmap = dataset.add_page(
        PageTitle::new(format!("Heatmap of age and income from %p({})", table), "age x income"),
        Some(table),
        Some(Box::new(DemoView::new(ViewKind::Heatmap, vec![1.0, 4.0, 9.0, 4.0, 1.0]))),
    )?;
    dataset.add_page(
        PageTitle::new(format!("Trellis of %p({}) by state, %m rows hidden", heatmap), "grouped by state"),
        Some(heatmap),
        Some(Box::new(DemoView::new(
            ViewKind::TrellisHeatmap,
            vec![2.0, 2.5, 3.0, 7.0, 4.0, 1.0],
        ))),
    )?;
    let histogram = dataset.add_page(
        PageTitle::new("Income histogram", "income, 20 buckets"),
        Some(table),
        Some(Box::new(DemoView::new(ViewKind::Histogram, vec![1.0, 3.0, 7.0, 5.0, 2.0]))),
    )?;
    dataset.add_page(
        PageTitle::new("Schema", ""),
        None,
        Some(Box::new(DemoView::new(ViewKind::Schema, Vec::new()))),
    )?;

    dataset.bind_epsilon(heatmap, vec!["age".to_string(), "income".to_string()]);
    dataset.bind_epsilon(histogram, vec!["income".to_string()]);
    Some(())
}
