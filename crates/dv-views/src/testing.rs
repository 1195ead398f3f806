//! Recording doubles for page tests

use std::sync::Arc;

use dv_core::{Axis, PageId, PageLookup, ViewKind};
use parking_lot::Mutex;

use crate::{CombineMode, DataView, DatasetContainer};

/// Dataset that records every call made on it
pub(crate) struct RecordingDataset {
    pages: Vec<PageId>,
    private: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingDataset {
    pub(crate) fn with_pages(pages: &[u32]) -> Arc<Self> {
        Arc::new(Self {
            pages: pages.iter().copied().map(PageId::new).collect(),
            private: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub(crate) fn private_with_pages(pages: &[u32]) -> Arc<Self> {
        Arc::new(Self {
            pages: pages.iter().copied().map(PageId::new).collect(),
            private: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        })
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// The call log, for views that should record into it too
    pub(crate) fn log(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

impl PageLookup for RecordingDataset {
    fn scroll_to_page(&self, page: PageId) -> bool {
        if !self.page_exists(page) {
            return false;
        }
        self.record(format!("scroll {page}"));
        true
    }

    fn page_exists(&self, page: PageId) -> bool {
        self.pages.contains(&page)
    }
}

impl DatasetContainer for RecordingDataset {
    fn select(&self, page: PageId) -> bool {
        self.record(format!("select {page}"));
        self.page_exists(page)
    }

    fn shift(&self, page: PageId, up: bool) {
        self.record(format!("shift {page} {}", if up { "up" } else { "down" }));
    }

    fn remove(&self, page: PageId) {
        self.record(format!("remove {page}"));
    }

    fn set_epsilon(&self, columns: &[String], epsilon: f64) {
        self.record(format!("epsilon {columns:?} {epsilon}"));
    }

    fn is_private(&self) -> bool {
        self.private
    }
}

/// View that records the calls made on it
pub(crate) struct RecordingView {
    kind: ViewKind,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingView {
    pub(crate) fn new(kind: ViewKind) -> (Self, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (Self { kind, calls: calls.clone() }, calls)
    }

    /// A view recording into an existing log
    pub(crate) fn sharing(kind: ViewKind, calls: Arc<Mutex<Vec<String>>>) -> Self {
        Self { kind, calls }
    }
}

impl DataView for RecordingView {
    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn combine(&mut self, how: CombineMode) {
        self.calls.lock().push(format!("combine {how:?}"));
    }

    fn resize(&mut self) {
        self.calls.lock().push("resize".to_string());
    }

    fn replace_axis(&mut self, axis: Axis, source: PageId) {
        self.calls.lock().push(format!("axis {axis:?} from {source}"));
    }

    fn ui(&mut self, _ui: &mut egui::Ui) {}

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
