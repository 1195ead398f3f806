//! Data view abstraction - the visualization hosted by a page

use egui::Ui;
use std::fmt::Debug;

use dv_core::{Axis, PageId, ViewKind};

/// How a page's data is combined with the selected source page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineMode {
    /// Show the selected page's data instead of this page's
    Replace,
}

/// Base trait for everything a page can host (charts, tables, etc)
pub trait DataView: Send {
    /// Kind of visualization; decides which axes the page exposes
    fn kind(&self) -> ViewKind;

    /// Combine this view's data with the dataset's selected page.
    ///
    /// The recomputation is owned by the view and may complete later.
    fn combine(&mut self, how: CombineMode);

    /// Called when the space available to the page changed
    fn resize(&mut self) {}

    /// Take the given axis from another page. Views without axes ignore it.
    fn replace_axis(&mut self, _axis: Axis, _source: PageId) {}

    /// Draw the view. This is the view's on-screen representation.
    fn ui(&mut self, ui: &mut Ui);

    /// Get as any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;
}

impl Debug for dyn DataView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataView").field("kind", &self.kind()).finish()
    }
}
