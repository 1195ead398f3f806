//! Widget ids for page widgets
//!
//! Every page draws the same set of widgets, so ids are scoped by page id to
//! keep egui from reporting clashes between pages.

use dv_core::{DragKind, PageId};
use egui::{Id, ScrollArea};
use std::fmt::Display;

/// Widget ID builder that ensures unique IDs by combining multiple components
pub struct WidgetId {
    components: Vec<String>,
}

impl WidgetId {
    pub fn new(base: impl Display) -> Self {
        Self {
            components: vec![base.to_string()],
        }
    }

    /// Id scoped to one page
    pub fn page(page: PageId) -> Self {
        Self::new(format!("page_{}", page))
    }

    /// Add a component to the ID
    pub fn with(mut self, component: impl Display) -> Self {
        self.components.push(component.to_string());
        self
    }

    /// Build the final ID string
    pub fn build(&self) -> String {
        self.components.join("_")
    }

    pub fn id(&self) -> Id {
        Id::new(self.build())
    }
}

/// Id of the drag handle of `kind` on `page`
pub fn drag_handle_id(page: PageId, kind: DragKind) -> Id {
    WidgetId::page(page).with("drag").with(kind).id()
}

/// Extension trait for ScrollArea to easily add unique IDs
pub trait ScrollAreaExt {
    fn id_builder(self, builder: WidgetId) -> Self;
}

impl ScrollAreaExt for ScrollArea {
    fn id_builder(self, builder: WidgetId) -> Self {
        self.id_source(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_scoped_id() {
        let id = WidgetId::page(PageId::new(7)).with("epsilon").build();
        assert_eq!(id, "page_7_epsilon");
    }

    #[test]
    fn test_drag_handles_are_distinct() {
        let page = PageId::new(2);
        assert_ne!(drag_handle_id(page, DragKind::XAxis), drag_handle_id(page, DragKind::YAxis));
        assert_ne!(
            drag_handle_id(page, DragKind::Title),
            drag_handle_id(PageId::new(3), DragKind::Title)
        );
    }
}
