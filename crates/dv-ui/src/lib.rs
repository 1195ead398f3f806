//! egui widgets for drawing pages
//!
//! This crate draws the pages owned by a dataset view: the page header with
//! its title links, drag handles and controls, plus the drag and drop plumbing
//! that moves payloads between pages.

pub mod drag;
pub mod page_frame;
pub mod theme;
pub mod title;
pub mod widget_utils;

pub use drag::{clear_finished_drag, drag_handle, dragged_payload, drop_target};
pub use page_frame::{apply_action, PageAction, PageFrame};
pub use theme::{apply_theme, PageTheme};
pub use title::{link_ui, title_ui};
pub use widget_utils::{drag_handle_id, ScrollAreaExt, WidgetId};
