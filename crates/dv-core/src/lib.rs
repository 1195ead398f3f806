//! Core types for dataset pages
//!
//! Page identifiers, the title mini-language, the drag-and-drop payload
//! protocol, and the policy deciding which axes a visualization exposes.

pub mod drag;
pub mod error;
pub mod events;
pub mod page_id;
pub mod settings;
pub mod title;
pub mod view_kind;

// Re-export commonly used types
pub use drag::{decode_payload, encode_payload, DragKind, DragPayload, DropTargets};
pub use error::{InvalidPayload, PageError, SettingsError};
pub use events::EventBus;
pub use page_id::PageId;
pub use settings::PageSettings;
pub use title::{follow_page_link, NoPages, PageLookup, PageTitle, RenderedTitle, TitleSegment, MISSING_MARKER};
pub use view_kind::{Axis, AxisHandles, ViewKind};
