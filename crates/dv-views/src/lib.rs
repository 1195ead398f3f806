//! Pages of a dataset view
//!
//! A [`Page`] hosts one [`DataView`] and talks to the [`DatasetContainer`]
//! that owns it; [`DatasetView`] is the container used by the application.

mod data_view;
mod dataset;
mod page;
#[cfg(test)]
mod testing;

pub use data_view::{CombineMode, DataView};
pub use dataset::{DatasetContainer, DatasetView};
pub use page::{Epsilon, Page, PageControls, PageMessage, MINIMIZE_GLYPH, RESTORE_GLYPH};
