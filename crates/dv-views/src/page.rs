//! Pages - one visualization with its title, controls and drop targets

use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use std::time::Instant;

use dv_core::{
    follow_page_link, Axis, AxisHandles, DragKind, DragPayload, DropTargets, NoPages, PageError,
    PageId, PageLookup, PageTitle, RenderedTitle, TitleSegment, ViewKind,
};
use tracing::{debug, info, warn};

use crate::{CombineMode, DataView, DatasetContainer};

const DEFAULT_MAX_MESSAGES: usize = 8;

/// Glyph of the minimize control while the page is shown
pub const MINIMIZE_GLYPH: &str = "🗕";
/// Glyph of the minimize control while the page is minimized
pub const RESTORE_GLYPH: &str = "🗖";

/// Message shown on a page
#[derive(Debug, Clone)]
pub struct PageMessage {
    pub text: String,
    pub timestamp: Instant,
}

/// Privacy parameter shown on a page
#[derive(Debug, Clone, PartialEq)]
pub struct Epsilon {
    /// Columns the parameter applies to
    pub columns: Vec<String>,
    /// Last value confirmed by the dataset
    pub value: Option<f64>,
}

/// Controls a page offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageControls {
    pub minimize: bool,
    pub close: bool,
    pub reorder: bool,
    pub privacy: bool,
    pub help: bool,
}

/// Everything about a page except its drop handlers, which act on this state
pub struct PageState {
    id: PageId,
    title: PageTitle,
    source_page: Option<PageId>,
    dataset: Option<Weak<dyn DatasetContainer>>,
    view: Option<Box<dyn DataView>>,
    minimized: bool,
    handles: AxisHandles,
    epsilon: Option<Epsilon>,
    messages: VecDeque<PageMessage>,
    max_messages: usize,
}

/// A page of a dataset view
pub struct Page {
    state: PageState,
    drop_targets: DropTargets<PageState>,
}

/// Resolves title links through the owning dataset
struct DatasetLookup<'a>(&'a dyn DatasetContainer);

impl PageLookup for DatasetLookup<'_> {
    fn scroll_to_page(&self, page: PageId) -> bool {
        self.0.scroll_to_page(page)
    }

    fn page_exists(&self, page: PageId) -> bool {
        self.0.page_exists(page)
    }
}

impl PageState {
    /// The owning dataset, if the page has one and it is still alive
    fn dataset(&self) -> Option<Arc<dyn DatasetContainer>> {
        self.dataset.as_ref()?.upgrade()
    }

    fn report(&mut self, error: PageError) {
        warn!("Page {}: {}", self.id, error);
        if self.messages.len() == self.max_messages {
            self.messages.pop_front();
        }
        self.messages.push_back(PageMessage {
            text: error.to_string(),
            timestamp: Instant::now(),
        });
    }

    /// Replace this page's data with the data of the page id in `data`
    fn combine_from(&mut self, data: &str) {
        let Ok(source) = data.parse::<PageId>() else {
            debug!("Page {}: ignoring title drop with data {:?}", self.id, data);
            return;
        };
        if source == self.id {
            debug!("Page {}: ignoring combine with itself", self.id);
            return;
        }
        if self.view.is_none() {
            debug!("Page {}: nothing to combine, no view installed", self.id);
            return;
        }
        let Some(dataset) = self.dataset() else {
            debug!("Page {}: nothing to combine, no dataset", self.id);
            return;
        };

        if !dataset.select(source) {
            self.report(PageError::StalePage(source));
            return;
        }
        if let Some(view) = self.view.as_mut() {
            info!("Page {}: replacing data with page {}", self.id, source);
            view.combine(CombineMode::Replace);
        }
    }

    fn replace_axis(&mut self, axis: Axis, data: &str) {
        let Ok(source) = data.parse::<PageId>() else {
            debug!("Page {}: ignoring {:?} axis drop with data {:?}", self.id, axis, data);
            return;
        };
        if source == self.id {
            return;
        }
        let Some(dataset) = self.dataset() else {
            debug!("Page {}: ignoring {:?} axis drop, no dataset", self.id, axis);
            return;
        };
        if !dataset.page_exists(source) {
            self.report(PageError::StalePage(source));
            return;
        }
        if let Some(view) = self.view.as_mut() {
            view.replace_axis(axis, source);
        }
    }
}

impl Page {
    /// The top-level page, which belongs to no dataset
    pub fn top_level(id: PageId, title: PageTitle) -> Self {
        Self::build(id, title, None, None)
    }

    /// A page owned by `dataset`, created from `source_page` if given
    pub fn new(
        id: PageId,
        title: PageTitle,
        source_page: Option<PageId>,
        dataset: Weak<dyn DatasetContainer>,
    ) -> Self {
        let mut page = Self::build(id, title, source_page, Some(dataset));
        page.drop_targets
            .register(DragKind::Title, |state: &mut PageState, data: &str| state.combine_from(data));
        page
    }

    fn build(
        id: PageId,
        title: PageTitle,
        source_page: Option<PageId>,
        dataset: Option<Weak<dyn DatasetContainer>>,
    ) -> Self {
        Self {
            state: PageState {
                id,
                title,
                source_page,
                dataset,
                view: None,
                minimized: false,
                handles: AxisHandles::NONE,
                epsilon: None,
                messages: VecDeque::new(),
                max_messages: DEFAULT_MAX_MESSAGES,
            },
            drop_targets: DropTargets::new(),
        }
    }

    pub fn id(&self) -> PageId {
        self.state.id
    }

    pub fn title(&self) -> &PageTitle {
        &self.state.title
    }

    /// Page this one was created from
    pub fn source_page(&self) -> Option<PageId> {
        self.state.source_page
    }

    /// Link to the page this one was created from
    pub fn source_link(&self) -> Option<TitleSegment> {
        let source = self.state.source_page?;
        let live = self
            .state
            .dataset()
            .map(|dataset| dataset.page_exists(source))
            .unwrap_or(false);
        Some(TitleSegment::PageLink { page: source, live })
    }

    pub fn belongs_to_dataset(&self) -> bool {
        self.state.dataset.is_some()
    }

    pub fn set_max_messages(&mut self, max: usize) {
        self.state.max_messages = max.max(1);
        while self.state.messages.len() > self.state.max_messages {
            self.state.messages.pop_front();
        }
    }

    // --- title ---

    pub fn render_title(&self) -> RenderedTitle {
        match self.state.dataset() {
            Some(dataset) => self.state.title.render(&DatasetLookup(dataset.as_ref())),
            None => self.state.title.render(&NoPages),
        }
    }

    /// Navigate to a page referenced from this page's header.
    ///
    /// A page that no longer exists is reported on this page instead.
    pub fn follow_link(&mut self, target: PageId) -> bool {
        let result = match self.state.dataset() {
            Some(dataset) => follow_page_link(&DatasetLookup(dataset.as_ref()), target),
            None => follow_page_link(&NoPages, target),
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                self.state.report(e);
                false
            }
        }
    }

    // --- view ---

    /// Install a view, returning the one it replaces.
    ///
    /// The exposed axis handles and axis drop targets follow the new view.
    pub fn set_view(&mut self, view: Box<dyn DataView>) -> Option<Box<dyn DataView>> {
        let kind = view.kind();
        let previous = self.state.view.replace(view);

        self.state.handles = if self.belongs_to_dataset() {
            kind.axis_handles()
        } else {
            AxisHandles::NONE
        };

        for axis in Axis::ALL {
            let drag_kind = axis.drag_kind();
            if self.state.handles.contains(axis) {
                self.drop_targets.register(drag_kind, move |state: &mut PageState, data: &str| {
                    state.replace_axis(axis, data)
                });
            } else {
                self.drop_targets.unregister(drag_kind);
            }
        }

        debug!("Page {}: installed {} view", self.state.id, kind);
        previous
    }

    pub fn view(&self) -> Option<&dyn DataView> {
        self.state.view.as_deref()
    }

    pub fn view_mut(&mut self) -> Option<&mut (dyn DataView + 'static)> {
        self.state.view.as_deref_mut()
    }

    pub fn view_kind(&self) -> Option<ViewKind> {
        self.state.view.as_ref().map(|view| view.kind())
    }

    pub fn axis_handles(&self) -> AxisHandles {
        self.state.handles
    }

    pub fn resize(&mut self) {
        if let Some(view) = self.state.view.as_mut() {
            view.resize();
        }
    }

    /// Link to the user manual section for the installed view
    pub fn help_url(&self, docs_base: &str) -> Option<String> {
        self.view_kind().map(|kind| kind.help_url(docs_base))
    }

    // --- drag and drop ---

    /// Payload for dragging the given handle, if this page exposes it
    pub fn drag_payload(&self, kind: DragKind) -> Option<String> {
        let exposed = match kind {
            DragKind::Title => self.belongs_to_dataset(),
            DragKind::XAxis | DragKind::YAxis | DragKind::GAxis => Axis::from_drag_kind(kind)
                .map(|axis| self.state.handles.contains(axis))
                .unwrap_or(false),
        };
        exposed.then(|| DragPayload::new(kind, self.state.id).encode())
    }

    pub fn accepts(&self, kind: DragKind) -> bool {
        self.drop_targets.is_registered(kind)
    }

    /// Handle a payload dropped on this page; unknown kinds are ignored
    pub fn receive_drop(&mut self, raw: &str) -> bool {
        self.drop_targets.dispatch(&mut self.state, raw)
    }

    // --- minimize / restore ---

    pub fn is_minimized(&self) -> bool {
        self.state.minimized
    }

    /// Hide the view's representation; the view itself is kept
    pub fn minimize(&mut self) {
        self.state.minimized = true;
    }

    pub fn restore(&mut self) {
        self.state.minimized = false;
    }

    pub fn toggle_minimized(&mut self) -> bool {
        self.state.minimized = !self.state.minimized;
        self.state.minimized
    }

    pub fn minimize_glyph(&self) -> &'static str {
        if self.state.minimized {
            RESTORE_GLYPH
        } else {
            MINIMIZE_GLYPH
        }
    }

    /// Whether the view should be drawn this frame
    pub fn shows_view(&self) -> bool {
        !self.state.minimized && self.state.view.is_some()
    }

    // --- controls ---

    pub fn controls(&self) -> PageControls {
        let owned = self.belongs_to_dataset();
        PageControls {
            minimize: owned,
            close: owned,
            reorder: owned,
            privacy: self.shows_privacy_indicator(),
            help: self.state.view.is_some(),
        }
    }

    pub fn move_up(&self) {
        if let Some(dataset) = self.state.dataset() {
            dataset.shift(self.state.id, true);
        }
    }

    pub fn move_down(&self) {
        if let Some(dataset) = self.state.dataset() {
            dataset.shift(self.state.id, false);
        }
    }

    /// Ask the dataset to remove this page
    pub fn close(&self) {
        if let Some(dataset) = self.state.dataset() {
            dataset.remove(self.state.id);
        }
    }

    // --- privacy ---

    pub fn shows_privacy_indicator(&self) -> bool {
        self.state.dataset().map(|d| d.is_private()).unwrap_or(false)
    }

    pub fn epsilon(&self) -> Option<&Epsilon> {
        self.state.epsilon.as_ref()
    }

    pub fn epsilon_columns(&self) -> Option<&[String]> {
        self.state.epsilon.as_ref().map(|e| e.columns.as_slice())
    }

    /// Columns whose privacy parameter this page displays
    pub fn set_epsilon_columns(&mut self, columns: Vec<String>) {
        self.state.epsilon = Some(Epsilon { columns, value: None });
    }

    /// Ask the dataset to change epsilon for `columns`.
    ///
    /// Nothing changes locally until the dataset confirms the value.
    pub fn request_epsilon(&self, columns: &[String], epsilon: f64) -> Result<(), PageError> {
        let dataset = match self.state.dataset() {
            Some(dataset) if dataset.is_private() => dataset,
            _ => return Err(PageError::NotPrivate),
        };
        dataset.set_epsilon(columns, epsilon);
        Ok(())
    }

    /// Show a value confirmed by the dataset
    pub fn confirm_epsilon(&mut self, epsilon: f64) {
        match self.state.epsilon.as_mut() {
            Some(current) => current.value = Some(epsilon),
            None => {
                self.state.epsilon = Some(Epsilon {
                    columns: Vec::new(),
                    value: Some(epsilon),
                })
            }
        }
    }

    // --- messages ---

    pub fn report_error(&mut self, error: PageError) {
        self.state.report(error);
    }

    pub fn messages(&self) -> impl Iterator<Item = &PageMessage> {
        self.state.messages.iter()
    }

    pub fn dismiss_messages(&mut self) {
        self.state.messages.clear();
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.state.id)
            .field("title", &self.state.title.format)
            .field("view", &self.view_kind())
            .field("minimized", &self.state.minimized)
            .field("drop_targets", &self.drop_targets)
            .finish()
    }
}
