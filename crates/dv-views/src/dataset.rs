//! Dataset view - owns the pages showing one dataset
//! Based on the dockable viewport, with pages kept in display order

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use dv_core::events::events::{EpsilonChanged, PageClosed, PageCreated};
use dv_core::{EventBus, PageId, PageLookup, PageSettings, PageTitle};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::{DataView, Page};

/// What a page may ask of the dataset that owns it
pub trait DatasetContainer: PageLookup + Send + Sync {
    /// Make `page` the source of the next combine; false if it does not exist
    fn select(&self, page: PageId) -> bool;

    /// Move a page one position up or down in display order
    fn shift(&self, page: PageId, up: bool);

    /// Remove a page from the dataset
    fn remove(&self, page: PageId);

    /// Request a new privacy parameter for a set of columns
    fn set_epsilon(&self, columns: &[String], epsilon: f64);

    /// Whether the dataset is accessed under differential privacy
    fn is_private(&self) -> bool;
}

/// The pages of one dataset.
///
/// Pages refer to each other and to the dataset only by [`PageId`]. Work a page
/// requests while it is being handled (removal, epsilon updates) is applied by
/// [`DatasetView::flush`], which the page accessors call once they release the
/// page table.
pub struct DatasetView {
    name: String,
    private: bool,
    settings: PageSettings,
    this: Weak<DatasetView>,
    pages: Mutex<BTreeMap<PageId, Page>>,
    order: RwLock<Vec<PageId>>,
    /// `None` once every id has been handed out
    next_id: Mutex<Option<PageId>>,
    selected: RwLock<Option<PageId>>,
    epsilons: RwLock<BTreeMap<Vec<String>, f64>>,
    pending_epsilons: Mutex<Vec<(Vec<String>, f64)>>,
    retired: Mutex<Vec<PageId>>,
    scroll_request: Mutex<Option<PageId>>,
    event_bus: Arc<EventBus>,
}

/// Column sets are compared sorted and without duplicates
fn column_key(columns: &[String]) -> Vec<String> {
    let mut key = columns.to_vec();
    key.sort();
    key.dedup();
    key
}

impl DatasetView {
    pub fn new(
        name: impl Into<String>,
        private: bool,
        settings: PageSettings,
        event_bus: Arc<EventBus>,
    ) -> Arc<Self> {
        let name = name.into();
        info!("Opening dataset '{}' (private: {})", name, private);
        Arc::new_cyclic(|this| Self {
            name,
            private,
            settings,
            this: this.clone(),
            pages: Mutex::new(BTreeMap::new()),
            order: RwLock::new(Vec::new()),
            next_id: Mutex::new(Some(PageId::new(1))),
            selected: RwLock::new(None),
            epsilons: RwLock::new(BTreeMap::new()),
            pending_epsilons: Mutex::new(Vec::new()),
            retired: Mutex::new(Vec::new()),
            scroll_request: Mutex::new(None),
            event_bus,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// Create a page, placed right after `source` when it is given and alive.
    ///
    /// Ids are never reused; `None` once they have run out.
    pub fn add_page(
        &self,
        title: PageTitle,
        source: Option<PageId>,
        view: Option<Box<dyn DataView>>,
    ) -> Option<PageId> {
        let id = {
            let mut next = self.next_id.lock();
            let Some(id) = *next else {
                warn!("Dataset '{}': page ids exhausted, not creating '{}'", self.name, title.format);
                return None;
            };
            *next = id.checked_next();
            id
        };

        let owner: Weak<dyn DatasetContainer> = self.this.clone();
        let mut page = Page::new(id, title, source, owner);
        page.set_max_messages(self.settings.max_messages);
        let view_kind = view.as_ref().map(|v| v.kind());
        if let Some(view) = view {
            page.set_view(view);
        }

        self.pages.lock().insert(id, page);
        {
            let mut order = self.order.write();
            let position = source
                .and_then(|s| order.iter().position(|p| *p == s))
                .map(|p| p + 1)
                .unwrap_or(order.len());
            order.insert(position, id);
        }

        info!("Dataset '{}': created page {}", self.name, id);
        self.event_bus.publish(PageCreated {
            page: id,
            source,
            view_kind,
        });
        Some(id)
    }

    /// Page ids in display order
    pub fn page_ids(&self) -> Vec<PageId> {
        self.order.read().clone()
    }

    pub fn len(&self) -> usize {
        self.order.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.read().is_empty()
    }

    pub fn with_page<R>(&self, id: PageId, f: impl FnOnce(&Page) -> R) -> Option<R> {
        if !self.page_exists(id) {
            return None;
        }
        self.pages.lock().get(&id).map(f)
    }

    /// Run `f` on a page, then apply the work it requested
    pub fn with_page_mut<R>(&self, id: PageId, f: impl FnOnce(&mut Page) -> R) -> Option<R> {
        let result = if self.page_exists(id) {
            self.pages.lock().get_mut(&id).map(f)
        } else {
            None
        };
        self.flush();
        result
    }

    /// Visit every page in display order, then apply the work they requested
    pub fn for_each_page_mut(&self, mut f: impl FnMut(&mut Page)) {
        let order = self.page_ids();
        {
            let mut pages = self.pages.lock();
            for id in order {
                if let Some(page) = pages.get_mut(&id) {
                    f(page);
                }
            }
        }
        self.flush();
    }

    /// Deliver a drag payload to a page; unknown pages ignore it
    pub fn drop_payload(&self, target: PageId, raw: &str) -> bool {
        let handled = self
            .with_page_mut(target, |page| page.receive_drop(raw))
            .unwrap_or(false);
        if !handled {
            debug!("Dataset '{}': drop {:?} on page {} ignored", self.name, raw, target);
        }
        handled
    }

    /// Page selected as the source of the last combine
    pub fn selected(&self) -> Option<PageId> {
        *self.selected.read()
    }

    /// Confirmed epsilon for a set of columns
    pub fn epsilon(&self, columns: &[String]) -> Option<f64> {
        self.epsilons.read().get(&column_key(columns)).copied()
    }

    /// Declare the columns a page's privacy parameter covers
    pub fn bind_epsilon(&self, page: PageId, columns: Vec<String>) {
        let current = self.epsilon(&columns);
        self.with_page_mut(page, |page| {
            page.set_epsilon_columns(columns);
            if let Some(value) = current {
                page.confirm_epsilon(value);
            }
        });
    }

    /// Page the user asked to bring into view, if any
    pub fn take_scroll_request(&self) -> Option<PageId> {
        self.scroll_request.lock().take()
    }

    /// Apply removals and epsilon updates requested by pages.
    ///
    /// Must not be called while a page is borrowed through this dataset.
    pub fn flush(&self) {
        let retired: Vec<PageId> = std::mem::take(&mut *self.retired.lock());
        let updates: Vec<(Vec<String>, f64)> = std::mem::take(&mut *self.pending_epsilons.lock());
        if retired.is_empty() && updates.is_empty() {
            return;
        }

        let mut pages = self.pages.lock();
        for id in retired {
            if pages.remove(&id).is_some() {
                debug!("Dataset '{}': dropped page {}", self.name, id);
            }
        }
        for (columns, epsilon) in updates {
            for page in pages.values_mut() {
                let matches = page
                    .epsilon_columns()
                    .map(|c| column_key(c) == columns)
                    .unwrap_or(false);
                if matches {
                    page.confirm_epsilon(epsilon);
                }
            }
        }
    }
}

impl PageLookup for DatasetView {
    fn scroll_to_page(&self, page: PageId) -> bool {
        if !self.page_exists(page) {
            return false;
        }
        *self.scroll_request.lock() = Some(page);
        true
    }

    fn page_exists(&self, page: PageId) -> bool {
        self.order.read().contains(&page)
    }
}

impl DatasetContainer for DatasetView {
    fn select(&self, page: PageId) -> bool {
        if !self.page_exists(page) {
            return false;
        }
        *self.selected.write() = Some(page);
        true
    }

    fn shift(&self, page: PageId, up: bool) {
        let mut order = self.order.write();
        let Some(index) = order.iter().position(|p| *p == page) else {
            return;
        };
        if up && index > 0 {
            order.swap(index, index - 1);
        } else if !up && index + 1 < order.len() {
            order.swap(index, index + 1);
        }
    }

    fn remove(&self, page: PageId) {
        {
            let mut order = self.order.write();
            let Some(index) = order.iter().position(|p| *p == page) else {
                return;
            };
            order.remove(index);
        }
        {
            let mut selected = self.selected.write();
            if *selected == Some(page) {
                *selected = None;
            }
        }
        self.retired.lock().push(page);

        info!("Dataset '{}': closed page {}", self.name, page);
        self.event_bus.publish(PageClosed { page });
    }

    fn set_epsilon(&self, columns: &[String], epsilon: f64) {
        if !self.private {
            debug!("Dataset '{}' is not private; epsilon request ignored", self.name);
            return;
        }
        let key = column_key(columns);
        self.epsilons.write().insert(key.clone(), epsilon);
        self.pending_epsilons.lock().push((key.clone(), epsilon));

        info!("Dataset '{}': epsilon for {:?} is now {}", self.name, key, epsilon);
        self.event_bus.publish(EpsilonChanged {
            columns: key,
            epsilon,
        });
    }

    fn is_private(&self) -> bool {
        self.private
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingView;
    use dv_core::events::handler_from_fn;
    use dv_core::ViewKind;

    fn dataset(private: bool) -> Arc<DatasetView> {
        DatasetView::new("flights", private, PageSettings::default(), Arc::new(EventBus::new()))
    }

    fn title(format: &str) -> PageTitle {
        PageTitle::new(format, "test")
    }

    #[test]
    fn test_pages_follow_their_source() {
        let ds = dataset(false);
        let a = ds.add_page(title("a"), None, None).unwrap();
        let b = ds.add_page(title("b"), None, None).unwrap();
        let c = ds.add_page(title("c from a"), Some(a), None).unwrap();

        assert_eq!(ds.page_ids(), vec![a, c, b]);
        assert_eq!(ds.with_page(c, |p| p.source_page()), Some(Some(a)));
    }

    #[test]
    fn test_title_drop_replaces_data() {
        let ds = dataset(false);
        let (view, calls) = RecordingView::new(ViewKind::Histogram);
        let source = ds.add_page(title("source"), None, None).unwrap();
        let target = ds.add_page(title("target"), None, Some(Box::new(view))).unwrap();

        assert!(ds.drop_payload(target, &format!("Title:{source}")));

        assert_eq!(ds.selected(), Some(source));
        assert_eq!(*calls.lock(), vec!["combine Replace".to_string()]);
    }

    #[test]
    fn test_drop_on_missing_page_is_ignored() {
        let ds = dataset(false);
        let source = ds.add_page(title("source"), None, None).unwrap();

        assert!(!ds.drop_payload(PageId::new(99), &format!("Title:{source}")));
        assert!(!ds.drop_payload(source, "Unknown:1"));
        assert_eq!(ds.selected(), None);
    }

    #[test]
    fn test_close_from_inside_page() {
        let ds = dataset(false);
        let a = ds.add_page(title("a"), None, None).unwrap();
        let b = ds.add_page(title("b"), None, None).unwrap();
        ds.with_page_mut(a, |_| ds.select(a));

        ds.with_page_mut(a, |page| page.close());

        assert_eq!(ds.page_ids(), vec![b]);
        assert!(ds.with_page(a, |_| ()).is_none());
        assert_eq!(ds.selected(), None);
        assert!(!ds.drop_payload(a, &format!("Title:{b}")));
    }

    #[test]
    fn test_combine_with_closed_page_is_reported() {
        let ds = dataset(false);
        let (view, calls) = RecordingView::new(ViewKind::Table);
        let gone = ds.add_page(title("gone"), None, None).unwrap();
        let target = ds.add_page(title("target"), None, Some(Box::new(view))).unwrap();
        ds.remove(gone);

        ds.drop_payload(target, &format!("Title:{gone}"));

        assert!(calls.lock().is_empty());
        let messages = ds.with_page(target, |p| p.messages().count());
        assert_eq!(messages, Some(1));
    }

    #[test]
    fn test_shift_pages() {
        let ds = dataset(false);
        let a = ds.add_page(title("a"), None, None).unwrap();
        let b = ds.add_page(title("b"), None, None).unwrap();
        let c = ds.add_page(title("c"), None, None).unwrap();

        ds.with_page(c, |page| page.move_up());
        assert_eq!(ds.page_ids(), vec![a, c, b]);
        ds.with_page(a, |page| page.move_up());
        ds.with_page(b, |page| page.move_down());
        assert_eq!(ds.page_ids(), vec![a, c, b]);
    }

    #[test]
    fn test_title_links_and_scrolling() {
        let ds = dataset(false);
        let a = ds.add_page(title("a"), None, None).unwrap();
        let b = ds.add_page(title(&format!("Filtered(%p({a}))")), Some(a), None).unwrap();

        assert!(ds.with_page_mut(b, |page| page.follow_link(a)).unwrap_or(false));
        assert_eq!(ds.take_scroll_request(), Some(a));
        assert_eq!(ds.take_scroll_request(), None);

        ds.remove(a);
        let text = ds.with_page(b, |page| page.render_title().text());
        assert_eq!(text.as_deref(), Some(format!("Filtered({a})").as_str()));
        assert_eq!(ds.with_page_mut(b, |page| page.follow_link(a)), Some(false));
        assert_eq!(ds.take_scroll_request(), None);
    }

    #[test]
    fn test_epsilon_is_redistributed() {
        let ds = dataset(true);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        ds.event_bus().subscribe::<EpsilonChanged>(handler_from_fn(move |event| {
            if let Some(e) = event.as_any().downcast_ref::<EpsilonChanged>() {
                sink.lock().push(e.epsilon);
            }
        }));

        let a = ds.add_page(title("a"), None, None).unwrap();
        let b = ds.add_page(title("b"), None, None).unwrap();
        let c = ds.add_page(title("c"), None, None).unwrap();
        let columns = vec!["origin".to_string(), "dest".to_string()];
        ds.bind_epsilon(a, columns.clone());
        ds.bind_epsilon(b, vec!["dest".to_string(), "origin".to_string()]);
        ds.bind_epsilon(c, vec!["dest".to_string()]);

        let forwarded = ds.with_page_mut(a, |page| page.request_epsilon(&columns, 0.25));
        assert_eq!(forwarded, Some(Ok(())));

        let value = |id| ds.with_page(id, |p| p.epsilon().and_then(|e| e.value)).flatten();
        assert_eq!(value(a), Some(0.25));
        assert_eq!(value(b), Some(0.25));
        assert_eq!(value(c), None);
        assert_eq!(ds.epsilon(&columns), Some(0.25));
        assert_eq!(*events.lock(), vec![0.25]);

        let d = ds.add_page(title("d"), None, None).unwrap();
        ds.bind_epsilon(d, columns);
        assert_eq!(value(d), Some(0.25));
    }

    #[test]
    fn test_public_dataset_has_no_privacy() {
        let ds = dataset(false);
        let a = ds.add_page(title("a"), None, None).unwrap();

        assert_eq!(ds.with_page(a, |p| p.shows_privacy_indicator()), Some(false));
        ds.set_epsilon(&["x".to_string()], 1.0);
        assert_eq!(ds.epsilon(&["x".to_string()]), None);
    }

    #[test]
    fn test_pages_created_events() {
        let ds = dataset(false);
        let created = Arc::new(Mutex::new(Vec::new()));
        let sink = created.clone();
        ds.event_bus().subscribe::<PageCreated>(handler_from_fn(move |event| {
            if let Some(e) = event.as_any().downcast_ref::<PageCreated>() {
                sink.lock().push((e.page, e.view_kind));
            }
        }));

        let (view, _) = RecordingView::new(ViewKind::Heatmap);
        let id = ds.add_page(title("heatmap"), None, Some(Box::new(view))).unwrap();

        assert_eq!(*created.lock(), vec![(id, Some(ViewKind::Heatmap))]);
        assert_eq!(
            ds.with_page(id, |p| p.axis_handles()),
            Some(dv_core::AxisHandles::XY)
        );
    }

    #[test]
    fn test_page_ids_are_not_reused_when_exhausted() {
        let ds = dataset(false);
        *ds.next_id.lock() = Some(PageId::new(u32::MAX));

        let last = ds.add_page(title("last"), None, None);
        assert_eq!(last, Some(PageId::new(u32::MAX)));
        assert_eq!(ds.add_page(title("one more"), None, None), None);
        assert_eq!(ds.page_ids(), vec![PageId::new(u32::MAX)]);
    }
}
