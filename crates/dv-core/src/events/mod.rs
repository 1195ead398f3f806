use std::sync::Arc;
use parking_lot::Mutex;
use ahash::AHashMap;

/// Bus carrying page lifecycle events out of a dataset
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Events published by a dataset
pub mod events {
    use super::Event;
    use crate::{PageId, ViewKind};

    /// A page was added to the dataset
    #[derive(Debug, Clone, PartialEq)]
    pub struct PageCreated {
        pub page: PageId,
        pub source: Option<PageId>,
        pub view_kind: Option<ViewKind>,
    }

    /// A page was closed or retired
    #[derive(Debug, Clone, PartialEq)]
    pub struct PageClosed {
        pub page: PageId,
    }

    /// The dataset confirmed a privacy parameter for a column set
    #[derive(Debug, Clone, PartialEq)]
    pub struct EpsilonChanged {
        pub columns: Vec<String>,
        pub epsilon: f64,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(PageCreated, PageClosed, EpsilonChanged);
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_insert_with(Vec::new).push(handler);
    }

    /// Publish an event to every subscriber of its type
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Event handler built from a closure
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::{PageClosed, PageCreated};
    use super::*;
    use crate::PageId;

    #[test]
    fn test_publish_reaches_subscribers_of_type() {
        let bus = EventBus::new();
        let closed = Arc::new(Mutex::new(Vec::new()));

        let sink = closed.clone();
        bus.subscribe::<PageClosed>(handler_from_fn(move |event| {
            if let Some(e) = event.as_any().downcast_ref::<PageClosed>() {
                sink.lock().push(e.page);
            }
        }));

        bus.publish(PageCreated {
            page: PageId::new(1),
            source: None,
            view_kind: None,
        });
        bus.publish(PageClosed { page: PageId::new(1) });

        assert_eq!(*closed.lock(), vec![PageId::new(1)]);
    }
}
