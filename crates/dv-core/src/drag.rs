//! Drag-and-drop payloads exchanged between pages
//!
//! A payload travels as plain text of the form `<kind>:<data>`, where `kind`
//! names the handle that was dragged and `data` is the id of the page it came
//! from. Each page keeps a [`DropTargets`] table with at most one handler per
//! kind; a drop whose kind has no handler is ignored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{InvalidPayload, PageId};

/// Handles a page can expose for dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragKind {
    /// The whole page, dragged by its title
    Title,
    XAxis,
    YAxis,
    /// Grouping axis of trellis views
    GAxis,
}

impl DragKind {
    pub const ALL: [DragKind; 4] = [DragKind::Title, DragKind::XAxis, DragKind::YAxis, DragKind::GAxis];

    /// Name used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            DragKind::Title => "Title",
            DragKind::XAxis => "XAxis",
            DragKind::YAxis => "YAxis",
            DragKind::GAxis => "GAxis",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for DragKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode a payload as `<kind>:<data>`
pub fn encode_payload(kind: DragKind, data: &str) -> String {
    format!("{}:{}", kind.as_str(), data)
}

/// Split a payload at its first colon.
///
/// Returns `None` when there is no colon or the kind is not known.
pub fn decode_payload(raw: &str) -> Option<(DragKind, &str)> {
    let (kind, data) = raw.split_once(':')?;
    Some((DragKind::from_name(kind)?, data))
}

/// A payload whose data is the id of the page it was dragged from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    Title(PageId),
    XAxis(PageId),
    YAxis(PageId),
    GAxis(PageId),
}

impl DragPayload {
    pub fn new(kind: DragKind, source: PageId) -> Self {
        match kind {
            DragKind::Title => DragPayload::Title(source),
            DragKind::XAxis => DragPayload::XAxis(source),
            DragKind::YAxis => DragPayload::YAxis(source),
            DragKind::GAxis => DragPayload::GAxis(source),
        }
    }

    pub fn kind(&self) -> DragKind {
        match self {
            DragPayload::Title(_) => DragKind::Title,
            DragPayload::XAxis(_) => DragKind::XAxis,
            DragPayload::YAxis(_) => DragKind::YAxis,
            DragPayload::GAxis(_) => DragKind::GAxis,
        }
    }

    /// Page the payload was dragged from
    pub fn source(&self) -> PageId {
        match *self {
            DragPayload::Title(page)
            | DragPayload::XAxis(page)
            | DragPayload::YAxis(page)
            | DragPayload::GAxis(page) => page,
        }
    }

    pub fn encode(&self) -> String {
        encode_payload(self.kind(), &self.source().to_string())
    }
}

impl FromStr for DragPayload {
    type Err = InvalidPayload;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (kind, data) = decode_payload(raw).ok_or_else(|| InvalidPayload(raw.to_string()))?;
        let source = data.parse::<PageId>().map_err(|_| InvalidPayload(raw.to_string()))?;
        Ok(DragPayload::new(kind, source))
    }
}

type DropHandler<C> = Box<dyn FnMut(&mut C, &str) + Send>;

/// Drop handlers of a single page, one slot per [`DragKind`].
///
/// `C` is the state the handlers operate on; it is passed in at dispatch time
/// so the table can live next to that state.
pub struct DropTargets<C> {
    title: Option<DropHandler<C>>,
    x_axis: Option<DropHandler<C>>,
    y_axis: Option<DropHandler<C>>,
    g_axis: Option<DropHandler<C>>,
}

impl<C> DropTargets<C> {
    pub fn new() -> Self {
        Self {
            title: None,
            x_axis: None,
            y_axis: None,
            g_axis: None,
        }
    }

    fn slot(&mut self, kind: DragKind) -> &mut Option<DropHandler<C>> {
        match kind {
            DragKind::Title => &mut self.title,
            DragKind::XAxis => &mut self.x_axis,
            DragKind::YAxis => &mut self.y_axis,
            DragKind::GAxis => &mut self.g_axis,
        }
    }

    /// Install the handler for `kind`, replacing any previous one
    pub fn register<F>(&mut self, kind: DragKind, handler: F)
    where
        F: FnMut(&mut C, &str) + Send + 'static,
    {
        *self.slot(kind) = Some(Box::new(handler));
    }

    pub fn unregister(&mut self, kind: DragKind) {
        *self.slot(kind) = None;
    }

    pub fn is_registered(&self, kind: DragKind) -> bool {
        match kind {
            DragKind::Title => self.title.is_some(),
            DragKind::XAxis => self.x_axis.is_some(),
            DragKind::YAxis => self.y_axis.is_some(),
            DragKind::GAxis => self.g_axis.is_some(),
        }
    }

    /// Kinds that currently accept drops
    pub fn accepted_kinds(&self) -> Vec<DragKind> {
        DragKind::ALL
            .into_iter()
            .filter(|kind| self.is_registered(*kind))
            .collect()
    }

    /// Decode `raw` and run the matching handler with its data.
    ///
    /// Returns whether a handler ran.
    pub fn dispatch(&mut self, ctx: &mut C, raw: &str) -> bool {
        let Some((kind, data)) = decode_payload(raw) else {
            tracing::debug!("Ignoring unrecognized drop payload {:?}", raw);
            return false;
        };

        match self.slot(kind) {
            Some(handler) => {
                handler(ctx, data);
                true
            }
            None => {
                tracing::debug!("No handler for {} drops", kind);
                false
            }
        }
    }
}

impl<C> Default for DropTargets<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for DropTargets<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropTargets")
            .field("accepted", &self.accepted_kinds())
            .finish()
    }
}
