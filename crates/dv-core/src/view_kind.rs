//! Kinds of visualizations a page can host, and what each kind exposes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::drag::DragKind;
use crate::PageError;

/// Visualization hosted by a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    Table,
    Histogram,
    #[serde(rename = "2DHistogram")]
    Histogram2D,
    Heatmap,
    QuartileVector,
    TrellisHistogram,
    #[serde(rename = "Trellis2DHistogram")]
    TrellisHistogram2D,
    TrellisHeatmap,
    TrellisQuartiles,
    HeavyHitters,
    Schema,
    Load,
    #[serde(rename = "SVD Spectrum")]
    SvdSpectrum,
    LogFile,
    CorrelationHeatmaps,
    Map,
}

/// A draggable axis of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Group,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Group];

    pub fn drag_kind(self) -> DragKind {
        match self {
            Axis::X => DragKind::XAxis,
            Axis::Y => DragKind::YAxis,
            Axis::Group => DragKind::GAxis,
        }
    }

    pub fn from_drag_kind(kind: DragKind) -> Option<Self> {
        match kind {
            DragKind::XAxis => Some(Axis::X),
            DragKind::YAxis => Some(Axis::Y),
            DragKind::GAxis => Some(Axis::Group),
            DragKind::Title => None,
        }
    }

    /// Short label shown on the handle
    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Group => "G",
        }
    }
}

/// Which axis handles a page shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisHandles {
    pub x: bool,
    pub y: bool,
    pub group: bool,
}

impl AxisHandles {
    pub const NONE: Self = Self { x: false, y: false, group: false };
    pub const XY: Self = Self { x: true, y: true, group: false };
    pub const XYG: Self = Self { x: true, y: true, group: true };

    pub fn contains(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Group => self.group,
        }
    }

    /// Exposed axes in display order
    pub fn axes(&self) -> impl Iterator<Item = Axis> + '_ {
        Axis::ALL.into_iter().filter(|axis| self.contains(*axis))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

impl ViewKind {
    pub const ALL: [ViewKind; 16] = [
        ViewKind::Table,
        ViewKind::Histogram,
        ViewKind::Histogram2D,
        ViewKind::Heatmap,
        ViewKind::QuartileVector,
        ViewKind::TrellisHistogram,
        ViewKind::TrellisHistogram2D,
        ViewKind::TrellisHeatmap,
        ViewKind::TrellisQuartiles,
        ViewKind::HeavyHitters,
        ViewKind::Schema,
        ViewKind::Load,
        ViewKind::SvdSpectrum,
        ViewKind::LogFile,
        ViewKind::CorrelationHeatmaps,
        ViewKind::Map,
    ];

    /// Axis handles a page hosting this kind of view exposes
    pub fn axis_handles(self) -> AxisHandles {
        match self {
            ViewKind::Histogram
            | ViewKind::Histogram2D
            | ViewKind::Heatmap
            | ViewKind::QuartileVector => AxisHandles::XY,
            ViewKind::TrellisHistogram
            | ViewKind::TrellisHistogram2D
            | ViewKind::TrellisHeatmap
            | ViewKind::TrellisQuartiles => AxisHandles::XYG,
            ViewKind::Table
            | ViewKind::HeavyHitters
            | ViewKind::Schema
            | ViewKind::Load
            | ViewKind::SvdSpectrum
            | ViewKind::LogFile
            | ViewKind::CorrelationHeatmaps
            | ViewKind::Map => AxisHandles::NONE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewKind::Table => "Table",
            ViewKind::Histogram => "Histogram",
            ViewKind::Histogram2D => "2DHistogram",
            ViewKind::Heatmap => "Heatmap",
            ViewKind::QuartileVector => "QuartileVector",
            ViewKind::TrellisHistogram => "TrellisHistogram",
            ViewKind::TrellisHistogram2D => "Trellis2DHistogram",
            ViewKind::TrellisHeatmap => "TrellisHeatmap",
            ViewKind::TrellisQuartiles => "TrellisQuartiles",
            ViewKind::HeavyHitters => "HeavyHitters",
            ViewKind::Schema => "Schema",
            ViewKind::Load => "Load",
            ViewKind::SvdSpectrum => "SVD Spectrum",
            ViewKind::LogFile => "LogFile",
            ViewKind::CorrelationHeatmaps => "CorrelationHeatmaps",
            ViewKind::Map => "Map",
        }
    }

    /// Section of the user manual describing this kind of view
    pub fn help_fragment(self) -> &'static str {
        match self {
            ViewKind::Table => "table-views",
            ViewKind::Histogram => "uni-dimensional-histogram-views",
            ViewKind::Histogram2D => "two-dimensional-histogram-views",
            ViewKind::Heatmap => "heatmap-views",
            ViewKind::QuartileVector => "quartile-vector-views",
            ViewKind::TrellisHistogram
            | ViewKind::TrellisHistogram2D
            | ViewKind::TrellisHeatmap
            | ViewKind::TrellisQuartiles => "trellis-plots",
            ViewKind::HeavyHitters => "heavy-hitter-views",
            ViewKind::Schema => "data-schema-views",
            ViewKind::Load => "loading-data",
            ViewKind::SvdSpectrum => "svd-spectrum-views",
            ViewKind::LogFile => "log-views",
            ViewKind::CorrelationHeatmaps => "correlation-heatmaps",
            ViewKind::Map => "geographic-views",
        }
    }

    /// `<docs_base>/<fragment>`
    pub fn help_url(self, docs_base: &str) -> String {
        format!("{}/{}", docs_base.trim_end_matches('/'), self.help_fragment())
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewKind {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PageError::UnknownViewKind(s.to_string()))
    }
}
