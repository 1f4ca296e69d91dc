//! # Building Model
//!
//! The validated, per-floor output of the engine. A [`Building`] owns its
//! storeys, slabs and columns; cross references between them are
//! [`StoreyIndex`] values, never owning pointers.
//!
//! ## Structure
//!
//! ```text
//! Building
//! ├── storeys: Vec<Storey>    (Master | Similar, bottom to top)
//! ├── slabs:   Vec<Slab>      (one per storey)
//! └── columns: Vec<Column>    (one per coordinate per storey transition)
//! ```

use serde::{Deserialize, Serialize};

use crate::scalars::{Elevation, Height, Name, PositiveInt, PositiveLength};
use crate::units::Millimetres;

/// Position of a storey in [`Building::storeys`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StoreyIndex(usize);

impl StoreyIndex {
    pub(crate) fn new(index: usize) -> Self {
        StoreyIndex(index)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Point in space, millimetres. `z` is measured from the base datum.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    pub fn distance_to(&self, other: &Point3) -> Millimetres {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        Millimetres((dx * dx + dy * dy + dz * dz).sqrt())
    }
}

/// The first storey of a group; owns the group's geometry definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MasterStorey {
    pub name: Name,
    pub floor: PositiveInt,
    pub elevation: Elevation,
    pub height: Height,
}

/// A storey that reuses a master storey's geometry by reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarStorey {
    pub name: Name,
    pub floor: PositiveInt,
    pub elevation: Elevation,
    pub height: Height,
    /// The master storey of the same group
    pub similar_to: StoreyIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Storey {
    Master(MasterStorey),
    Similar(SimilarStorey),
}

impl Storey {
    pub fn name(&self) -> &Name {
        match self {
            Storey::Master(s) => &s.name,
            Storey::Similar(s) => &s.name,
        }
    }

    pub fn floor(&self) -> PositiveInt {
        match self {
            Storey::Master(s) => s.floor,
            Storey::Similar(s) => s.floor,
        }
    }

    pub fn elevation(&self) -> Elevation {
        match self {
            Storey::Master(s) => s.elevation,
            Storey::Similar(s) => s.elevation,
        }
    }

    pub fn height(&self) -> Height {
        match self {
            Storey::Master(s) => s.height,
            Storey::Similar(s) => s.height,
        }
    }

    /// Elevation of the top of this storey.
    pub fn top_elevation(&self) -> Elevation {
        self.elevation().raised_by(self.height())
    }

    pub fn is_master(&self) -> bool {
        matches!(self, Storey::Master(_))
    }

    /// The master this storey points at, `None` for masters.
    pub fn similar_to(&self) -> Option<StoreyIndex> {
        match self {
            Storey::Master(_) => None,
            Storey::Similar(s) => Some(s.similar_to),
        }
    }
}

/// Floor slab at a storey's elevation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slab {
    pub name: Name,
    pub storey: StoreyIndex,
    pub elevation: Elevation,
    pub thickness: PositiveLength,
    /// Outline lifted to the slab elevation
    pub vertices: Vec<Point3>,
}

/// Vertical line element between two consecutive storeys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: Name,
    pub lower_storey: StoreyIndex,
    pub upper_storey: StoreyIndex,
    pub start: Point3,
    pub end: Point3,
}

impl Column {
    pub fn length(&self) -> Millimetres {
        self.start.distance_to(&self.end)
    }
}

/// Root aggregate produced by expansion. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Building {
    storeys: Vec<Storey>,
    slabs: Vec<Slab>,
    columns: Vec<Column>,
}

impl Building {
    pub(crate) fn from_parts(storeys: Vec<Storey>, slabs: Vec<Slab>, columns: Vec<Column>) -> Self {
        Building {
            storeys,
            slabs,
            columns,
        }
    }

    /// Storeys, bottom to top.
    pub fn storeys(&self) -> &[Storey] {
        &self.storeys
    }

    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn storey(&self, index: StoreyIndex) -> Option<&Storey> {
        self.storeys.get(index.get())
    }

    /// Resolve the master storey whose geometry the storey at `index` uses.
    /// A master resolves to itself.
    pub fn master_of(&self, index: StoreyIndex) -> Option<&MasterStorey> {
        let master_index = match self.storey(index)? {
            Storey::Master(_) => index,
            Storey::Similar(s) => s.similar_to,
        };
        match self.storey(master_index)? {
            Storey::Master(master) => Some(master),
            Storey::Similar(_) => None,
        }
    }

    /// Storeys that reference the master at `master`, in order.
    pub fn similar_storeys_of(&self, master: StoreyIndex) -> Vec<StoreyIndex> {
        self.storeys
            .iter()
            .enumerate()
            .filter(|(_, storey)| storey.similar_to() == Some(master))
            .map(|(i, _)| StoreyIndex::new(i))
            .collect()
    }

    pub fn summary(&self) -> BuildingSummary {
        let master_count = self.storeys.iter().filter(|s| s.is_master()).count();
        let base_elevation = self
            .storeys
            .first()
            .map(|s| s.elevation().millimetres())
            .unwrap_or_default();
        let roof_elevation = self
            .storeys
            .last()
            .map(|s| s.top_elevation().millimetres())
            .unwrap_or(base_elevation);

        BuildingSummary {
            storey_count: self.storeys.len(),
            master_count,
            similar_count: self.storeys.len() - master_count,
            slab_count: self.slabs.len(),
            column_count: self.columns.len(),
            base_elevation,
            roof_elevation,
            total_height: roof_elevation - base_elevation,
        }
    }
}

/// Headline numbers for a building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingSummary {
    pub storey_count: usize,
    pub master_count: usize,
    pub similar_count: usize,
    pub slab_count: usize,
    pub column_count: usize,
    pub base_elevation: Millimetres,
    /// Top of the highest storey
    pub roof_elevation: Millimetres,
    pub total_height: Millimetres,
}
