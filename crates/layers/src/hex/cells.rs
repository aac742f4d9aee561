//! Land polygons to a deduplicated set of H3 cells.

use std::collections::BTreeSet;

use formats::land::{LandFeatures, LandPolygon, Ring};
use geo::{LineString, Polygon as GeoPolygon};
use h3o::geom::{PolyfillConfig, Polygon as H3Polygon, ToCells};
use h3o::{CellIndex, Resolution};
use tracing::warn;

pub const MAX_HEX_RESOLUTION: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolyfillError {
    #[error("exterior ring has {0} distinct positions, need at least 3")]
    TooFewPositions(usize),
    #[error("polygon rejected by the cell index: {0}")]
    InvalidGeometry(String),
}

pub fn clamp_resolution(resolution: u8) -> Resolution {
    // 0..=4 is always a valid H3 resolution
    Resolution::try_from(resolution.min(MAX_HEX_RESOLUTION)).unwrap_or(Resolution::Zero)
}

/// Cells covering land, each counted once however many polygons contain it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexCellSet {
    cells: BTreeSet<CellIndex>,
}

impl HexCellSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the cells of one polygon; returns how many were new.
    pub fn insert_polygon(
        &mut self,
        polygon: &LandPolygon,
        resolution: Resolution,
    ) -> Result<usize, PolyfillError> {
        let shape = to_h3_polygon(polygon)?;
        let before = self.cells.len();
        self.cells.extend(shape.to_cells(PolyfillConfig::new(resolution)));
        Ok(self.cells.len() - before)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: CellIndex) -> bool {
        self.cells.contains(&cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells.iter().copied()
    }
}

/// Cells for every polygon of `features`. Polygons the index rejects are
/// skipped and counted.
pub fn collect_cells(features: &LandFeatures, resolution: Resolution) -> (HexCellSet, usize) {
    let mut set = HexCellSet::new();
    let mut skipped = 0;
    for polygon in features.polygons() {
        if let Err(err) = set.insert_polygon(polygon, resolution) {
            warn!(%err, "skipping land polygon");
            skipped += 1;
        }
    }
    (set, skipped)
}

fn to_h3_polygon(polygon: &LandPolygon) -> Result<H3Polygon, PolyfillError> {
    let Some(exterior) = polygon.exterior() else {
        return Err(PolyfillError::TooFewPositions(0));
    };
    let distinct = open_len(exterior);
    if distinct < 3 {
        return Err(PolyfillError::TooFewPositions(distinct));
    }
    let holes = polygon
        .holes()
        .iter()
        .filter(|ring| open_len(ring) >= 3)
        .map(line_string)
        .collect();
    let shape = GeoPolygon::new(line_string(exterior), holes);
    H3Polygon::from_degrees(shape).map_err(|err| PolyfillError::InvalidGeometry(err.to_string()))
}

fn line_string(ring: &Ring) -> LineString<f64> {
    LineString::from(ring.iter().map(|p| (p.lng, p.lat)).collect::<Vec<_>>())
}

/// Position count without a closing duplicate.
fn open_len(ring: &[foundation::math::LatLng]) -> usize {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => ring.len() - 1,
        _ => ring.len(),
    }
}
