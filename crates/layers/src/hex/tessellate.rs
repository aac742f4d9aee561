//! Land features to one merged mesh of hex or dot patches.

use formats::land::LandFeatures;
use scene::mesh::MeshBuffers;
use tracing::{debug, info};

use super::cells::{clamp_resolution, collect_cells};
use super::patch::{CellOutline, PatchParams, PatchStyle, build_patch, clamp_margin};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HexParams {
    /// Requested H3 resolution, clamped to 0..=4.
    pub resolution: u8,
    pub margin: f64,
    pub use_dots: bool,
    /// Patch height above the surface as a fraction of the radius.
    pub altitude: f64,
    pub radius: f64,
}

impl Default for HexParams {
    fn default() -> Self {
        Self {
            resolution: 3,
            margin: 0.2,
            use_dots: false,
            altitude: 0.005,
            radius: 100.0,
        }
    }
}

impl HexParams {
    fn patch_params(&self) -> PatchParams {
        PatchParams {
            radius: self.radius,
            altitude: self.altitude,
            margin: clamp_margin(self.margin),
            style: if self.use_dots {
                PatchStyle::Dot
            } else {
                PatchStyle::Hex
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HexTessellation {
    /// `None` when no cell produced a patch.
    pub mesh: Option<MeshBuffers>,
    pub cell_count: usize,
    pub patch_count: usize,
    pub skipped_cells: usize,
    pub skipped_polygons: usize,
}

pub fn tessellate(features: &LandFeatures, params: &HexParams) -> HexTessellation {
    let resolution = clamp_resolution(params.resolution);
    let (cells, skipped_polygons) = collect_cells(features, resolution);
    let patch_params = params.patch_params();

    let mut patches = Vec::with_capacity(cells.len());
    let mut skipped_cells = 0;
    for cell in cells.iter() {
        match build_patch(&CellOutline::from_cell(cell), &patch_params) {
            Ok(patch) => patches.push(patch),
            Err(err) => {
                debug!(%cell, %err, "skipping hex cell");
                skipped_cells += 1;
            }
        }
    }

    let mesh = (!patches.is_empty()).then(|| MeshBuffers::merge(&patches));
    info!(
        resolution = ?resolution,
        cells = cells.len(),
        patches = patches.len(),
        skipped_cells,
        skipped_polygons,
        dots = params.use_dots,
        "land tessellated"
    );
    HexTessellation {
        mesh,
        cell_count: cells.len(),
        patch_count: patches.len(),
        skipped_cells,
        skipped_polygons,
    }
}
