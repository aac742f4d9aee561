//! H3 hexagon tessellation of land polygons.

pub mod cells;
pub mod patch;
pub mod tessellate;

pub use cells::{HexCellSet, MAX_HEX_RESOLUTION, PolyfillError};
pub use patch::{CellOutline, PatchError, PatchParams, PatchStyle};
pub use tessellate::{HexParams, HexTessellation, tessellate};
