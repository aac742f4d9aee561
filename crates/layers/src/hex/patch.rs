//! Per-cell surface patches: shrunken hexagons or round dots.

use std::f64::consts::TAU;

use earcutr::earcut;
use foundation::math::{LatLng, Projector, Vec3, central_angle, destination};
use h3o::CellIndex;
use scene::mesh::MeshBuffers;

/// Longitude distance from the cell center beyond which a boundary vertex
/// is taken to sit across the anti-meridian.
pub const ANTIMERIDIAN_THRESHOLD_DEG: f64 = 170.0;
pub const DOT_SEGMENTS: usize = 12;
pub const MAX_MARGIN: f64 = 0.95;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PatchStyle {
    Hex,
    Dot,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PatchParams {
    pub radius: f64,
    /// Height above the surface as a fraction of the radius.
    pub altitude: f64,
    /// Fraction of the cell left empty around the patch, in [0, 0.95].
    pub margin: f64,
    pub style: PatchStyle,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatchError {
    #[error("cell boundary has {0} vertices, need at least 3")]
    TooFewVertices(usize),
    #[error("cell outline contains non-finite coordinates")]
    NonFinite,
    #[error("dot radius collapsed to zero")]
    DegenerateDot,
    #[error("triangulation produced no triangles")]
    Triangulation,
}

pub fn clamp_margin(margin: f64) -> f64 {
    if margin.is_finite() {
        margin.clamp(0.0, MAX_MARGIN)
    } else {
        0.0
    }
}

/// Center and boundary of one cell, in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct CellOutline {
    pub center: LatLng,
    pub boundary: Vec<LatLng>,
}

impl CellOutline {
    pub fn from_cell(cell: CellIndex) -> Self {
        let center = h3o::LatLng::from(cell);
        let boundary = cell.boundary();
        Self {
            center: degrees(&center),
            boundary: boundary.iter().map(degrees).collect(),
        }
    }
}

fn degrees(point: &h3o::LatLng) -> LatLng {
    LatLng::new(
        point.lat_radians().to_degrees(),
        point.lng_radians().to_degrees(),
    )
}

/// Move boundary vertices that wrapped around the anti-meridian back to the
/// center's side, so that interpolating toward the center stays local.
pub fn correct_antimeridian(center_lng: f64, boundary: &mut [LatLng]) {
    for vertex in boundary {
        let delta = vertex.lng - center_lng;
        if delta > ANTIMERIDIAN_THRESHOLD_DEG {
            vertex.lng -= 360.0;
        } else if delta < -ANTIMERIDIAN_THRESHOLD_DEG {
            vertex.lng += 360.0;
        }
    }
}

pub fn build_patch(outline: &CellOutline, params: &PatchParams) -> Result<MeshBuffers, PatchError> {
    if outline.boundary.len() < 3 {
        return Err(PatchError::TooFewVertices(outline.boundary.len()));
    }
    if !outline.center.is_finite() || !outline.boundary.iter().all(LatLng::is_finite) {
        return Err(PatchError::NonFinite);
    }

    let mut boundary = outline.boundary.clone();
    correct_antimeridian(outline.center.lng, &mut boundary);
    let projector = Projector::new(params.radius);
    let margin = clamp_margin(params.margin);

    match params.style {
        PatchStyle::Dot => dot_patch(&projector, outline.center, &boundary, margin, params.altitude),
        PatchStyle::Hex => hex_patch(&projector, outline.center, &boundary, margin, params.altitude),
    }
}

/// Disc inscribed in the cell, shrunk by the margin.
fn dot_patch(
    projector: &Projector,
    center: LatLng,
    boundary: &[LatLng],
    margin: f64,
    altitude: f64,
) -> Result<MeshBuffers, PatchError> {
    let nearest = boundary
        .iter()
        .map(|vertex| central_angle(center, *vertex))
        .fold(f64::INFINITY, f64::min);
    let angular_radius = nearest * (1.0 - margin);
    if !(angular_radius.is_finite() && angular_radius > 0.0) {
        return Err(PatchError::DegenerateDot);
    }

    let mut mesh = MeshBuffers::with_capacity(DOT_SEGMENTS + 1, DOT_SEGMENTS * 3);
    let hub_position = projector.project_point(center, altitude);
    let hub = mesh.push_vertex(hub_position, hub_position.normalize());
    for k in 0..DOT_SEGMENTS {
        let bearing = k as f64 / DOT_SEGMENTS as f64 * TAU;
        let rim = projector.project_point(destination(center, bearing, angular_radius), altitude);
        mesh.push_vertex(rim, rim.normalize());
    }
    // rim runs clockwise seen from outside
    for k in 0..DOT_SEGMENTS as u32 {
        let a = hub + 1 + k;
        let b = hub + 1 + (k + 1) % DOT_SEGMENTS as u32;
        mesh.push_triangle(hub, b, a);
    }
    Ok(mesh)
}

/// Cell polygon pulled toward its center by the margin, triangulated in the
/// tangent plane at the center.
fn hex_patch(
    projector: &Projector,
    center: LatLng,
    boundary: &[LatLng],
    margin: f64,
    altitude: f64,
) -> Result<MeshBuffers, PatchError> {
    let keep = 1.0 - margin;
    let ring: Vec<Vec3> = boundary
        .iter()
        .map(|vertex| {
            let lat = center.lat + (vertex.lat - center.lat) * keep;
            let lng = center.lng + (vertex.lng - center.lng) * keep;
            projector.project(lat, lng, altitude)
        })
        .collect();

    let origin = projector.project_point(center, altitude);
    let n = origin.normalize();
    let up = if n.y.abs() < 0.99 { Vec3::Y } else { Vec3::X };
    let east = up.cross(n).normalize();
    let north = n.cross(east);

    let mut coords = Vec::with_capacity(ring.len() * 2);
    for p in &ring {
        let v = *p - origin;
        coords.push(v.dot(east));
        coords.push(v.dot(north));
    }
    let indices = earcut(&coords, &[], 2).map_err(|_| PatchError::Triangulation)?;
    if indices.len() < 3 {
        return Err(PatchError::Triangulation);
    }

    let mut mesh = MeshBuffers::with_capacity(ring.len(), indices.len());
    for p in &ring {
        mesh.push_vertex(*p, p.normalize());
    }
    for tri in indices.chunks_exact(3) {
        mesh.push_triangle(tri[0] as u32, tri[1] as u32, tri[2] as u32);
    }
    Ok(mesh)
}
