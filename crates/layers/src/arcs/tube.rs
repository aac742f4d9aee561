//! Tube mesh swept along a curve with parallel-transported frames.

use foundation::math::Vec3;
use scene::mesh::MeshBuffers;

use super::curve::CatmullRomCurve;

#[derive(Debug, Clone)]
pub struct TubeMesh {
    pub buffers: MeshBuffers,
    pub tubular_segments: usize,
    pub radial_segments: usize,
}

impl TubeMesh {
    /// Indices emitted per tubular segment.
    pub fn index_stride(&self) -> usize {
        self.radial_segments * 6
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub tangent: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
}

/// Frames at `segments + 1` evenly spaced arc-length positions. The first
/// normal is taken perpendicular to the tangent's smallest axis, then each
/// frame is rotated by the turn between consecutive tangents.
pub fn frenet_frames(curve: &CatmullRomCurve, segments: usize) -> Vec<Frame> {
    let segments = segments.max(1);
    let tangents: Vec<Vec3> = (0..=segments)
        .map(|i| curve.tangent_at(i as f64 / segments as f64))
        .collect();

    let t0 = tangents[0];
    let mut seed = Vec3::X;
    let mut min = f64::MAX;
    for (axis, component) in [(Vec3::X, t0.x), (Vec3::Y, t0.y), (Vec3::Z, t0.z)] {
        if component.abs() <= min {
            min = component.abs();
            seed = axis;
        }
    }
    let side = t0.cross(seed).normalize();
    let n0 = t0.cross(side);
    let mut frames = Vec::with_capacity(tangents.len());
    frames.push(Frame {
        tangent: t0,
        normal: n0,
        binormal: t0.cross(n0),
    });

    for i in 1..tangents.len() {
        let prev = frames[i - 1];
        let tangent = tangents[i];
        let mut normal = prev.normal;
        let axis = prev.tangent.cross(tangent);
        if axis.length() > f64::EPSILON {
            let theta = prev.tangent.dot(tangent).clamp(-1.0, 1.0).acos();
            normal = normal.rotate_around(axis.normalize(), theta);
        }
        frames.push(Frame {
            tangent,
            normal,
            binormal: tangent.cross(normal),
        });
    }
    frames
}

/// Sweep a circle of `radius` along `curve`. Index layout per tubular
/// segment is `radial_segments` quads of two triangles each, so a prefix of
/// the index buffer always draws a prefix of the tube.
pub fn tube_mesh(
    curve: &CatmullRomCurve,
    tubular_segments: usize,
    radius: f64,
    radial_segments: usize,
) -> TubeMesh {
    let tubular_segments = tubular_segments.max(1);
    let radial_segments = radial_segments.max(3);
    let frames = frenet_frames(curve, tubular_segments);
    let mut buffers = MeshBuffers::with_capacity(
        (tubular_segments + 1) * (radial_segments + 1),
        tubular_segments * radial_segments * 6,
    );

    for (i, frame) in frames.iter().enumerate() {
        let center = curve.point_at(i as f64 / tubular_segments as f64);
        for j in 0..=radial_segments {
            let v = j as f64 / radial_segments as f64 * std::f64::consts::TAU;
            let normal = (frame.normal * -v.cos() + frame.binormal * v.sin()).normalize();
            buffers.push_vertex(center + normal * radius, normal);
        }
    }

    let ring = (radial_segments + 1) as u32;
    for i in 1..=tubular_segments as u32 {
        for j in 1..=radial_segments as u32 {
            let a = ring * (i - 1) + (j - 1);
            let b = ring * i + (j - 1);
            let c = ring * i + j;
            let d = ring * (i - 1) + j;
            buffers.push_triangle(a, b, d);
            buffers.push_triangle(b, c, d);
        }
    }

    TubeMesh {
        buffers,
        tubular_segments,
        radial_segments,
    }
}
