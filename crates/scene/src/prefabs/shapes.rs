//! Procedural primitive meshes.

use std::f64::consts::{PI, TAU};

use foundation::math::Vec3;

use crate::mesh::MeshBuffers;

/// UV sphere centered at the origin. Seam and poles follow the same
/// orientation as the geographic projector (y up).
pub fn uv_sphere(radius: f64, width_segments: u32, height_segments: u32) -> MeshBuffers {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut mesh = MeshBuffers::with_capacity(
        ((w + 1) * (h + 1)) as usize,
        (w * h * 6) as usize,
    );

    for iy in 0..=h {
        let v = iy as f64 / h as f64;
        for ix in 0..=w {
            let u = ix as f64 / w as f64;
            let normal = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.push_vertex(normal * radius, normal);
        }
    }

    let row = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.push_triangle(a, b, d);
            }
            if iy != h - 1 {
                mesh.push_triangle(b, c, d);
            }
        }
    }
    mesh
}

/// Flat annulus in the local xy plane, normal +z.
pub fn annulus(inner_radius: f64, outer_radius: f64, theta_segments: u32) -> MeshBuffers {
    let segments = theta_segments.max(3);
    let mut mesh =
        MeshBuffers::with_capacity(((segments + 1) * 2) as usize, (segments * 6) as usize);

    for radius in [inner_radius, outer_radius] {
        for i in 0..=segments {
            let angle = i as f64 / segments as f64 * TAU;
            mesh.push_vertex(
                Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0),
                Vec3::Z,
            );
        }
    }

    for i in 0..segments {
        let a = i;
        let b = i + segments + 1;
        let c = i + segments + 2;
        let d = i + 1;
        mesh.push_triangle(a, b, d);
        mesh.push_triangle(b, c, d);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::{annulus, uv_sphere};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = uv_sphere(2.0, 16, 8);
        assert_eq!(mesh.vertex_count(), 17 * 9);
        // Pole rows contribute one triangle per quad instead of two.
        assert_eq!(mesh.index_count(), (16 * 8 * 2 - 2 * 16) * 3);
        for p in &mesh.positions {
            let len = ((p[0] * p[0] + p[1] * p[1] + p[2] * p[2]) as f64).sqrt();
            assert_close(len, 2.0, 1e-5);
        }
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn annulus_spans_inner_to_outer() {
        let mesh = annulus(1.0, 1.5, 24);
        assert_eq!(mesh.index_count(), 24 * 6);
        for p in &mesh.positions {
            let r = ((p[0] * p[0] + p[1] * p[1]) as f64).sqrt();
            assert!((0.999..=1.501).contains(&r));
            assert_eq!(p[2], 0.0);
        }
    }
}
