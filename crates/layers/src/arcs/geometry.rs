//! Arc path sampling and tube construction.

use std::f64::consts::PI;

use foundation::math::{LatLng, Projector, Vec3, central_angle};

use super::curve::CatmullRomCurve;
use super::tube::{TubeMesh, tube_mesh};

pub const MIN_ARC_STEPS: usize = 60;
/// Samples per world unit of great-circle distance.
pub const STEPS_PER_UNIT: f64 = 1.5;
pub const RADIAL_SEGMENTS: usize = 8;

const DEGENERATE_CHORD: f64 = 1e-9;

/// How the peak height of an arc is chosen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ArcAltitude {
    /// Peak at this fraction of the globe radius.
    Fixed(f64),
    /// Base fraction of the radius, scaled up with endpoint separation.
    Scaled(f64),
}

#[derive(Debug, Clone)]
pub struct ArcGeometry {
    pub tube: TubeMesh,
    /// Surface position of the start point.
    pub start: Vec3,
    /// Surface position of the end point.
    pub end: Vec3,
    /// Length of the centerline curve in world units.
    pub length: f64,
    pub peak_height: f64,
    pub angle: f64,
}

pub fn peak_height(altitude: ArcAltitude, angle: f64, radius: f64) -> f64 {
    match altitude {
        ArcAltitude::Fixed(fraction) => fraction * radius,
        ArcAltitude::Scaled(fraction) => fraction * radius * (0.3 + angle / PI * 0.7),
    }
}

pub fn arc_steps(angle: f64, radius: f64) -> usize {
    let by_distance = (angle * radius * STEPS_PER_UNIT).ceil();
    if by_distance.is_finite() && by_distance > MIN_ARC_STEPS as f64 {
        by_distance as usize
    } else {
        MIN_ARC_STEPS
    }
}

/// Sample `steps + 1` points from `start` to `end`: the chord is lerped,
/// pushed back onto the sphere, then lifted by `sin(t * pi) * peak`.
pub fn sample_arc_path(
    projector: &Projector,
    start: LatLng,
    end: LatLng,
    peak: f64,
    steps: usize,
) -> Vec<Vec3> {
    let a = projector.project_point(start, 0.0);
    let b = projector.project_point(end, 0.0);
    let fallback = a.normalize();
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let chord = a.lerp(b, t);
            // antipodal endpoints pass through the center at t = 0.5
            let direction = if chord.length() <= DEGENERATE_CHORD * projector.radius.abs() {
                fallback
            } else {
                chord.normalize()
            };
            direction * (projector.radius + (t * PI).sin() * peak)
        })
        .collect()
}

pub fn build_arc_geometry(
    projector: &Projector,
    start: LatLng,
    end: LatLng,
    altitude: ArcAltitude,
    width: f64,
) -> ArcGeometry {
    let angle = central_angle(start, end);
    let peak = peak_height(altitude, angle, projector.radius);
    let steps = arc_steps(angle, projector.radius);
    let points = sample_arc_path(projector, start, end, peak, steps);
    let curve = CatmullRomCurve::new(points);
    let tube = tube_mesh(&curve, steps, width, RADIAL_SEGMENTS);

    ArcGeometry {
        tube,
        start: projector.project_point(start, 0.0),
        end: projector.project_point(end, 0.0),
        length: curve.length(),
        peak_height: peak,
        angle,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ArcAltitude, MIN_ARC_STEPS, RADIAL_SEGMENTS, arc_steps, build_arc_geometry, peak_height,
        sample_arc_path,
    };
    use foundation::math::{LatLng, Projector, central_angle};
    use std::f64::consts::PI;

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "{a} vs {b}");
    }

    const NYC: LatLng = LatLng::new(40.7128, -74.006);
    const LONDON: LatLng = LatLng::new(51.5074, -0.1278);

    #[test]
    fn nyc_to_london_sampling() {
        let angle = central_angle(NYC, LONDON);
        assert_close(angle, 0.8743, 1e-3);
        let steps = arc_steps(angle, 100.0);
        assert_eq!(steps, 132);

        let peak = peak_height(ArcAltitude::Scaled(0.1), angle, 100.0);
        assert_close(peak, 10.0 * (0.3 + angle / PI * 0.7), 1e-9);
        assert_close(peak, 4.948, 1e-3);
    }

    #[test]
    fn short_arcs_use_minimum_steps() {
        assert_eq!(arc_steps(0.0, 100.0), MIN_ARC_STEPS);
        assert_eq!(arc_steps(0.1, 100.0), MIN_ARC_STEPS);
    }

    #[test]
    fn fixed_altitude_ignores_distance() {
        assert_close(peak_height(ArcAltitude::Fixed(0.25), 2.0, 100.0), 25.0, 1e-12);
    }

    #[test]
    fn path_starts_and_ends_on_the_surface_and_peaks_midway() {
        let projector = Projector::new(100.0);
        let points = sample_arc_path(&projector, NYC, LONDON, 5.0, 100);
        assert_eq!(points.len(), 101);
        assert_close(points[0].length(), 100.0, 1e-9);
        assert_close(points[100].length(), 100.0, 1e-9);
        assert_close(points[50].length(), 105.0, 1e-9);
        assert!(points[25].length() < points[50].length());
    }

    #[test]
    fn antipodal_endpoints_stay_finite() {
        let projector = Projector::new(100.0);
        let points = sample_arc_path(&projector, LatLng::new(0.0, 0.0), LatLng::new(0.0, 180.0), 10.0, 60);
        assert!(points.iter().all(|p| p.is_finite()));
        assert_close(points[30].length(), 110.0, 1e-9);
    }

    #[test]
    fn identical_endpoints_build_a_degenerate_tube() {
        let projector = Projector::new(100.0);
        let arc = build_arc_geometry(&projector, NYC, NYC, ArcAltitude::Scaled(0.1), 0.3);
        assert_eq!(arc.tube.tubular_segments, MIN_ARC_STEPS);
        assert!(arc.tube.buffers.positions.iter().all(|p| p.iter().all(|c| c.is_finite())));
        assert_close(arc.peak_height, 3.0, 1e-9);
    }

    #[test]
    fn tube_segments_follow_steps() {
        let projector = Projector::new(100.0);
        let arc = build_arc_geometry(&projector, NYC, LONDON, ArcAltitude::Scaled(0.1), 0.3);
        assert_eq!(arc.tube.tubular_segments, 132);
        assert_eq!(arc.tube.radial_segments, RADIAL_SEGMENTS);
        assert_eq!(arc.tube.buffers.index_count(), 132 * RADIAL_SEGMENTS * 6);
        assert!(arc.length > arc.angle * 100.0);
    }
}
