//! Spherical (not ellipsoidal) geodesy helpers.
//!
//! The globe is a perfect sphere, so every helper here works on central
//! angles and leaves scaling by the radius to the caller.

/// Geographic coordinates in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Great-circle central angle between two points, in radians.
///
/// Vincenty's atan2 form: stays accurate for coincident and antipodal points.
pub fn central_angle(a: LatLng, b: LatLng) -> f64 {
    let (sin_lat1, cos_lat1) = a.lat.to_radians().sin_cos();
    let (sin_lat2, cos_lat2) = b.lat.to_radians().sin_cos();
    let (sin_dlng, cos_dlng) = (b.lng - a.lng).to_radians().sin_cos();

    let x = cos_lat2 * sin_dlng;
    let y = cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlng;
    let z = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlng;
    x.hypot(y).atan2(z)
}

/// Point reached by travelling `angle_rad` along a great circle from `origin`
/// with initial `bearing_rad` (clockwise from north).
pub fn destination(origin: LatLng, bearing_rad: f64, angle_rad: f64) -> LatLng {
    let lat1 = origin.lat.to_radians();
    let lng1 = origin.lng.to_radians();
    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_d, cos_d) = angle_rad.sin_cos();

    let sin_lat2 = (sin_lat1 * cos_d + cos_lat1 * sin_d * bearing_rad.cos()).clamp(-1.0, 1.0);
    let lat2 = sin_lat2.asin();
    let lng2 = lng1
        + (bearing_rad.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * sin_lat2);

    LatLng::new(lat2.to_degrees(), lng2.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::{LatLng, central_angle, destination};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn quarter_turn_along_equator() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.0, 90.0);
        assert_close(central_angle(a, b), FRAC_PI_2, 1e-12);
    }

    #[test]
    fn antipodes_are_half_a_turn_apart() {
        let a = LatLng::new(10.0, 20.0);
        let b = LatLng::new(-10.0, -160.0);
        assert_close(central_angle(a, b), PI, 1e-9);
    }

    #[test]
    fn exact_antipodes_across_the_seam() {
        let a = LatLng::new(0.0, 179.0);
        let b = LatLng::new(0.0, -1.0);
        assert_close(central_angle(a, b), PI, 1e-12);
        assert_close(central_angle(LatLng::new(90.0, 0.0), LatLng::new(-90.0, 0.0)), PI, 1e-12);
    }

    #[test]
    fn identical_points_have_zero_angle() {
        let a = LatLng::new(51.5, -0.12);
        assert_eq!(central_angle(a, a), 0.0);
    }

    #[test]
    fn destination_north_along_meridian() {
        let p = destination(LatLng::new(0.0, 30.0), 0.0, 10f64.to_radians());
        assert_close(p.lat, 10.0, 1e-9);
        assert_close(p.lng, 30.0, 1e-9);
    }

    #[test]
    fn destination_keeps_requested_distance() {
        let origin = LatLng::new(40.0, -74.0);
        let d = 0.05;
        for k in 0..8 {
            let bearing = k as f64 * PI / 4.0;
            let p = destination(origin, bearing, d);
            assert_close(central_angle(origin, p), d, 1e-9);
        }
    }
}
