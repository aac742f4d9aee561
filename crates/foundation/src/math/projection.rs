//! Geographic to world-space projection.
//!
//! World space is y-up. Longitude is offset by +90 degrees so that
//! (lat 0, lng 0) lands on +z, the renderer's default forward axis, and
//! positive longitudes move toward +x.

use super::{LatLng, Vec3};

/// Project `(lat, lng)` in degrees onto a sphere of `radius`, raised by
/// `altitude` as a fraction of the radius.
///
/// Out-of-range inputs are not rejected; they follow the same trigonometry.
pub fn polar_to_cartesian(lat: f64, lng: f64, altitude: f64, radius: f64) -> Vec3 {
    let r = radius * (1.0 + altitude);
    let phi = (90.0 - lat).to_radians();
    let theta = (lng + 90.0).to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    Vec3::new(-r * sin_phi * cos_theta, r * cos_phi, r * sin_phi * sin_theta)
}

/// Inverse of [`polar_to_cartesian`]. Returns the geographic position and the
/// altitude fraction relative to `radius`.
pub fn cartesian_to_polar(p: Vec3, radius: f64) -> (LatLng, f64) {
    let r = p.length();
    if r <= 0.0 {
        return (LatLng::default(), -1.0);
    }
    let lat = 90.0 - (p.y / r).clamp(-1.0, 1.0).acos().to_degrees();
    let mut lng = p.z.atan2(-p.x).to_degrees() - 90.0;
    if lng < -180.0 {
        lng += 360.0;
    }
    (LatLng::new(lat, lng), r / radius - 1.0)
}

/// Sphere-bound projector.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projector {
    pub radius: f64,
}

impl Projector {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn project(&self, lat: f64, lng: f64, altitude: f64) -> Vec3 {
        polar_to_cartesian(lat, lng, altitude, self.radius)
    }

    pub fn project_point(&self, point: LatLng, altitude: f64) -> Vec3 {
        self.project(point.lat, point.lng, altitude)
    }
}
