use foundation::color::Color;
use foundation::math::Vec3;

use crate::components::Transform;
use crate::material::Material;
use crate::object::SceneObject;
use crate::prefabs::shapes::{annulus, uv_sphere};
use crate::resources::ResourceTracker;

/// Ring inner radius as a fraction of its outer radius.
const RING_INNER_RATIO: f64 = 0.8;
const RING_SEGMENTS: u32 = 32;

/// Small sphere marking an arc endpoint.
pub fn point_marker(
    tracker: &ResourceTracker,
    position: Vec3,
    radius: f64,
    color: Color,
) -> SceneObject {
    SceneObject::new(
        tracker,
        "marker",
        uv_sphere(radius, 12, 8),
        Material::new(tracker, color),
    )
    .with_transform(Transform::translate(position))
}

/// Flat ring lying on the surface at `position`. Starts hidden at `scale`.
pub fn surface_ring(
    tracker: &ResourceTracker,
    position: Vec3,
    radius: f64,
    scale: f64,
    color: Color,
) -> SceneObject {
    let material = Material::translucent(tracker, color, 1.0).double_sided();
    SceneObject::new(
        tracker,
        "ring",
        annulus(radius * RING_INNER_RATIO, radius, RING_SEGMENTS),
        material,
    )
    .with_transform(Transform::surface_aligned(position).with_scale(scale))
    .hidden()
}

#[cfg(test)]
mod tests {
    use super::{point_marker, surface_ring};
    use crate::resources::ResourceTracker;
    use foundation::color::Color;
    use foundation::math::Vec3;

    #[test]
    fn ring_starts_hidden_and_faces_outward() {
        let tracker = ResourceTracker::new();
        let ring = surface_ring(&tracker, Vec3::new(0.0, 10.0, 0.0), 1.5, 0.1, Color::WHITE);
        assert!(!ring.is_visible());
        assert_eq!(ring.transform.up, Vec3::Y);
        assert_eq!(ring.transform.scale, 0.1);
        assert!(ring.material.transparent);
    }

    #[test]
    fn marker_is_placed_at_endpoint() {
        let tracker = ResourceTracker::new();
        let p = Vec3::new(1.0, 2.0, 3.0);
        let marker = point_marker(&tracker, p, 0.5, Color::WHITE);
        assert_eq!(marker.transform.position, p);
        assert_eq!(tracker.live_geometries(), 1);
    }
}
