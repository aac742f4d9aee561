use foundation::color::Color;

use crate::material::Material;
use crate::object::SceneObject;
use crate::prefabs::shapes::uv_sphere;
use crate::resources::ResourceTracker;

const GLOBE_SEGMENTS: (u32, u32) = (64, 48);
const ATMOSPHERE_SEGMENTS: (u32, u32) = (48, 32);

/// Solid sphere representing the planet surface.
pub fn globe_body(tracker: &ResourceTracker, radius: f64, material: Material) -> SceneObject {
    let (w, h) = GLOBE_SEGMENTS;
    SceneObject::new(tracker, "globe", uv_sphere(radius, w, h), material)
}

/// Translucent shell drawn slightly above the surface.
pub fn atmosphere_shell(
    tracker: &ResourceTracker,
    radius: f64,
    altitude: f64,
    color: Color,
) -> SceneObject {
    let (w, h) = ATMOSPHERE_SEGMENTS;
    let shell_radius = radius * (1.0 + altitude.max(0.0));
    let material = Material::translucent(tracker, color.with_alpha(1.0), color.a.min(0.35))
        .double_sided();
    SceneObject::new(tracker, "atmosphere", uv_sphere(shell_radius, w, h), material)
}
