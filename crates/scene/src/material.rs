use foundation::color::Color;

use crate::resources::{ResourceGuard, ResourceKind, ResourceTracker};

/// Surface appearance. All fields may be changed in place; none of them
/// require rebuilding geometry.
#[derive(Debug)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
    pub shininess: f32,
    pub emissive: Color,
    pub emissive_intensity: f32,
    /// Render both faces (flat patches, rings).
    pub double_sided: bool,
    guard: Option<ResourceGuard>,
}

impl Material {
    pub fn new(tracker: &ResourceTracker, color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            transparent: false,
            shininess: 0.0,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            double_sided: false,
            guard: Some(tracker.acquire(ResourceKind::Material)),
        }
    }

    /// Transparent material whose opacity is animated or below 1.
    pub fn translucent(tracker: &ResourceTracker, color: Color, opacity: f32) -> Self {
        let mut material = Self::new(tracker, color);
        material.set_opacity(opacity);
        material.transparent = true;
        material
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Apply a color including its alpha channel; alpha below 1 makes the
    /// material transparent.
    pub fn set_color_with_alpha(&mut self, color: Color) {
        self.color = color.with_alpha(1.0);
        self.set_opacity(color.a);
        self.transparent = color.a < 1.0;
    }

    pub fn is_disposed(&self) -> bool {
        self.guard.is_none()
    }

    /// Release the tracked resource. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.guard.take();
    }
}
