use foundation::color::Color;
use foundation::math::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Light travelling along `direction` (world space, unit length).
    Directional { direction: Vec3 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color,
            intensity,
        }
    }

    pub fn directional(direction: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional {
                direction: direction.normalize(),
            },
            color,
            intensity,
        }
    }
}

/// Soft ambient fill plus a key light from the upper left of the default view.
pub fn default_lights() -> Vec<Light> {
    vec![
        Light::ambient(Color::WHITE, 0.6),
        Light::directional(Vec3::new(1.0, -1.0, -1.0), Color::WHITE, 0.8),
    ]
}
