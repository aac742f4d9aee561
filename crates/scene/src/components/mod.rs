use foundation::math::Vec3;

/// Placement of a scene object.
///
/// `up` is the world direction the object's local +z axis is turned toward;
/// flat prefabs (rings, dots) lie in their local xy plane, so `up` is their
/// surface normal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: f64,
    pub up: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: 1.0,
            up: Vec3::Z,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Place a flat object at `position`, facing away from the globe center.
    pub fn surface_aligned(position: Vec3) -> Self {
        Self {
            position,
            scale: 1.0,
            up: position.normalize(),
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Visibility {
    pub visible: bool,
}

impl Visibility {
    pub fn visible() -> Self {
        Self { visible: true }
    }

    pub fn hidden() -> Self {
        Self { visible: false }
    }
}

#[cfg(test)]
mod tests {
    use super::{Transform, Visibility};
    use foundation::math::Vec3;

    #[test]
    fn identity_is_origin() {
        let transform = Transform::identity();
        assert_eq!(transform.position, Vec3::ZERO);
        assert_eq!(transform.scale, 1.0);
    }

    #[test]
    fn surface_aligned_faces_outward() {
        let t = Transform::surface_aligned(Vec3::new(0.0, 0.0, 5.0)).with_scale(2.0);
        assert_eq!(t.up, Vec3::Z);
        assert_eq!(t.scale, 2.0);
    }

    #[test]
    fn visibility_helpers() {
        assert!(Visibility::visible().visible);
        assert!(!Visibility::hidden().visible);
    }
}
