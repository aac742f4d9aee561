use crate::components::{Transform, Visibility};
use crate::material::Material;
use crate::mesh::{Geometry, MeshBuffers};
use crate::resources::ResourceTracker;

/// Renderable node: one geometry, one material, exclusively owned.
#[derive(Debug)]
pub struct SceneObject {
    pub label: &'static str,
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
    pub visibility: Visibility,
}

impl SceneObject {
    pub fn new(
        tracker: &ResourceTracker,
        label: &'static str,
        buffers: MeshBuffers,
        material: Material,
    ) -> Self {
        Self {
            label,
            geometry: Geometry::new(tracker, buffers),
            material,
            transform: Transform::identity(),
            visibility: Visibility::visible(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visibility = Visibility::hidden();
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visibility.visible = visible;
    }

    /// Release geometry and material. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.geometry.dispose();
        self.material.dispose();
        self.visibility = Visibility::hidden();
    }

    pub fn is_disposed(&self) -> bool {
        self.geometry.is_disposed() && self.material.is_disposed()
    }
}

#[cfg(test)]
mod tests {
    use super::SceneObject;
    use crate::material::Material;
    use crate::mesh::MeshBuffers;
    use crate::resources::ResourceTracker;
    use foundation::color::Color;

    #[test]
    fn dispose_releases_geometry_and_material() {
        let tracker = ResourceTracker::new();
        let mut obj = SceneObject::new(
            &tracker,
            "test",
            MeshBuffers::new(),
            Material::new(&tracker, Color::WHITE),
        );
        assert_eq!(tracker.live_geometries(), 1);
        assert_eq!(tracker.live_materials(), 1);

        obj.dispose();
        obj.dispose();
        assert!(obj.is_disposed());
        assert!(!obj.is_visible());
        assert_eq!(tracker.live_geometries(), 0);
        assert_eq!(tracker.live_materials(), 0);
    }

    #[test]
    fn drop_releases_without_dispose() {
        let tracker = ResourceTracker::new();
        {
            let _obj = SceneObject::new(
                &tracker,
                "scoped",
                MeshBuffers::new(),
                Material::new(&tracker, Color::WHITE),
            );
            assert_eq!(tracker.live_geometries(), 1);
        }
        assert_eq!(tracker.live_geometries(), 0);
        assert_eq!(tracker.live_materials(), 0);
    }
}
