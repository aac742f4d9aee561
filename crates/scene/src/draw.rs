use crate::components::Transform;
use crate::light::Light;
use crate::material::Material;
use crate::mesh::{DrawRange, Geometry};
use crate::object::SceneObject;

/// Scene sub-group an object belongs to. Groups are drawn in declaration
/// order so translucent layers land after the opaque globe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    Globe,
    Polygons,
    Arcs,
    Markers,
    Atmosphere,
}

#[derive(Debug)]
pub struct DrawItem<'a> {
    pub group: Group,
    pub label: &'static str,
    pub transform: Transform,
    pub geometry: &'a Geometry,
    pub material: &'a Material,
    pub draw_range: DrawRange,
}

/// Draw list for one frame, borrowed from the engine until the host is done
/// rendering.
#[derive(Debug, Default)]
pub struct RenderFrame<'a> {
    pub items: Vec<DrawItem<'a>>,
    pub lights: Vec<Light>,
}

impl<'a> RenderFrame<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `object` unless it is hidden, released, or has nothing to draw.
    pub fn push(&mut self, group: Group, object: &'a SceneObject) {
        if !object.is_visible() || object.geometry.is_disposed() {
            return;
        }
        let draw_range = object.geometry.draw_range();
        if draw_range.is_empty() {
            return;
        }
        self.items.push(DrawItem {
            group,
            label: object.label,
            transform: object.transform,
            geometry: &object.geometry,
            material: &object.material,
            draw_range,
        });
    }

    pub fn extend(&mut self, group: Group, objects: impl IntoIterator<Item = &'a SceneObject>) {
        for object in objects {
            self.push(group, object);
        }
    }

    /// Stable sort by group, keeping insertion order inside a group.
    pub fn finish(mut self) -> Self {
        self.items.sort_by_key(|item| item.group);
        self
    }

    pub fn count(&self, group: Group) -> usize {
        self.items.iter().filter(|i| i.group == group).count()
    }
}
