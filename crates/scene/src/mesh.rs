use foundation::math::Vec3;

use crate::resources::{ResourceGuard, ResourceKind, ResourceTracker};

/// Indexed triangle buffers, ready for upload.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.to_f32());
        self.normals.push(normal.to_f32());
        index
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append another mesh, rebasing its indices.
    pub fn append(&mut self, other: &MeshBuffers) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Merge many meshes into one static mesh.
    pub fn merge<'a>(parts: impl IntoIterator<Item = &'a MeshBuffers>) -> MeshBuffers {
        let mut out = MeshBuffers::default();
        for part in parts {
            out.append(part);
        }
        out
    }
}

/// Contiguous index range that is currently drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct DrawRange {
    pub start: usize,
    pub count: usize,
}

impl DrawRange {
    pub const EMPTY: DrawRange = DrawRange { start: 0, count: 0 };

    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    pub fn full(index_count: usize) -> Self {
        Self {
            start: 0,
            count: index_count,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Geometry resource: buffers plus the visible draw range.
#[derive(Debug)]
pub struct Geometry {
    buffers: MeshBuffers,
    draw_range: DrawRange,
    guard: Option<ResourceGuard>,
}

impl Geometry {
    pub fn new(tracker: &ResourceTracker, buffers: MeshBuffers) -> Self {
        let draw_range = DrawRange::full(buffers.index_count());
        Self {
            buffers,
            draw_range,
            guard: Some(tracker.acquire(ResourceKind::Geometry)),
        }
    }

    pub fn buffers(&self) -> &MeshBuffers {
        &self.buffers
    }

    pub fn index_count(&self) -> usize {
        self.buffers.index_count()
    }

    pub fn draw_range(&self) -> DrawRange {
        self.draw_range
    }

    /// Set the drawn index range; it is clipped to the buffer.
    pub fn set_draw_range(&mut self, range: DrawRange) {
        let total = self.buffers.index_count();
        let start = range.start.min(total);
        let count = range.count.min(total - start);
        self.draw_range = DrawRange::new(start, count);
    }

    pub fn is_disposed(&self) -> bool {
        self.guard.is_none()
    }

    /// Release buffers and the tracked resource. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.guard.take().is_some() {
            self.buffers = MeshBuffers::default();
            self.draw_range = DrawRange::EMPTY;
        }
    }
}
