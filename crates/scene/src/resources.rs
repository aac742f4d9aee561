//! Live-resource accounting.
//!
//! Every geometry and material acquires a [`ResourceGuard`] from a shared
//! [`ResourceTracker`]. Releasing happens exactly once, either through an
//! explicit `dispose()` on the owner or when the owner is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Geometry,
    Material,
}

#[derive(Debug, Default)]
struct Counters {
    geometries: AtomicUsize,
    materials: AtomicUsize,
}

impl Counters {
    fn slot(&self, kind: ResourceKind) -> &AtomicUsize {
        match kind {
            ResourceKind::Geometry => &self.geometries,
            ResourceKind::Material => &self.materials,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceTracker {
    counters: Arc<Counters>,
}

impl ResourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, kind: ResourceKind) -> ResourceGuard {
        self.counters.slot(kind).fetch_add(1, Ordering::Relaxed);
        ResourceGuard {
            kind,
            tracker: self.clone(),
        }
    }

    pub fn live(&self, kind: ResourceKind) -> usize {
        self.counters.slot(kind).load(Ordering::Relaxed)
    }

    pub fn live_geometries(&self) -> usize {
        self.live(ResourceKind::Geometry)
    }

    pub fn live_materials(&self) -> usize {
        self.live(ResourceKind::Material)
    }
}

/// Proof of one live resource. Dropping it releases the resource.
#[derive(Debug)]
pub struct ResourceGuard {
    kind: ResourceKind,
    tracker: ResourceTracker,
}

impl ResourceGuard {
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl Drop for ResourceGuard {
    fn drop(&mut self) {
        self.tracker
            .counters
            .slot(self.kind)
            .fetch_sub(1, Ordering::Relaxed);
    }
}
