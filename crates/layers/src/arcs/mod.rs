//! Animated great-circle arcs between two surface points.

pub mod curve;
pub mod engine;
pub mod geometry;
pub mod options;
pub mod ring;
pub mod tube;
pub mod window;

pub use engine::{ArcEngine, ArcEngineSettings, ArcId, ArcPhase, ArcSnapshot, RemovalCallback};
pub use options::{ArcDefaults, ArcError, ArcOptions, MarkerToggle, Toggle};
pub use ring::{RingAnimation, RingPhase, RingSettings};
