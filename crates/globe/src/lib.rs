//! Hex globe engine: animated arcs over an H3-tessellated land layer.
//!
//! [`Globe`] is the host-facing facade. The host calls [`Globe::update`] once
//! per frame and renders the draw list returned by [`Globe::render_frame`].

pub mod config;
pub mod error;
pub mod globe;
pub mod land;

pub use config::{ConfigChanges, ConfigError, GlobeConfig, GlobeConfigPatch};
pub use error::GlobeError;
pub use globe::{Globe, LandStats};
pub use land::{FileLandSource, LandError, LandLoader, LandSource, StaticLandSource};

pub use layers::arcs::{ArcId, ArcOptions, ArcPhase, ArcSnapshot, MarkerToggle};
