//! Globe configuration: complete defaults, partial patches, and change
//! classification.

use std::path::{Path, PathBuf};

use foundation::color::Color;
use layers::arcs::{ArcEngineSettings, RingSettings};
use layers::hex::HexParams;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Json(#[from] serde_json::Error),
}

/// Complete globe configuration. Colors are CSS-style strings (hex,
/// `rgb()`, `rgba()`); unparseable ones fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub radius: f64,
    pub globe_color: String,
    pub globe_opacity: f32,
    pub shininess: f32,
    pub emissive: String,
    pub emissive_intensity: f32,
    pub polygon_color: String,
    pub hex_resolution: u8,
    pub hex_margin: f64,
    pub use_dots: bool,
    /// Land patch height as a fraction of the radius.
    pub polygon_altitude: f64,
    pub show_atmosphere: bool,
    pub atmosphere_color: String,
    pub atmosphere_altitude: f64,
    pub arc_altitude: f64,
    pub ring_max_scale: f64,
    pub ring_speed: f64,
    pub ring_radius: f64,
    pub marker_radius: f64,
}

pub const DEFAULT_GLOBE_COLOR: Color = Color::rgba(0.102, 0.153, 0.267, 1.0);
pub const DEFAULT_POLYGON_COLOR: Color = Color::rgba(1.0, 1.0, 1.0, 0.7);
pub const DEFAULT_ATMOSPHERE_COLOR: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            globe_color: "#1a2744".to_string(),
            globe_opacity: 1.0,
            shininess: 0.7,
            emissive: "#000000".to_string(),
            emissive_intensity: 0.1,
            polygon_color: "rgba(255, 255, 255, 0.7)".to_string(),
            hex_resolution: 3,
            hex_margin: 0.2,
            use_dots: false,
            polygon_altitude: 0.005,
            show_atmosphere: true,
            atmosphere_color: "#ffffff".to_string(),
            atmosphere_altitude: 0.1,
            arc_altitude: 0.1,
            ring_max_scale: 3.0,
            ring_speed: 0.02,
            ring_radius: 1.5,
            marker_radius: 0.5,
        }
    }
}

/// Partial configuration; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfigPatch {
    pub radius: Option<f64>,
    pub globe_color: Option<String>,
    pub globe_opacity: Option<f32>,
    pub shininess: Option<f32>,
    pub emissive: Option<String>,
    pub emissive_intensity: Option<f32>,
    pub polygon_color: Option<String>,
    pub hex_resolution: Option<u8>,
    pub hex_margin: Option<f64>,
    pub use_dots: Option<bool>,
    pub polygon_altitude: Option<f64>,
    pub show_atmosphere: Option<bool>,
    pub atmosphere_color: Option<String>,
    pub atmosphere_altitude: Option<f64>,
    pub arc_altitude: Option<f64>,
    pub ring_max_scale: Option<f64>,
    pub ring_speed: Option<f64>,
    pub ring_radius: Option<f64>,
    pub marker_radius: Option<f64>,
}

impl GlobeConfigPatch {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// What a patch touched, grouped by how expensive it is to apply.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ConfigChanges {
    /// Globe body material, updated in place.
    pub material: bool,
    /// Land material color, updated in place.
    pub polygon_color: bool,
    /// Atmosphere shell, rebuilt.
    pub atmosphere: bool,
    /// Ring, marker and arc altitude parameters for the arc engine.
    pub rings: bool,
    /// Tessellation parameters; stored until the land is rebuilt.
    pub land_structure: bool,
    /// Radius; only honored at construction.
    pub radius: bool,
}

impl ConfigChanges {
    pub fn is_empty(&self) -> bool {
        *self == ConfigChanges::default()
    }
}

macro_rules! merge_fields {
    ($config:ident, $patch:ident, $flag:expr, [$($field:ident),+ $(,)?]) => {
        $(
            if let Some(value) = $patch.$field
                && $config.$field != value
            {
                $config.$field = value;
                $flag = true;
            }
        )+
    };
}

impl GlobeConfig {
    /// Defaults with `patch` merged over them.
    pub fn merged(patch: GlobeConfigPatch) -> Self {
        let mut config = Self::default();
        config.apply(patch);
        config
    }

    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let payload = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&payload)
    }

    /// Merge `patch` key by key and report which groups changed. Fields set
    /// to their current value count as unchanged.
    pub fn apply(&mut self, patch: GlobeConfigPatch) -> ConfigChanges {
        let mut changes = ConfigChanges::default();
        let config = self;
        merge_fields!(config, patch, changes.radius, [radius]);
        merge_fields!(
            config,
            patch,
            changes.material,
            [globe_color, globe_opacity, shininess, emissive, emissive_intensity]
        );
        merge_fields!(config, patch, changes.polygon_color, [polygon_color]);
        merge_fields!(
            config,
            patch,
            changes.land_structure,
            [hex_resolution, hex_margin, use_dots, polygon_altitude]
        );
        merge_fields!(
            config,
            patch,
            changes.atmosphere,
            [show_atmosphere, atmosphere_color, atmosphere_altitude]
        );
        merge_fields!(
            config,
            patch,
            changes.rings,
            [arc_altitude, ring_max_scale, ring_speed, ring_radius, marker_radius]
        );
        changes
    }

    pub fn globe_color(&self) -> Color {
        color_or("globe_color", &self.globe_color, DEFAULT_GLOBE_COLOR)
    }

    pub fn emissive_color(&self) -> Color {
        color_or("emissive", &self.emissive, Color::BLACK)
    }

    pub fn polygon_color(&self) -> Color {
        color_or("polygon_color", &self.polygon_color, DEFAULT_POLYGON_COLOR)
    }

    pub fn atmosphere_color(&self) -> Color {
        color_or("atmosphere_color", &self.atmosphere_color, DEFAULT_ATMOSPHERE_COLOR)
    }

    pub fn hex_params(&self) -> HexParams {
        HexParams {
            resolution: self.hex_resolution,
            margin: self.hex_margin,
            use_dots: self.use_dots,
            altitude: self.polygon_altitude,
            radius: self.radius,
        }
    }

    pub fn ring_settings(&self) -> RingSettings {
        RingSettings {
            max_scale: self.ring_max_scale,
            speed: self.ring_speed,
            radius: self.ring_radius,
            ..RingSettings::default()
        }
    }

    pub fn arc_settings(&self) -> ArcEngineSettings {
        ArcEngineSettings {
            radius: self.radius,
            arc_altitude: self.arc_altitude,
            marker_radius: self.marker_radius,
            rings: self.ring_settings(),
        }
    }
}

fn color_or(key: &str, value: &str, fallback: Color) -> Color {
    Color::parse(value).unwrap_or_else(|err| {
        warn!(key, value, %err, "unparseable color, using default");
        fallback
    })
}
