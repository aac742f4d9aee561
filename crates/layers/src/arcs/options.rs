//! Per-arc options and their merge over complete defaults.
//!
//! Callers hand over a partial [`ArcOptions`]; [`resolve`] fills every
//! missing field from [`ArcDefaults`] and normalizes the bool-or-color marker
//! switches into [`Toggle`]s, so nothing downstream ever inspects the union.

use foundation::color::Color;
use foundation::math::LatLng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Caller form of a marker switch: `true`/`false`, or a color string that
/// both enables the marker and overrides its color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerToggle {
    Enabled(bool),
    Color(String),
}

impl From<bool> for MarkerToggle {
    fn from(value: bool) -> Self {
        MarkerToggle::Enabled(value)
    }
}

impl From<&str> for MarkerToggle {
    fn from(value: &str) -> Self {
        MarkerToggle::Color(value.to_string())
    }
}

/// Resolved marker switch. `color: None` means "use the arc color".
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Toggle {
    pub visible: bool,
    pub color: Option<Color>,
}

impl Toggle {
    pub const HIDDEN: Toggle = Toggle {
        visible: false,
        color: None,
    };

    pub fn color_or(&self, fallback: Color) -> Color {
        self.color.unwrap_or(fallback)
    }
}

/// Options supplied by the caller for one arc. Stored verbatim and handed
/// back through the removal callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcOptions {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    #[serde(default)]
    pub color: Option<String>,
    /// Fixed peak altitude as a fraction of the globe radius. When absent
    /// the peak scales with the distance between the endpoints.
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub duration_ms: Option<f64>,
    /// World units per second. A positive velocity overrides `duration_ms`.
    #[serde(default)]
    pub velocity: Option<f64>,
    #[serde(default)]
    pub start_delay_ms: Option<f64>,
    #[serde(default)]
    pub end_delay_ms: Option<f64>,
    #[serde(default)]
    pub show_start_point: Option<MarkerToggle>,
    #[serde(default)]
    pub show_end_point: Option<MarkerToggle>,
    #[serde(default)]
    pub show_start_ring: Option<MarkerToggle>,
    #[serde(default)]
    pub show_end_ring: Option<MarkerToggle>,
    #[serde(default)]
    pub flying: Option<bool>,
    /// Visible slice length as a fraction of the whole arc (flying mode).
    #[serde(default)]
    pub flying_length: Option<f64>,
    /// Tube radius in world units.
    #[serde(default)]
    pub width: Option<f64>,
}

impl ArcOptions {
    pub fn new(start: LatLng, end: LatLng) -> Self {
        Self {
            start_lat: start.lat,
            start_lng: start.lng,
            end_lat: end.lat,
            end_lng: end.lng,
            color: None,
            altitude: None,
            duration_ms: None,
            velocity: None,
            start_delay_ms: None,
            end_delay_ms: None,
            show_start_point: None,
            show_end_point: None,
            show_start_ring: None,
            show_end_ring: None,
            flying: None,
            flying_length: None,
            width: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn with_duration(mut self, ms: f64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn with_delays(mut self, start_ms: f64, end_ms: f64) -> Self {
        self.start_delay_ms = Some(start_ms);
        self.end_delay_ms = Some(end_ms);
        self
    }

    pub fn with_flying(mut self, flying: bool) -> Self {
        self.flying = Some(flying);
        self
    }

    pub fn with_flying_length(mut self, length: f64) -> Self {
        self.flying_length = Some(length);
        self
    }

    pub fn with_points(
        mut self,
        start: impl Into<MarkerToggle>,
        end: impl Into<MarkerToggle>,
    ) -> Self {
        self.show_start_point = Some(start.into());
        self.show_end_point = Some(end.into());
        self
    }

    pub fn with_rings(mut self, start: impl Into<MarkerToggle>, end: impl Into<MarkerToggle>) -> Self {
        self.show_start_ring = Some(start.into());
        self.show_end_ring = Some(end.into());
        self
    }

    pub fn start(&self) -> LatLng {
        LatLng::new(self.start_lat, self.start_lng)
    }

    pub fn end(&self) -> LatLng {
        LatLng::new(self.end_lat, self.end_lng)
    }
}

/// Complete default record every [`ArcOptions`] is merged over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcDefaults {
    pub color: String,
    pub duration_ms: f64,
    pub velocity: Option<f64>,
    pub start_delay_ms: f64,
    pub end_delay_ms: f64,
    pub show_start_point: MarkerToggle,
    pub show_end_point: MarkerToggle,
    pub show_start_ring: MarkerToggle,
    pub show_end_ring: MarkerToggle,
    pub flying: bool,
    pub flying_length: f64,
    pub width: f64,
}

impl Default for ArcDefaults {
    fn default() -> Self {
        Self {
            color: "#ffaa00".to_string(),
            duration_ms: 2000.0,
            velocity: None,
            start_delay_ms: 0.0,
            // Long enough for an end ring at the default speed to fade out at 60 fps.
            end_delay_ms: 3000.0,
            show_start_point: MarkerToggle::Enabled(true),
            show_end_point: MarkerToggle::Enabled(true),
            show_start_ring: MarkerToggle::Enabled(true),
            show_end_ring: MarkerToggle::Enabled(true),
            flying: true,
            flying_length: 0.2,
            width: 0.3,
        }
    }
}

/// Fallback when neither the options nor the defaults carry a usable color.
pub const FALLBACK_ARC_COLOR: Color = Color::rgba(1.0, 0.667, 0.0, 1.0);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcTiming {
    pub duration_ms: f64,
    pub velocity: Option<f64>,
    pub start_delay_ms: f64,
    pub end_delay_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArcOptions {
    pub start: LatLng,
    pub end: LatLng,
    pub color: Color,
    pub altitude: Option<f64>,
    pub timing: ArcTiming,
    pub start_point: Toggle,
    pub end_point: Toggle,
    pub start_ring: Toggle,
    pub end_ring: Toggle,
    pub flying: bool,
    pub flying_length: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArcError {
    #[error("{field} must be a finite number, got {value}")]
    NonFiniteCoordinate { field: &'static str, value: f64 },
    #[error("{field} is invalid ({value}): expected {expected}")]
    InvalidValue {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Merge `options` over `defaults`, key by key, options winning.
pub fn resolve(options: &ArcOptions, defaults: &ArcDefaults) -> Result<ResolvedArcOptions, ArcError> {
    for (field, value) in [
        ("start_lat", options.start_lat),
        ("start_lng", options.start_lng),
        ("end_lat", options.end_lat),
        ("end_lng", options.end_lng),
    ] {
        if !value.is_finite() {
            return Err(ArcError::NonFiniteCoordinate { field, value });
        }
    }

    let duration_ms = non_negative("duration_ms", options.duration_ms.unwrap_or(defaults.duration_ms))?;
    let start_delay_ms = non_negative(
        "start_delay_ms",
        options.start_delay_ms.unwrap_or(defaults.start_delay_ms),
    )?;
    let end_delay_ms = non_negative(
        "end_delay_ms",
        options.end_delay_ms.unwrap_or(defaults.end_delay_ms),
    )?;
    let velocity = options.velocity.or(defaults.velocity);
    if let Some(v) = velocity
        && !v.is_finite()
    {
        return Err(ArcError::InvalidValue {
            field: "velocity",
            value: v,
            expected: "a finite number",
        });
    }
    let width = non_negative("width", options.width.unwrap_or(defaults.width))?;
    let flying_length = options.flying_length.unwrap_or(defaults.flying_length);
    if !flying_length.is_finite() {
        return Err(ArcError::InvalidValue {
            field: "flying_length",
            value: flying_length,
            expected: "a finite fraction",
        });
    }
    if let Some(a) = options.altitude
        && !a.is_finite()
    {
        return Err(ArcError::InvalidValue {
            field: "altitude",
            value: a,
            expected: "a finite fraction of the radius",
        });
    }

    let default_color = Color::parse_or(&defaults.color, FALLBACK_ARC_COLOR);
    let color = match options.color.as_deref() {
        Some(s) => Color::parse(s).unwrap_or_else(|err| {
            warn!(color = s, %err, "unparseable arc color, using default");
            default_color
        }),
        None => default_color,
    };

    let toggle = |given: &Option<MarkerToggle>, fallback: &MarkerToggle| {
        normalize_toggle(given.as_ref().unwrap_or(fallback))
    };

    Ok(ResolvedArcOptions {
        start: options.start(),
        end: options.end(),
        color,
        altitude: options.altitude,
        timing: ArcTiming {
            duration_ms,
            velocity,
            start_delay_ms,
            end_delay_ms,
        },
        start_point: toggle(&options.show_start_point, &defaults.show_start_point),
        end_point: toggle(&options.show_end_point, &defaults.show_end_point),
        start_ring: toggle(&options.show_start_ring, &defaults.show_start_ring),
        end_ring: toggle(&options.show_end_ring, &defaults.show_end_ring),
        flying: options.flying.unwrap_or(defaults.flying),
        flying_length,
        width,
    })
}

pub fn normalize_toggle(toggle: &MarkerToggle) -> Toggle {
    match toggle {
        MarkerToggle::Enabled(visible) => Toggle {
            visible: *visible,
            color: None,
        },
        MarkerToggle::Color(s) => match Color::parse(s) {
            Ok(color) => Toggle {
                visible: true,
                color: Some(color),
            },
            Err(err) => {
                warn!(color = s.as_str(), %err, "unparseable marker color, using arc color");
                Toggle {
                    visible: true,
                    color: None,
                }
            }
        },
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ArcError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ArcError::InvalidValue {
            field,
            value,
            expected: "a finite, non-negative number",
        })
    }
}
