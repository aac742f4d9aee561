//! GeoJSON land polygons.
//!
//! Only `Polygon` and `MultiPolygon` geometries are kept; every other geometry
//! type (and features with a null geometry) is ignored.

use std::path::{Path, PathBuf};

use foundation::math::LatLng;
use serde_json::{Map, Value};

/// Closed ring of `[lng, lat]` positions, stored as `LatLng`.
pub type Ring = Vec<LatLng>;

/// Outer ring followed by holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandPolygon {
    pub rings: Vec<Ring>,
}

impl LandPolygon {
    pub fn new(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    pub fn exterior(&self) -> Option<&Ring> {
        self.rings.first()
    }

    pub fn holes(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandFeature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    /// A `Polygon` yields one entry, a `MultiPolygon` one per member.
    pub polygons: Vec<LandPolygon>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandFeatures {
    pub features: Vec<LandFeature>,
}

#[derive(Debug, thiserror::Error)]
pub enum LandDataError {
    #[error("failed to read land data from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("land data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected GeoJSON FeatureCollection")]
    NotAFeatureCollection,
    #[error("invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },
}

impl LandFeatures {
    pub fn from_polygons(polygons: Vec<LandPolygon>) -> Self {
        Self {
            features: vec![LandFeature {
                id: None,
                properties: Map::new(),
                polygons,
            }],
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LandDataError> {
        let path = path.as_ref();
        let payload = std::fs::read_to_string(path).map_err(|source| LandDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_geojson_str(&payload)
    }

    pub fn from_geojson_str(payload: &str) -> Result<Self, LandDataError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, LandDataError> {
        let obj = value
            .as_object()
            .ok_or(LandDataError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(LandDataError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(LandDataError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(LandDataError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let invalid = |reason: &str| LandDataError::InvalidFeature {
                index,
                reason: reason.to_string(),
            };
            let feat_obj = feat_val
                .as_object()
                .ok_or_else(|| invalid("feature must be an object"))?;

            let id = match feat_obj.get("id") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            };

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();

            let polygons = match feat_obj.get("geometry") {
                None | Some(Value::Null) => continue,
                Some(geometry) => parse_geometry(geometry)
                    .map_err(|reason| LandDataError::InvalidFeature { index, reason })?,
            };
            let Some(polygons) = polygons else {
                continue;
            };

            features.push(LandFeature {
                id,
                properties,
                polygons,
            });
        }

        Ok(Self { features })
    }

    pub fn polygons(&self) -> impl Iterator<Item = &LandPolygon> {
        self.features.iter().flat_map(|f| f.polygons.iter())
    }

    pub fn polygon_count(&self) -> usize {
        self.features.iter().map(|f| f.polygons.len()).sum()
    }
}

/// `Ok(None)` for geometry types that are not land polygons.
fn parse_geometry(value: &Value) -> Result<Option<Vec<LandPolygon>>, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    match ty {
        "Polygon" => {
            let coords = coordinates(obj)?;
            Ok(Some(vec![parse_polygon(coords)?]))
        }
        "MultiPolygon" => {
            let coords = coordinates(obj)?;
            Ok(Some(parse_multi_polygon(coords)?))
        }
        _ => Ok(None),
    }
}

fn coordinates(obj: &Map<String, Value>) -> Result<&Value, String> {
    obj.get("coordinates")
        .ok_or("geometry missing coordinates".to_string())
}

fn parse_position(coords: &Value) -> Result<LatLng, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lng, lat]".to_string());
    }
    let lng = arr[0]
        .as_f64()
        .ok_or("position lng must be a number".to_string())?;
    let lat = arr[1]
        .as_f64()
        .ok_or("position lat must be a number".to_string())?;
    Ok(LatLng::new(lat, lng))
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    arr.iter().map(parse_position).collect()
}

fn parse_polygon(coords: &Value) -> Result<LandPolygon, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let rings = rings.iter().map(parse_ring).collect::<Result<Vec<_>, _>>()?;
    Ok(LandPolygon::new(rings))
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<LandPolygon>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    polys.iter().map(parse_polygon).collect()
}
