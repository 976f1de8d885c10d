//! GeoJSON boundary documents.
//!
//! Boundary files come from third-party repositories and are embedded in the
//! generated page verbatim. Before that happens the payload is walked once so
//! that anything Leaflet's `L.geoJson` would choke on is rejected here, per
//! document, instead of breaking the whole page at load time.

use serde_json::{Map, Value, json};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(GeoPoint),
    MultiPoint(Vec<GeoPoint>),
    LineString(Vec<GeoPoint>),
    MultiLineString(Vec<Vec<GeoPoint>>),
    Polygon(Vec<Vec<GeoPoint>>),
    MultiPolygon(Vec<Vec<Vec<GeoPoint>>>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        match self {
            Geometry::Point(_) => 1,
            Geometry::MultiPoint(ps) | Geometry::LineString(ps) => ps.len(),
            Geometry::MultiLineString(rings) | Geometry::Polygon(rings) => {
                rings.iter().map(Vec::len).sum()
            }
            Geometry::MultiPolygon(polys) => polys
                .iter()
                .flat_map(|rings| rings.iter().map(Vec::len))
                .sum(),
            Geometry::GeometryCollection(geoms) => geoms.iter().map(Geometry::vertex_count).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    /// `None` for features with a `null` geometry; Leaflet skips those.
    pub geometry: Option<Geometry>,
}

impl BoundaryFeature {
    pub fn name(&self) -> Option<&str> {
        self.properties.get("name").and_then(|v| v.as_str())
    }
}

/// A validated GeoJSON payload plus the original JSON it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryDocument {
    pub features: Vec<BoundaryFeature>,
    raw: Value,
}

#[derive(Debug, Error)]
pub enum GeoJsonError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not a GeoJSON object: {0}")]
    NotGeoJson(String),

    #[error("invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl BoundaryDocument {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_geojson_value(value)
    }

    /// Accepts a `FeatureCollection`, a single `Feature`, or a bare geometry.
    pub fn from_geojson_value(value: Value) -> Result<Self, GeoJsonError> {
        let obj = value
            .as_object()
            .ok_or_else(|| GeoJsonError::NotGeoJson("top level must be an object".to_string()))?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or_else(|| GeoJsonError::NotGeoJson("missing type".to_string()))?;

        let features = match ty {
            "FeatureCollection" => {
                let features_val = obj.get("features").and_then(|v| v.as_array()).ok_or_else(
                    || GeoJsonError::NotGeoJson("FeatureCollection missing features".to_string()),
                )?;
                let mut features = Vec::with_capacity(features_val.len());
                for (index, feat_val) in features_val.iter().enumerate() {
                    let feature = parse_feature(feat_val)
                        .map_err(|reason| GeoJsonError::InvalidFeature { index, reason })?;
                    features.push(feature);
                }
                features
            }
            "Feature" => vec![
                parse_feature(&value)
                    .map_err(|reason| GeoJsonError::InvalidFeature { index: 0, reason })?,
            ],
            _ => {
                let geometry = parse_geometry(&value).map_err(GeoJsonError::InvalidGeometry)?;
                vec![BoundaryFeature {
                    id: None,
                    properties: Map::new(),
                    geometry: Some(geometry),
                }]
            }
        };

        Ok(Self {
            features,
            raw: value,
        })
    }

    /// Single-feature collection holding one polygon ring.
    pub fn polygon(name: &str, ring: &[GeoPoint]) -> Self {
        let coords: Vec<Value> = ring.iter().map(point_coords).collect();
        let mut properties = Map::new();
        properties.insert("name".to_string(), Value::String(name.to_string()));

        let raw = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": Value::Object(properties.clone()),
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [coords],
                },
            }],
        });

        Self {
            features: vec![BoundaryFeature {
                id: None,
                properties,
                geometry: Some(Geometry::Polygon(vec![ring.to_vec()])),
            }],
            raw,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn vertex_count(&self) -> usize {
        self.features
            .iter()
            .filter_map(|f| f.geometry.as_ref())
            .map(Geometry::vertex_count)
            .sum()
    }
}

fn point_coords(p: &GeoPoint) -> Value {
    Value::Array(vec![Value::from(p.lon_deg), Value::from(p.lat_deg)])
}

fn parse_feature(value: &Value) -> Result<BoundaryFeature, String> {
    let feat_obj = value
        .as_object()
        .ok_or("feature must be an object".to_string())?;

    let feat_type = feat_obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("feature missing type".to_string())?;
    if feat_type != "Feature" {
        return Err(format!("unexpected feature type: {feat_type}"));
    }

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

    let geometry = match feat_obj.get("geometry") {
        None => return Err("feature missing geometry".to_string()),
        Some(Value::Null) => None,
        Some(g) => Some(parse_geometry(g)?),
    };

    Ok(BoundaryFeature {
        id,
        properties,
        geometry,
    })
}

fn parse_geometry(value: &Value) -> Result<Geometry, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    if ty == "GeometryCollection" {
        let geoms = obj
            .get("geometries")
            .and_then(|v| v.as_array())
            .ok_or("GeometryCollection missing geometries".to_string())?;
        let mut out = Vec::with_capacity(geoms.len());
        for g in geoms {
            out.push(parse_geometry(g)?);
        }
        return Ok(Geometry::GeometryCollection(out));
    }

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Point" => Ok(Geometry::Point(position(coords)?)),
        "MultiPoint" => Ok(Geometry::MultiPoint(each(coords, ty, position)?)),
        "LineString" => Ok(Geometry::LineString(each(coords, ty, position)?)),
        "MultiLineString" => Ok(Geometry::MultiLineString(each(coords, ty, line)?)),
        "Polygon" => Ok(Geometry::Polygon(each(coords, ty, line)?)),
        "MultiPolygon" => Ok(Geometry::MultiPolygon(each(coords, ty, |poly| {
            each(poly, "polygon", line)
        })?)),
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

/// Applies `item` to every element of a coordinate array; `what` names the
/// array in the error.
fn each<T>(
    coords: &Value,
    what: &str,
    item: impl Fn(&Value) -> Result<T, String>,
) -> Result<Vec<T>, String> {
    coords
        .as_array()
        .ok_or_else(|| format!("{what} coordinates must be an array"))?
        .iter()
        .map(item)
        .collect()
}

fn line(coords: &Value) -> Result<Vec<GeoPoint>, String> {
    each(coords, "ring", position)
}

fn position(coords: &Value) -> Result<GeoPoint, String> {
    match coords.as_array().map(Vec::as_slice) {
        Some([lon, lat, ..]) => match (lon.as_f64(), lat.as_f64()) {
            (Some(lon), Some(lat)) => Ok(GeoPoint::new(lon, lat)),
            _ => Err(format!("position {coords} has non-numeric lon/lat")),
        },
        _ => Err(format!("position {coords} is not [lon, lat]")),
    }
}
