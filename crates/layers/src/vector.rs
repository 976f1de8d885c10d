use formats::BoundaryDocument;
use foundation::LatLon;

use crate::layer::{Layer, LayerKind};
use crate::symbology::PathStyle;

/// A named GeoJSON overlay, toggleable from the layer control.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoJsonLayer {
    pub name: String,
    pub document: BoundaryDocument,
    pub style: PathStyle,
}

impl GeoJsonLayer {
    pub fn new(name: impl Into<String>, document: BoundaryDocument, style: PathStyle) -> Self {
        Self {
            name: name.into(),
            document,
            style,
        }
    }
}

impl Layer for GeoJsonLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Boundary
    }

    fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: LatLon,
    /// Ground radius in meters; Leaflet draws it in the map projection.
    pub radius_m: f64,
    pub style: PathStyle,
}

impl Circle {
    pub fn new(center: LatLon, radius_m: f64, style: PathStyle) -> Self {
        Self {
            center,
            radius_m,
            style,
        }
    }
}

impl Layer for Circle {
    fn kind(&self) -> LayerKind {
        LayerKind::Circle
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolyLine {
    pub points: Vec<LatLon>,
    pub style: PathStyle,
}

impl PolyLine {
    pub fn segment(from: LatLon, to: LatLon, style: PathStyle) -> Self {
        Self {
            points: vec![from, to],
            style,
        }
    }
}

impl Layer for PolyLine {
    fn kind(&self) -> LayerKind {
        LayerKind::Line
    }
}

#[cfg(test)]
mod tests {
    use formats::{BoundaryDocument, GeoPoint};
    use foundation::LatLon;

    use super::{Circle, GeoJsonLayer, PolyLine};
    use crate::layer::{Layer, LayerKind};
    use crate::symbology::{PathStyle, boundary_style};

    #[test]
    fn geojson_layer_is_named() {
        let doc = BoundaryDocument::polygon(
            "Box",
            &[
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(1.0, 0.0),
                GeoPoint::new(1.0, 1.0),
            ],
        );
        let layer = GeoJsonLayer::new("Box", doc, boundary_style());
        assert_eq!(layer.kind(), LayerKind::Boundary);
        assert_eq!(layer.name(), Some("Box"));
    }

    #[test]
    fn segment_has_two_points() {
        let line = PolyLine::segment(
            LatLon::new(0.0, 0.0),
            LatLon::new(0.0, 10.0),
            PathStyle::stroke("blue", 2.0),
        );
        assert_eq!(line.points.len(), 2);
        assert_eq!(line.kind(), LayerKind::Line);
    }

    #[test]
    fn circle_is_unnamed() {
        let c = Circle::new(LatLon::new(0.0, 0.0), 1000.0, PathStyle::stroke("blue", 1.0));
        assert_eq!(c.kind(), LayerKind::Circle);
        assert_eq!(c.name(), None);
    }
}
