pub mod control;
pub mod layer;
pub mod marker;
pub mod symbology;
pub mod vector;

pub use control::*;
pub use layer::*;
pub use marker::*;
pub use symbology::*;
pub use vector::*;

/// Anything that can be placed on a map canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Marker(Marker),
    GeoJson(GeoJsonLayer),
    Circle(Circle),
    PolyLine(PolyLine),
    LayerControl(LayerControl),
}

impl Layer for Overlay {
    fn kind(&self) -> LayerKind {
        match self {
            Overlay::Marker(m) => m.kind(),
            Overlay::GeoJson(g) => g.kind(),
            Overlay::Circle(c) => c.kind(),
            Overlay::PolyLine(p) => p.kind(),
            Overlay::LayerControl(c) => c.kind(),
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            Overlay::GeoJson(g) => g.name(),
            _ => None,
        }
    }
}

impl From<Marker> for Overlay {
    fn from(value: Marker) -> Self {
        Overlay::Marker(value)
    }
}

impl From<GeoJsonLayer> for Overlay {
    fn from(value: GeoJsonLayer) -> Self {
        Overlay::GeoJson(value)
    }
}

impl From<Circle> for Overlay {
    fn from(value: Circle) -> Self {
        Overlay::Circle(value)
    }
}

impl From<PolyLine> for Overlay {
    fn from(value: PolyLine) -> Self {
        Overlay::PolyLine(value)
    }
}

impl From<LayerControl> for Overlay {
    fn from(value: LayerControl) -> Self {
        Overlay::LayerControl(value)
    }
}
