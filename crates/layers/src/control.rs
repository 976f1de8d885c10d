use serde::Serialize;

use crate::layer::{Layer, LayerId, LayerKind};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Leaflet `L.control.layers`: radio buttons for base layers, checkboxes for
/// overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerControl {
    pub base_layers: Vec<(LayerId, String)>,
    pub overlays: Vec<(LayerId, String)>,
    pub position: ControlPosition,
    pub collapsed: bool,
}

impl LayerControl {
    pub fn new(base_layers: Vec<(LayerId, String)>, overlays: Vec<(LayerId, String)>) -> Self {
        Self {
            base_layers,
            overlays,
            position: ControlPosition::TopRight,
            collapsed: true,
        }
    }
}

impl Layer for LayerControl {
    fn kind(&self) -> LayerKind {
        LayerKind::Control
    }
}
