use foundation::LatLon;

use crate::layer::{Layer, LayerKind};
use crate::symbology::{DivIcon, GlyphIcon, MarkerIcon, TextStyle};

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub location: LatLon,
    pub icon: MarkerIcon,
    /// Shown on hover. Plain text.
    pub tooltip: Option<String>,
    /// Shown on click. Plain text.
    pub popup: Option<String>,
}

impl Marker {
    pub fn pin(location: LatLon, icon: GlyphIcon) -> Self {
        Self {
            location,
            icon: MarkerIcon::Glyph(icon),
            tooltip: None,
            popup: None,
        }
    }

    /// A text label anchored at `location` instead of a pin.
    pub fn label(location: LatLon, text: &str, style: &TextStyle) -> Self {
        Self {
            location,
            icon: MarkerIcon::Div(DivIcon::text(text, style)),
            tooltip: None,
            popup: None,
        }
    }

    pub fn with_tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    pub fn with_popup(mut self, text: impl Into<String>) -> Self {
        self.popup = Some(text.into());
        self
    }
}

impl Layer for Marker {
    fn kind(&self) -> LayerKind {
        match self.icon {
            MarkerIcon::Div(_) => LayerKind::Label,
            MarkerIcon::Glyph(_) => LayerKind::Marker,
        }
    }
}
