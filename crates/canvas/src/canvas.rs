use std::path::Path;

use foundation::LatLon;
use layers::{Layer, LayerControl, LayerId, LayerKind, Overlay};

use crate::html::{self, RenderError, SaveError};

/// Raster base layer drawn under every overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl TileLayer {
    pub fn openstreetmap() -> Self {
        Self {
            name: "openstreetmap".to_string(),
            url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_string(),
            max_zoom: 19,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOverlay {
    pub id: LayerId,
    pub overlay: Overlay,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct LayerCounts {
    pub markers: usize,
    pub boundaries: usize,
    pub circles: usize,
    pub lines: usize,
    pub labels: usize,
    pub controls: usize,
}

impl LayerCounts {
    pub fn total(&self) -> usize {
        self.markers + self.boundaries + self.circles + self.lines + self.labels + self.controls
    }
}

/// The map being composed. Overlays are kept in insertion order, which is also
/// their draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct MapCanvas {
    center: LatLon,
    zoom: u8,
    tiles: (LayerId, TileLayer),
    overlays: Vec<PlacedOverlay>,
    next_id: u64,
}

impl MapCanvas {
    pub fn new(center: LatLon, zoom: u8) -> Self {
        Self::with_tiles(center, zoom, TileLayer::openstreetmap())
    }

    pub fn with_tiles(center: LatLon, zoom: u8, tiles: TileLayer) -> Self {
        // Id 0 is the map itself; ids only need to be unique within one document.
        Self {
            center,
            zoom,
            tiles: (LayerId(1), tiles),
            overlays: Vec::new(),
            next_id: 2,
        }
    }

    pub fn center(&self) -> LatLon {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn tiles(&self) -> (LayerId, &TileLayer) {
        (self.tiles.0, &self.tiles.1)
    }

    pub fn add(&mut self, overlay: impl Into<Overlay>) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.overlays.push(PlacedOverlay {
            id,
            overlay: overlay.into(),
        });
        id
    }

    pub fn overlays(&self) -> &[PlacedOverlay] {
        &self.overlays
    }

    /// Named overlays in insertion order.
    pub fn named_overlays(&self) -> Vec<(LayerId, String)> {
        self.overlays
            .iter()
            .filter_map(|p| p.overlay.name().map(|n| (p.id, n.to_string())))
            .collect()
    }

    /// Adds a layer control listing the base tiles and every named overlay
    /// placed so far.
    pub fn add_layer_control(&mut self) -> LayerId {
        let base = vec![(self.tiles.0, self.tiles.1.name.clone())];
        let control = LayerControl::new(base, self.named_overlays());
        self.add(control)
    }

    pub fn counts(&self) -> LayerCounts {
        let mut counts = LayerCounts::default();
        for placed in &self.overlays {
            match placed.overlay.kind() {
                LayerKind::Marker => counts.markers += 1,
                LayerKind::Boundary => counts.boundaries += 1,
                LayerKind::Circle => counts.circles += 1,
                LayerKind::Line => counts.lines += 1,
                LayerKind::Label => counts.labels += 1,
                LayerKind::Control => counts.controls += 1,
            }
        }
        counts
    }

    pub fn to_html(&self) -> Result<String, RenderError> {
        html::render(self)
    }

    /// Renders and writes the document, returning the number of bytes written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize, SaveError> {
        let path = path.as_ref();
        let doc = self.to_html()?;
        std::fs::write(path, doc.as_bytes()).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(doc.len())
    }
}
