use formats::{BoundaryDocument, GeoPoint};

use crate::CapitalRecord;

/// Per-country GeoJSON files, `{}` is replaced by the alpha-3 code.
pub const DEFAULT_BOUNDARY_BASE_URL: &str =
    "https://raw.githubusercontent.com/johan/world.geo.json/master/countries/{}.geo.json";

/// The per-country repository has no usable Singapore outline.
pub const SINGAPORE_BOUNDARY_URL: &str =
    "https://raw.githubusercontent.com/yinshanyang/singapore/master/maps/0-country.geojson";

/// Hand-drawn outline around the Palau main islands as (lon, lat).
/// Approximate; the per-country repository has no Palau file.
pub const PALAU_OUTLINE: [(f64, f64); 5] = [
    (134.00012, 6.800),
    (134.56012, 7.000),
    (134.7434, 7.872),
    (134.5434, 7.806),
    (134.46012, 7.5006),
];

#[derive(Debug, Clone, PartialEq)]
pub enum BoundarySource {
    Remote(String),
    Inline(BoundaryDocument),
}

impl BoundarySource {
    pub fn url(&self) -> Option<&str> {
        match self {
            BoundarySource::Remote(url) => Some(url.as_str()),
            BoundarySource::Inline(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRequest {
    pub country_code: &'static str,
    /// Layer name shown in the layer control.
    pub name: String,
    pub source: BoundarySource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryResolver {
    base_url: String,
}

impl Default for BoundaryResolver {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDARY_BASE_URL)
    }
}

impl BoundaryResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resolve(&self, record: &CapitalRecord) -> BoundaryRequest {
        let (name, source) = match record.country_code {
            "SGP" => (
                "Singapore".to_string(),
                BoundarySource::Remote(SINGAPORE_BOUNDARY_URL.to_string()),
            ),
            "PLW" => (
                "Palau".to_string(),
                BoundarySource::Inline(palau_outline()),
            ),
            code => (
                record.country_name.to_string(),
                BoundarySource::Remote(expand_template(&self.base_url, code)),
            ),
        };

        BoundaryRequest {
            country_code: record.country_code,
            name,
            source,
        }
    }
}

pub fn expand_template(base_url: &str, code: &str) -> String {
    base_url.replace("{}", code)
}

pub fn palau_outline() -> BoundaryDocument {
    let ring: Vec<GeoPoint> = PALAU_OUTLINE
        .iter()
        .map(|&(lon, lat)| GeoPoint::new(lon, lat))
        .collect();
    BoundaryDocument::polygon("Palau", &ring)
}
