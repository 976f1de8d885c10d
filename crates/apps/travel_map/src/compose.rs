use canvas::{LayerCounts, MapCanvas};
use catalog::{BoundaryRequest, BoundaryResolver, BoundarySource, CapitalRecord};
use formats::BoundaryDocument;
use foundation::LatLon;
use foundation::math::{haversine_distance_m, midpoint, offset_east_flat};
use layers::{
    Circle, GeoJsonLayer, GlyphIcon, Marker, PathStyle, PolyLine, TextStyle, boundary_style,
};
use tracing::{debug, info, warn};

use crate::config::MapConfig;
use crate::fetch::{BoundaryFetcher, FetchError, error_chain};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryFailure {
    pub country_code: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Composition {
    pub canvas: MapCanvas,
    /// Boundaries that were skipped, in capital order.
    pub failures: Vec<BoundaryFailure>,
}

impl Composition {
    pub fn counts(&self) -> LayerCounts {
        self.canvas.counts()
    }
}

/// Builds the travel map: capital pins, country outlines, the radius circle
/// with its dashed line and label, and a layer control.
pub struct MapComposer<'a> {
    config: &'a MapConfig,
    resolver: BoundaryResolver,
    fetcher: &'a dyn BoundaryFetcher,
}

impl<'a> MapComposer<'a> {
    pub fn new(config: &'a MapConfig, fetcher: &'a dyn BoundaryFetcher) -> Self {
        Self {
            config,
            resolver: BoundaryResolver::new(config.boundary_base_url.clone()),
            fetcher,
        }
    }

    pub fn compose(&self, capitals: &[CapitalRecord]) -> Composition {
        let mut canvas = MapCanvas::new(self.config.reference, self.config.zoom);

        place_markers(&mut canvas, capitals);

        let (boundaries, failures) = self.load_boundaries(capitals);
        for layer in boundaries {
            canvas.add(layer);
        }

        canvas.add(Circle::new(
            self.config.reference,
            self.config.radius_m(),
            PathStyle::stroke("blue", 1.0)
                .with_fill("blue", 0.2)
                .filled(),
        ));

        let endpoint = radius_endpoint(self.config);
        debug!(
            "radius line ends at ({:.4}, {:.4}), great-circle length {:.0} km",
            endpoint.lat_deg,
            endpoint.lon_deg,
            haversine_distance_m(self.config.reference, endpoint) / 1000.0
        );
        canvas.add(PolyLine::segment(
            self.config.reference,
            endpoint,
            PathStyle::stroke("blue", 2.0).with_dash("5, 5"),
        ));

        canvas.add(
            Marker::label(
                label_position(self.config, endpoint),
                &self.config.label_text,
                &TextStyle::default(),
            )
            .with_popup(self.config.label_popup.clone()),
        );

        canvas.add_layer_control();

        Composition { canvas, failures }
    }

    /// Resolves and loads every capital's boundary. A failure only drops that
    /// country's layer; the rest of the batch always runs.
    pub fn load_boundaries(
        &self,
        capitals: &[CapitalRecord],
    ) -> (Vec<GeoJsonLayer>, Vec<BoundaryFailure>) {
        info!("boundary template: {}", self.resolver.base_url());
        capitals.iter().map(|rec| self.resolver.resolve(rec)).fold(
            (Vec::new(), Vec::new()),
            |(mut loaded, mut failed), request| {
                match self.load_boundary(&request) {
                    Ok(doc) => {
                        info!(
                            "loaded boundary {} from {} ({} features, {} vertices)",
                            request.country_code,
                            request.source.url().unwrap_or("inline outline"),
                            doc.features.len(),
                            doc.vertex_count()
                        );
                        loaded.push(GeoJsonLayer::new(request.name, doc, boundary_style()));
                    }
                    Err(err) => {
                        let reason = error_chain(&err);
                        warn!("failed to load {}: {reason}", request.country_code);
                        failed.push(BoundaryFailure {
                            country_code: request.country_code.to_string(),
                            reason,
                        });
                    }
                }
                (loaded, failed)
            },
        )
    }

    fn load_boundary(&self, request: &BoundaryRequest) -> Result<BoundaryDocument, FetchError> {
        match &request.source {
            BoundarySource::Inline(doc) => Ok(doc.clone()),
            BoundarySource::Remote(url) => self.fetcher.fetch(url),
        }
    }
}

/// One pin per capital, hover text is the city name.
pub fn place_markers(canvas: &mut MapCanvas, capitals: &[CapitalRecord]) {
    for rec in capitals {
        canvas.add(
            Marker::pin(rec.location(), GlyphIcon::new("lightgray", "info-sign"))
                .with_tooltip(rec.name),
        );
    }
}

/// East end of the radius line, using the flat-earth km-per-degree constant.
pub fn radius_endpoint(config: &MapConfig) -> LatLon {
    offset_east_flat(config.reference, config.radius_km, config.km_per_degree)
}

/// Midpoint of the radius line, nudged north by the configured offset.
pub fn label_position(config: &MapConfig, endpoint: LatLon) -> LatLon {
    let mid = midpoint(config.reference, endpoint);
    LatLon::new(mid.lat_deg + config.label_lat_offset_deg, mid.lon_deg)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use catalog::{SINGAPORE_BOUNDARY_URL, capitals};
    use formats::{BoundaryDocument, GeoPoint};
    use layers::{LayerKind, MarkerIcon, Overlay};
    use pretty_assertions::assert_eq;

    use super::{BoundaryFailure, MapComposer, label_position, radius_endpoint};
    use crate::config::{MapConfig, output_path};
    use crate::fetch::{BoundaryFetcher, FetchError, HttpFetcher, OfflineFetcher};
    use canvas::LayerCounts;
    use layers::Layer;

    /// Serves a small square for every URL except those listed in `failing`.
    #[derive(Default)]
    struct StubFetcher {
        failing: Vec<String>,
        calls: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        fn failing(urls: &[&str]) -> Self {
            Self {
                failing: urls.iter().map(|u| u.to_string()).collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl BoundaryFetcher for StubFetcher {
        fn fetch(&self, url: &str) -> Result<BoundaryDocument, FetchError> {
            self.calls.borrow_mut().push(url.to_string());
            if self.failing.iter().any(|f| f == url) {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                });
            }
            Ok(BoundaryDocument::polygon(
                url,
                &[
                    GeoPoint::new(0.0, 0.0),
                    GeoPoint::new(1.0, 0.0),
                    GeoPoint::new(1.0, 1.0),
                    GeoPoint::new(0.0, 0.0),
                ],
            ))
        }
    }

    fn country_url(code: &str) -> String {
        format!("https://raw.githubusercontent.com/johan/world.geo.json/master/countries/{code}.geo.json")
    }

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn one_marker_per_capital() {
        let config = MapConfig::default();
        let fetcher = StubFetcher::default();
        let composition = MapComposer::new(&config, &fetcher).compose(capitals());

        let markers: Vec<_> = composition
            .canvas
            .overlays()
            .iter()
            .filter_map(|p| match &p.overlay {
                Overlay::Marker(m) if matches!(m.icon, MarkerIcon::Glyph(_)) => Some(m),
                _ => None,
            })
            .collect();

        assert_eq!(markers.len(), 20);
        for (marker, rec) in markers.iter().zip(capitals()) {
            assert_eq!(marker.tooltip.as_deref(), Some(rec.name));
            assert_eq!(marker.location.lat_deg, rec.lat_deg);
            assert_eq!(marker.location.lon_deg, rec.lon_deg);
        }
    }

    #[test]
    fn fetches_each_remote_boundary_once_in_order() {
        let config = MapConfig::default();
        let fetcher = StubFetcher::default();
        MapComposer::new(&config, &fetcher).compose(capitals());

        let expected: Vec<String> = capitals()
            .iter()
            .filter(|c| c.country_code != "PLW")
            .map(|c| match c.country_code {
                "SGP" => SINGAPORE_BOUNDARY_URL.to_string(),
                code => country_url(code),
            })
            .collect();
        assert_eq!(*fetcher.calls.borrow(), expected);
    }

    #[test]
    fn palau_renders_without_network() {
        let config = MapConfig::default();
        let composition = MapComposer::new(&config, &OfflineFetcher).compose(capitals());

        let names: Vec<String> = composition
            .canvas
            .named_overlays()
            .into_iter()
            .map(|(_, n)| n)
            .collect();
        assert_eq!(names, vec!["Palau".to_string()]);
        assert_eq!(composition.failures.len(), 19);
        assert!(composition.failures.iter().all(|f| f.country_code != "PLW"));
    }

    #[test]
    fn all_layers_present_without_failures() {
        let config = MapConfig::default();
        let fetcher = StubFetcher::default();
        let composition = MapComposer::new(&config, &fetcher).compose(capitals());

        assert!(composition.failures.is_empty());
        assert_eq!(
            composition.counts(),
            LayerCounts {
                markers: 20,
                boundaries: 20,
                circles: 1,
                lines: 1,
                labels: 1,
                controls: 1,
            }
        );
    }

    #[test]
    fn failed_boundary_is_isolated() {
        let config = MapConfig::default();
        let fetcher = StubFetcher::failing(&[&country_url("JPN")]);
        let composition = MapComposer::new(&config, &fetcher).compose(capitals());

        assert_eq!(
            composition.failures,
            vec![BoundaryFailure {
                country_code: "JPN".to_string(),
                reason: format!("HTTP 404 from {}", country_url("JPN")),
            }]
        );
        assert_eq!(
            composition.counts(),
            LayerCounts {
                markers: 20,
                boundaries: 19,
                circles: 1,
                lines: 1,
                labels: 1,
                controls: 1,
            }
        );
        let names: Vec<String> = composition
            .canvas
            .named_overlays()
            .into_iter()
            .map(|(_, n)| n)
            .collect();
        assert!(!names.contains(&"Japan".to_string()));
        assert!(names.contains(&"Mongolia".to_string()));
        // Fetching continued after the failure.
        assert_eq!(fetcher.calls.borrow().len(), 19);
    }

    #[test]
    fn unreachable_host_reason_names_cause() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = MapConfig {
            boundary_base_url: format!("http://{addr}/{{}}.geo.json"),
            ..MapConfig::default()
        };
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .unwrap();
        let fetcher = HttpFetcher::with_client(client);
        let composition = MapComposer::new(&config, &fetcher).compose(&capitals()[..1]);

        assert_eq!(composition.failures.len(), 1);
        let failure = &composition.failures[0];
        assert_eq!(failure.country_code, "TWN");
        assert!(failure.reason.contains("Connection refused"), "{}", failure.reason);
        assert_eq!(composition.counts().markers, 1);
        assert_eq!(composition.counts().boundaries, 0);
    }

    #[test]
    fn singapore_failure_does_not_touch_template() {
        let config = MapConfig::default();
        let fetcher = StubFetcher::failing(&[SINGAPORE_BOUNDARY_URL]);
        let composition = MapComposer::new(&config, &fetcher).compose(capitals());

        assert_eq!(composition.failures.len(), 1);
        assert_eq!(composition.failures[0].country_code, "SGP");
        assert!(!fetcher.calls.borrow().contains(&country_url("SGP")));
    }

    #[test]
    fn layers_are_drawn_in_sequence() {
        let config = MapConfig::default();
        let fetcher = StubFetcher::default();
        let composition = MapComposer::new(&config, &fetcher).compose(capitals());

        let kinds: Vec<LayerKind> = composition
            .canvas
            .overlays()
            .iter()
            .map(|p| p.overlay.kind())
            .collect();
        assert!(kinds[..20].iter().all(|k| *k == LayerKind::Marker));
        assert!(kinds[20..40].iter().all(|k| *k == LayerKind::Boundary));
        assert_eq!(
            &kinds[40..],
            &[
                LayerKind::Circle,
                LayerKind::Line,
                LayerKind::Label,
                LayerKind::Control
            ]
        );
    }

    #[test]
    fn radius_line_uses_flat_earth_offset() {
        let config = MapConfig::default();
        let end = radius_endpoint(&config);
        assert_eq!(end.lat_deg, config.reference.lat_deg);
        assert_close(end.lon_deg, config.reference.lon_deg + 34.094, 1e-3);
    }

    #[test]
    fn label_sits_above_midpoint() {
        let config = MapConfig::default();
        let end = radius_endpoint(&config);
        let pos = label_position(&config, end);
        assert_close(pos.lat_deg, 22.3193 + 1.0, 1e-9);
        assert_close(pos.lon_deg, (114.1694 + end.lon_deg) / 2.0, 1e-9);
    }

    #[test]
    fn label_carries_text_and_popup() {
        let config = MapConfig::default();
        let composition = MapComposer::new(&config, &OfflineFetcher).compose(capitals());
        let label = composition
            .canvas
            .overlays()
            .iter()
            .find_map(|p| match &p.overlay {
                Overlay::Marker(m) if m.kind() == LayerKind::Label => Some(m),
                _ => None,
            })
            .expect("label marker");
        let MarkerIcon::Div(icon) = &label.icon else {
            panic!("label must use a div icon");
        };
        assert!(icon.html.contains("5 hours flight"));
        assert_eq!(label.popup.as_deref(), Some("3,500 km"));
    }

    #[test]
    fn repeated_runs_match() {
        let config = MapConfig::default();
        let first = MapComposer::new(&config, &StubFetcher::default()).compose(capitals());
        let second = MapComposer::new(&config, &StubFetcher::default()).compose(capitals());
        assert_eq!(first.counts(), second.counts());
        assert_eq!(
            first.canvas.to_html().unwrap(),
            second.canvas.to_html().unwrap()
        );
    }

    #[test]
    fn saves_to_fixed_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = MapConfig::default();
        let composition = MapComposer::new(&config, &StubFetcher::default()).compose(capitals());

        let path = output_path(dir.path());
        let written = composition.canvas.save(&path).unwrap();
        assert!(written > 0);
        let meta = std::fs::metadata(dir.path().join("Travel Map.html")).unwrap();
        assert_eq!(meta.len() as usize, written);
    }

    #[test]
    fn custom_base_url_is_used() {
        let config = MapConfig {
            boundary_base_url: "http://mirror.local/{}.json".to_string(),
            ..MapConfig::default()
        };
        let fetcher = StubFetcher::default();
        MapComposer::new(&config, &fetcher).compose(&capitals()[..1]);
        assert_eq!(
            *fetcher.calls.borrow(),
            vec!["http://mirror.local/TWN.json".to_string()]
        );
    }
}
