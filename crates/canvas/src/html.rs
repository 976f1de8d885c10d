//! Leaflet HTML document writer.
//!
//! Output is a single self-contained page: Leaflet and the marker plugin come
//! from public CDNs, every overlay (including boundary GeoJSON) is inlined as
//! a script statement. Variable names are derived from layer ids, so the same
//! canvas always renders to the same bytes.

use std::fmt::Write;
use std::path::PathBuf;

use layers::{
    Circle, GeoJsonLayer, LayerControl, LayerId, Marker, MarkerIcon, Overlay, PathStyle, PolyLine,
    escape_html,
};
use serde::Serialize;
use thiserror::Error;

use crate::MapCanvas;

const MAP_ID: LayerId = LayerId(0);

const SCRIPTS: &[&str] = &[
    "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.js",
    "https://code.jquery.com/jquery-3.7.1.min.js",
    "https://cdn.jsdelivr.net/npm/bootstrap@5.2.2/dist/js/bootstrap.bundle.min.js",
    "https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js",
];

const STYLESHEETS: &[&str] = &[
    "https://cdn.jsdelivr.net/npm/leaflet@1.9.3/dist/leaflet.css",
    "https://cdn.jsdelivr.net/npm/bootstrap@5.2.2/dist/css/bootstrap.min.css",
    "https://netdna.bootstrapcdn.com/bootstrap/3.0.0/css/bootstrap-glyphicons.css",
    "https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css",
];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("format error")]
    Fmt(#[from] std::fmt::Error),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("write {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    center: [f64; 2],
    zoom: u8,
    zoom_control: bool,
    prefer_canvas: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    attribution: &'a str,
    max_zoom: u8,
}

#[derive(Serialize)]
struct CircleOptions<'a> {
    #[serde(flatten)]
    style: &'a PathStyle,
    radius: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ControlOptions {
    position: layers::ControlPosition,
    collapsed: bool,
    auto_z_index: bool,
}

pub(crate) fn render(canvas: &MapCanvas) -> Result<String, RenderError> {
    let map_var = var_name("map", MAP_ID);
    let mut out = String::with_capacity(16 * 1024);

    write_head(&mut out, &map_var)?;

    writeln!(out, "<script>")?;
    let options = MapOptions {
        center: canvas.center().to_array(),
        zoom: canvas.zoom(),
        zoom_control: true,
        prefer_canvas: false,
    };
    writeln!(
        out,
        "    var {map_var} = L.map({}, {});",
        js_json(&map_var)?,
        js_json(&options)?
    )?;

    let (tiles_id, tiles) = canvas.tiles();
    writeln!(
        out,
        "    var {} = L.tileLayer({}, {}).addTo({map_var});",
        var_name("tile_layer", tiles_id),
        js_json(&tiles.url_template)?,
        js_json(&TileOptions {
            attribution: &tiles.attribution,
            max_zoom: tiles.max_zoom,
        })?
    )?;

    for placed in canvas.overlays() {
        match &placed.overlay {
            Overlay::Marker(m) => write_marker(&mut out, &map_var, placed.id, m)?,
            Overlay::GeoJson(g) => write_geojson(&mut out, &map_var, placed.id, g)?,
            Overlay::Circle(c) => write_circle(&mut out, &map_var, placed.id, c)?,
            Overlay::PolyLine(p) => write_polyline(&mut out, &map_var, placed.id, p)?,
            Overlay::LayerControl(c) => write_control(&mut out, &map_var, placed.id, c)?,
        }
    }

    writeln!(out, "</script>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}

fn write_head(out: &mut String, map_var: &str) -> Result<(), RenderError> {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(
        out,
        r#"    <meta http-equiv="content-type" content="text/html; charset=UTF-8" />"#
    )?;
    for src in SCRIPTS {
        writeln!(out, r#"    <script src="{src}"></script>"#)?;
    }
    for href in STYLESHEETS {
        writeln!(out, r#"    <link rel="stylesheet" href="{href}"/>"#)?;
    }
    writeln!(
        out,
        r#"    <meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no" />"#
    )?;
    writeln!(out, "    <style>")?;
    writeln!(
        out,
        "        html, body {{ width: 100%; height: 100%; margin: 0; padding: 0; }}"
    )?;
    writeln!(
        out,
        "        #{map_var} {{ position: absolute; top: 0; bottom: 0; right: 0; left: 0; }}"
    )?;
    writeln!(out, "    </style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, r#"    <div class="map" id="{map_var}"></div>"#)?;
    writeln!(out, "</body>")?;
    Ok(())
}

fn write_marker(
    out: &mut String,
    map_var: &str,
    id: LayerId,
    marker: &Marker,
) -> Result<(), RenderError> {
    let var = var_name("marker", id);
    writeln!(
        out,
        "    var {var} = L.marker({}, {{}}).addTo({map_var});",
        js_json(&marker.location.to_array())?
    )?;

    match &marker.icon {
        MarkerIcon::Glyph(icon) => writeln!(
            out,
            "    {var}.setIcon(L.AwesomeMarkers.icon({}));",
            js_json(icon)?
        )?,
        MarkerIcon::Div(icon) => {
            writeln!(out, "    {var}.setIcon(L.divIcon({}));", js_json(icon)?)?
        }
    }

    if let Some(text) = &marker.tooltip {
        writeln!(
            out,
            "    {var}.bindTooltip({}, {{\"sticky\": true}});",
            js_json(&format!("<div>{}</div>", escape_html(text)))?
        )?;
    }
    if let Some(text) = &marker.popup {
        writeln!(
            out,
            "    {var}.bindPopup({}, {{\"maxWidth\": \"100%\"}});",
            js_json(&format!("<div>{}</div>", escape_html(text)))?
        )?;
    }
    Ok(())
}

fn write_geojson(
    out: &mut String,
    map_var: &str,
    id: LayerId,
    layer: &GeoJsonLayer,
) -> Result<(), RenderError> {
    let var = var_name("geo_json", id);
    writeln!(
        out,
        "    function {var}_styler(feature) {{ return {}; }}",
        js_json(&layer.style)?
    )?;
    writeln!(
        out,
        "    var {var} = L.geoJson(null, {{style: {var}_styler}}).addTo({map_var});"
    )?;
    writeln!(
        out,
        "    {var}.addData({});",
        js_json(layer.document.as_value())?
    )?;
    Ok(())
}

fn write_circle(
    out: &mut String,
    map_var: &str,
    id: LayerId,
    circle: &Circle,
) -> Result<(), RenderError> {
    let options = CircleOptions {
        style: &circle.style,
        radius: circle.radius_m,
    };
    writeln!(
        out,
        "    var {} = L.circle({}, {}).addTo({map_var});",
        var_name("circle", id),
        js_json(&circle.center.to_array())?,
        js_json(&options)?
    )?;
    Ok(())
}

fn write_polyline(
    out: &mut String,
    map_var: &str,
    id: LayerId,
    line: &PolyLine,
) -> Result<(), RenderError> {
    let points: Vec<[f64; 2]> = line.points.iter().map(|p| p.to_array()).collect();
    writeln!(
        out,
        "    var {} = L.polyline({}, {}).addTo({map_var});",
        var_name("poly_line", id),
        js_json(&points)?,
        js_json(&line.style)?
    )?;
    Ok(())
}

fn write_control(
    out: &mut String,
    map_var: &str,
    id: LayerId,
    control: &LayerControl,
) -> Result<(), RenderError> {
    let var = var_name("layer_control", id);
    writeln!(out, "    var {var}_layers = {{")?;
    writeln!(
        out,
        "        base_layers: {{{}}},",
        layer_entries("tile_layer", &control.base_layers)?
    )?;
    writeln!(
        out,
        "        overlays: {{{}}},",
        layer_entries("geo_json", &control.overlays)?
    )?;
    writeln!(out, "    }};")?;

    let options = ControlOptions {
        position: control.position,
        collapsed: control.collapsed,
        auto_z_index: true,
    };
    writeln!(
        out,
        "    var {var} = L.control.layers({var}_layers.base_layers, {var}_layers.overlays, {}).addTo({map_var});",
        js_json(&options)?
    )?;
    Ok(())
}

fn layer_entries(prefix: &str, entries: &[(LayerId, String)]) -> Result<String, RenderError> {
    let mut parts = Vec::with_capacity(entries.len());
    for (id, name) in entries {
        parts.push(format!("{}: {}", js_json(name)?, var_name(prefix, *id)));
    }
    Ok(parts.join(", "))
}

fn var_name(prefix: &str, id: LayerId) -> String {
    format!("{prefix}_{}", id.0)
}

/// JSON is valid JavaScript; `</` is escaped so embedded payloads cannot close
/// the surrounding `<script>` element.
fn js_json<T: Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use formats::{BoundaryDocument, GeoPoint};
    use foundation::LatLon;
    use layers::{
        Circle, GeoJsonLayer, GlyphIcon, Marker, PathStyle, PolyLine, TextStyle, boundary_style,
    };
    use serde_json::json;

    use super::js_json;
    use crate::MapCanvas;

    fn sample_canvas() -> MapCanvas {
        let center = LatLon::new(22.3193, 114.1694);
        let mut canvas = MapCanvas::new(center, 5);
        canvas.add(
            Marker::pin(
                LatLon::new(25.033, 121.5654),
                GlyphIcon::new("lightgray", "info-sign"),
            )
            .with_tooltip("Taipei"),
        );
        let doc = BoundaryDocument::polygon(
            "Palau",
            &[
                GeoPoint::new(134.0, 6.8),
                GeoPoint::new(134.5, 7.0),
                GeoPoint::new(134.7, 7.8),
            ],
        );
        canvas.add(GeoJsonLayer::new("Palau", doc, boundary_style()));
        canvas.add(Circle::new(
            center,
            3_500_000.0,
            PathStyle::stroke("blue", 1.0)
                .with_fill("blue", 0.2)
                .filled(),
        ));
        canvas.add(PolyLine::segment(
            center,
            LatLon::new(22.3193, 148.0),
            PathStyle::stroke("blue", 2.0).with_dash("5, 5"),
        ));
        canvas.add(
            Marker::label(LatLon::new(23.3, 131.0), "5 hours flight", &TextStyle::default())
                .with_popup("3,500 km"),
        );
        canvas.add_layer_control();
        canvas
    }

    #[test]
    fn renders_every_overlay() {
        let html = sample_canvas().to_html().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"var map_0 = L.map("map_0", {"center":[22.3193,114.1694],"zoom":5"#));
        assert!(html.contains("var tile_layer_1 = L.tileLayer("));
        assert!(html.contains("var marker_2 = L.marker([25.033,121.5654], {}).addTo(map_0);"));
        assert!(html.contains(r#"marker_2.bindTooltip("<div>Taipei<\/div>""#));
        assert!(html.contains(r#""markerColor":"lightgray""#));
        assert!(html.contains("var geo_json_3 = L.geoJson(null, {style: geo_json_3_styler})"));
        assert!(html.contains(r#""fillColor":"blue","fillOpacity":0.6"#));
        assert!(html.contains(r#""radius":3500000.0"#));
        assert!(html.contains(r#""dashArray":"5, 5""#));
        assert!(html.contains("L.divIcon("));
        assert!(html.contains("5 hours flight"));
        assert!(html.contains(r#"bindPopup("<div>3,500 km<\/div>""#));
        assert!(html.contains(r#"overlays: {"Palau": geo_json_3},"#));
        assert!(html.contains(r#"base_layers: {"openstreetmap": tile_layer_1},"#));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let canvas = sample_canvas();
        assert_eq!(canvas.to_html().unwrap(), canvas.to_html().unwrap());
        assert_eq!(canvas.to_html().unwrap(), sample_canvas().to_html().unwrap());
    }

    #[test]
    fn embedded_json_cannot_close_script() {
        let s = js_json(&json!({"name": "</script><script>alert(1)"})).unwrap();
        assert!(!s.contains("</script>"));
        assert!(s.contains(r"<\/script>"));
    }

    #[test]
    fn tooltip_text_is_escaped() {
        let mut canvas = MapCanvas::new(LatLon::new(0.0, 0.0), 3);
        canvas.add(
            Marker::pin(LatLon::new(0.0, 0.0), GlyphIcon::new("red", "star")).with_tooltip("<b>"),
        );
        let html = canvas.to_html().unwrap();
        assert!(html.contains("&lt;b&gt;"));
    }
}
