use serde::Serialize;

/// Leaflet path options (`L.Path`), serialized with Leaflet's option names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub color: String,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<String>,
}

impl PathStyle {
    pub fn stroke(color: impl Into<String>, weight: f64) -> Self {
        Self {
            color: color.into(),
            weight,
            fill: None,
            fill_color: None,
            fill_opacity: None,
            dash_array: None,
        }
    }

    pub fn with_fill(mut self, color: impl Into<String>, opacity: f64) -> Self {
        self.fill_color = Some(color.into());
        self.fill_opacity = Some(opacity);
        self
    }

    /// Sets Leaflet's `fill` flag explicitly. Circles and lines default to no fill.
    pub fn filled(mut self) -> Self {
        self.fill = Some(true);
        self
    }

    pub fn with_dash(mut self, pattern: impl Into<String>) -> Self {
        self.dash_array = Some(pattern.into());
        self
    }
}

/// Shared style for every country outline.
pub fn boundary_style() -> PathStyle {
    PathStyle::stroke("black", 1.0).with_fill("blue", 0.6)
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerIcon {
    /// Bootstrap glyph on a coloured pin (Leaflet.awesome-markers).
    Glyph(GlyphIcon),
    /// Raw HTML in place of the pin (`L.divIcon`).
    Div(DivIcon),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphIcon {
    pub marker_color: String,
    pub icon_color: String,
    pub icon: String,
    pub prefix: String,
}

impl GlyphIcon {
    pub fn new(marker_color: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            marker_color: marker_color.into(),
            icon_color: "white".to_string(),
            icon: icon.into(),
            prefix: "glyphicon".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivIcon {
    pub html: String,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size_pt: f32,
    pub color: String,
    pub width_px: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size_pt: 10.0,
            color: "blue".to_string(),
            width_px: 100,
        }
    }
}

impl DivIcon {
    /// Single-line text label. `text` is escaped.
    pub fn text(text: &str, style: &TextStyle) -> Self {
        Self {
            html: format!(
                r#"<div style="font-size: {}pt; color: {}; width: {}px; white-space: nowrap;">{}</div>"#,
                style.font_size_pt,
                style.color,
                style.width_px,
                escape_html(text)
            ),
            class_name: "empty".to_string(),
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
