use std::io;
use std::path::{Path, PathBuf};

use catalog::DEFAULT_BOUNDARY_BASE_URL;
use foundation::LatLon;
use foundation::math::HONG_KONG_KM_PER_DEGREE;

pub const OUTPUT_FILE_NAME: &str = "Travel Map.html";

/// Hong Kong; map center and origin of the radius annotation.
pub const REFERENCE_POINT: LatLon = LatLon::new(22.3193, 114.1694);

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub reference: LatLon,
    pub zoom: u8,
    pub radius_km: f64,
    pub km_per_degree: f64,
    pub label_text: String,
    pub label_popup: String,
    /// Added to the label latitude so the text sits above the line.
    pub label_lat_offset_deg: f64,
    pub boundary_base_url: String,
    pub offline: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            reference: REFERENCE_POINT,
            zoom: 5,
            radius_km: 3500.0,
            km_per_degree: HONG_KONG_KM_PER_DEGREE,
            label_text: "5 hours flight".to_string(),
            label_popup: "3,500 km".to_string(),
            label_lat_offset_deg: 1.0,
            boundary_base_url: DEFAULT_BOUNDARY_BASE_URL.to_string(),
            offline: false,
        }
    }
}

impl MapConfig {
    pub fn radius_m(&self) -> f64 {
        self.radius_km * 1000.0
    }
}

/// Directory holding the running executable.
pub fn program_dir() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        )
    })
}

pub fn output_path(dir: &Path) -> PathBuf {
    dir.join(OUTPUT_FILE_NAME)
}
