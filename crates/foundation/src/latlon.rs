/// Geographic position in degrees, latitude first.
///
/// No range checks are applied; out-of-range values are passed through to the
/// renderer as-is.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLon {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl LatLon {
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }

    /// `[lat, lon]`, the pair order web maps expect.
    pub fn to_array(self) -> [f64; 2] {
        [self.lat_deg, self.lon_deg]
    }

    pub fn lat_rad(self) -> f64 {
        self.lat_deg.to_radians()
    }

    pub fn lon_rad(self) -> f64 {
        self.lon_deg.to_radians()
    }
}

impl From<(f64, f64)> for LatLon {
    fn from((lat_deg, lon_deg): (f64, f64)) -> Self {
        Self::new(lat_deg, lon_deg)
    }
}
