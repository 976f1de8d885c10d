use foundation::LatLon;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CapitalRecord {
    pub name: &'static str,
    pub lat_deg: f64,
    pub lon_deg: f64,
    /// ISO 3166-1 alpha-3.
    pub country_code: &'static str,
    pub country_name: &'static str,
}

impl CapitalRecord {
    pub const fn new(
        name: &'static str,
        lat_deg: f64,
        lon_deg: f64,
        country_code: &'static str,
        country_name: &'static str,
    ) -> Self {
        Self {
            name,
            lat_deg,
            lon_deg,
            country_code,
            country_name,
        }
    }

    pub fn location(&self) -> LatLon {
        LatLon::new(self.lat_deg, self.lon_deg)
    }
}

pub const CAPITALS: [CapitalRecord; 20] = [
    CapitalRecord::new("Taipei", 25.0330, 121.5654, "TWN", "Taiwan"),
    CapitalRecord::new("Hanoi", 21.0285, 105.8542, "VNM", "Vietnam"),
    CapitalRecord::new("Manila", 14.5995, 120.9842, "PHL", "Philippines"),
    CapitalRecord::new("Vientiane", 17.9757, 102.6331, "LAO", "Laos"),
    CapitalRecord::new("Phnom Penh", 11.5564, 104.9282, "KHM", "Cambodia"),
    CapitalRecord::new("Bangkok", 13.7563, 100.5018, "THA", "Thailand"),
    CapitalRecord::new("Naypyidaw", 19.7633, 96.0785, "MMR", "Myanmar"),
    CapitalRecord::new("Bandar Seri Begawan", 4.9031, 114.9398, "BRN", "Brunei"),
    CapitalRecord::new("Beijing", 39.9042, 116.4074, "CHN", "China"),
    CapitalRecord::new("Seoul", 37.5665, 126.9780, "KOR", "South Korea"),
    CapitalRecord::new("Pyongyang", 39.0392, 125.7625, "PRK", "North Korea"),
    CapitalRecord::new("Dhaka", 23.8103, 90.4125, "BGD", "Bangladesh"),
    CapitalRecord::new("Kuala Lumpur", 3.1390, 101.6869, "MYS", "Malaysia"),
    CapitalRecord::new("Thimphu", 27.4728, 89.6393, "BTN", "Bhutan"),
    CapitalRecord::new("Singapore", 1.3521, 103.8198, "SGP", "Singapore"),
    CapitalRecord::new("Ngerulmud", 7.5006, 134.6242, "PLW", "Palau"),
    CapitalRecord::new("Tokyo", 35.6895, 139.6917, "JPN", "Japan"),
    CapitalRecord::new("Ulaanbaatar", 47.8864, 106.9057, "MNG", "Mongolia"),
    CapitalRecord::new("Kathmandu", 27.7172, 85.3240, "NPL", "Nepal"),
    CapitalRecord::new("Jakarta", -6.2088, 106.8456, "IDN", "Indonesia"),
];

pub fn capitals() -> &'static [CapitalRecord] {
    &CAPITALS
}
