use crate::LatLon;

/// Mean Earth radius (meters), IUGG.
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// Kilometers per degree of longitude assumed near Hong Kong's latitude.
pub const HONG_KONG_KM_PER_DEGREE: f64 = 102.66;

/// Degrees of longitude spanned by `distance_km` when every degree is taken
/// to be `km_per_degree` long.
pub fn flat_earth_delta_lon(distance_km: f64, km_per_degree: f64) -> f64 {
    distance_km / km_per_degree
}

/// Moves `origin` due east by `distance_km` using a flat-earth conversion.
///
/// Latitude is left untouched and curvature is ignored, so the result drifts
/// from the true distance the further `origin` is from the latitude that
/// `km_per_degree` was picked for.
pub fn offset_east_flat(origin: LatLon, distance_km: f64, km_per_degree: f64) -> LatLon {
    LatLon::new(
        origin.lat_deg,
        origin.lon_deg + flat_earth_delta_lon(distance_km, km_per_degree),
    )
}

/// Arithmetic midpoint in degree space (not the geodesic midpoint).
pub fn midpoint(a: LatLon, b: LatLon) -> LatLon {
    LatLon::new((a.lat_deg + b.lat_deg) / 2.0, (a.lon_deg + b.lon_deg) / 2.0)
}

/// Great-circle distance on a sphere of radius [`EARTH_MEAN_RADIUS_M`].
pub fn haversine_distance_m(a: LatLon, b: LatLon) -> f64 {
    let dlat = b.lat_rad() - a.lat_rad();
    let dlon = b.lon_rad() - a.lon_rad();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_MEAN_RADIUS_M * h.sqrt().min(1.0).asin()
}
