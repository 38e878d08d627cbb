//! Great-circle geodesy on a spherical Earth.
//!
//! Longitudes and latitudes are in decimal degrees, distances in kilometres,
//! azimuths in decimal degrees clockwise from north.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS: f64 = 6371.0;

/// Great-circle distance between two points, using the haversine formula.
pub fn geodetic_distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lon1, lat1) = (lon1.to_radians(), lat1.to_radians());
    let (lon2, lat2) = (lon2.to_radians(), lat2.to_radians());
    let half_dlat = ((lat1 - lat2) / 2.0).sin();
    let half_dlon = ((lon1 - lon2) / 2.0).sin();
    let a = half_dlat * half_dlat + lat1.cos() * lat2.cos() * half_dlon * half_dlon;
    2.0 * EARTH_RADIUS * a.sqrt().min(1.0).asin()
}

/// Initial azimuth of the great circle from the first point to the second.
pub fn azimuth(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lon1, lat1) = (lon1.to_radians(), lat1.to_radians());
    let (lon2, lat2) = (lon2.to_radians(), lat2.to_radians());
    let cos_lat2 = lat2.cos();
    let true_course = ((lon1 - lon2).sin() * cos_lat2)
        .atan2(lat1.cos() * lat2.sin() - lat1.sin() * cos_lat2 * (lon1 - lon2).cos())
        .to_degrees();
    (360.0 - true_course).rem_euclid(360.0)
}

/// Straight-line distance between two points at depth, combining the
/// great-circle distance with the depth difference.
pub fn distance(lon1: f64, lat1: f64, depth1: f64, lon2: f64, lat2: f64, depth2: f64) -> f64 {
    let horizontal = geodetic_distance(lon1, lat1, lon2, lat2);
    horizontal.hypot(depth1 - depth2)
}

/// Signed distance from a target point to the great circle passing through
/// `(alon, alat)` with azimuth `aazimuth`.
///
/// Positive values lie to the right of the arc when looking along the azimuth.
pub fn distance_to_arc(alon: f64, alat: f64, aazimuth: f64, plon: f64, plat: f64) -> f64 {
    let azimuth_to_target = azimuth(alon, alat, plon, plat);
    let distance_to_target = geodetic_distance(alon, alat, plon, plat);
    let t_angle = (azimuth_to_target - aazimuth + 360.0).rem_euclid(360.0);
    let product = t_angle.to_radians().sin() * (distance_to_target / EARTH_RADIUS).sin();
    let angle = product.clamp(-1.0, 1.0).acos();
    (std::f64::consts::FRAC_PI_2 - angle) * EARTH_RADIUS
}
