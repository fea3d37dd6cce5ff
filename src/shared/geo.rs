//! Great-circle distance helpers.

/// Earth's radius in kilometers (for Haversine formula)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
///
/// Inputs are degrees and are not range-checked. NaN in, NaN out.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let delta_lat = (lat2 - lat1).abs().to_radians();
    let delta_lon = (lon2 - lon1).abs().to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance formatted with exactly two decimals, e.g. `"111.19"`.
///
/// A NaN distance renders as `"NaN"`.
pub fn format_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> String {
    format!("{:.2}", haversine_km(lat1, lon1, lat2, lon2))
}
