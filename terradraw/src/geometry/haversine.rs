use terradraw_types::Coord;

/// Mean earth radius in kilometres, as used throughout the upstream
/// geometry-kernel lineage this crate is built from.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance between two WGS84 coordinates, in kilometres.
///
/// ```
/// use terradraw::geometry::haversine_distance_km;
/// use terradraw_types::Coord;
///
/// let london = Coord::new(-0.1278, 51.5074);
/// let paris = Coord::new(2.3522, 48.8566);
/// let km = haversine_distance_km(london, paris);
/// assert!((km - 343.0).abs() < 5.0);
/// ```
pub fn haversine_distance_km(a: Coord, b: Coord) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();
    EARTH_RADIUS_KM * c
}
