use terradraw_types::Coord;

use super::haversine::EARTH_RADIUS_KM;

/// Initial great-circle bearing from `a` to `b`, in degrees clockwise from
/// true north, in `[0, 360)`.
pub fn bearing_degrees(a: Coord, b: Coord) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlng = (b.lng - a.lng).to_radians();

    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();
    let theta = y.atan2(x).to_degrees();
    (theta + 360.0) % 360.0
}

/// Projects `distance_km` from `origin` along `bearing_deg`, along the
/// great circle. Used by the select mode's rotate/resize drag handlers to
/// move a vertex about an anchor.
pub fn destination(origin: Coord, bearing_deg: f64, distance_km: f64) -> Coord {
    let delta = distance_km / EARTH_RADIUS_KM;
    let theta = bearing_deg.to_radians();
    let lat1 = origin.lat.to_radians();
    let lng1 = origin.lng.to_radians();

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lng2 = lng1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    Coord::new(
        ((lng2.to_degrees() + 540.0) % 360.0) - 180.0,
        lat2.to_degrees(),
    )
}
