use geo::Coord;

/// Planar azimuth of travel from `from` to `to`, in degrees normalized to `[0, 360)`.
///
/// Measured counter-clockwise from the +x axis (`atan2(dy, dx)`). Only
/// differences between azimuths are used downstream, so the reference
/// direction does not affect turning angles. A zero-length step has azimuth 0.
#[inline]
pub fn azimuth(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let degrees = (to.y - from.y).atan2(to.x - from.x).to_degrees();
    if degrees < 0.0 { degrees + 360.0 } else { degrees }
}

/// Absolute turning angle at `curr`, in degrees within `[0, 180]`.
/// 0 is a straight continuation, 180 a full reversal.
pub fn turning_angle(prev: Coord<f64>, curr: Coord<f64>, next: Coord<f64>) -> f64 {
    let incoming = azimuth(prev, curr);
    let outgoing = azimuth(curr, next);

    // Fold into [-180, 180): the shortest signed turn.
    let diff = (outgoing - incoming + 180.0).rem_euclid(360.0) - 180.0;
    diff.abs()
}
