#![warn(missing_docs)]

//! Angle arithmetic and numeric tolerances for the jeo converters.
//!
//! Arcs arrive from the exchange format as an angle pair plus a winding
//! direction; the indexed format stores three points plus a direction flag.
//! The normalizers here reconcile the two: both canonicalize the angle pair
//! into a monotonically increasing sweep, but one folds the direction in by
//! swapping the endpoints and the other by adjusting the signed delta.
//! Round trips exercise both, so both are kept.

use std::f64::consts::PI;

/// A point in 3D drawing space.
pub type Point3 = nalgebra::Point3<f64>;

/// Maximum Euclidean distance at which two coordinates are treated as the
/// same point when building the deduplicated point pool.
pub const DISTANCE_TOLERANCE: f64 = 1e-3;

/// Wrap an angle into `[0, 2π)`.
///
/// `f64::rem_euclid` is not used because the reference arithmetic is
/// `fmod` followed by an explicit negative-remainder correction, and the
/// two can differ in the last ulp for negative inputs.
pub fn wrap_two_pi(theta: f64) -> f64 {
    let mut theta = theta % (2.0 * PI);
    if theta < 0.0 {
        theta += 2.0 * PI;
    }
    theta
}

/// Check whether an angle is zero within `epsilon`.
pub fn is_null(theta: f64, epsilon: f64) -> bool {
    theta.abs() <= epsilon
}

/// Check whether an angle is a whole number of revolutions within `epsilon`.
///
/// The angle is first wrapped into `[0, 2π)` and then compared against both
/// ends of the interval, so inputs just below a multiple of 2π match too.
pub fn is_full_turn(theta: f64, epsilon: f64) -> bool {
    let theta = wrap_two_pi(theta);
    theta.abs() <= epsilon || (theta - 2.0 * PI).abs() <= epsilon
}

/// Normalize an arc angle pair using the swap strategy.
///
/// Returns `(theta1, theta2)` with `theta1` in `[0, 2π)` and
/// `theta2 >= theta1`. `direct` means the sweep from `theta1` to `theta2`
/// is counter-clockwise; when it is false the two canonicalized angles are
/// exchanged before the sweep is made increasing.
///
/// A pair whose difference is a whole number of revolutions is special:
/// a zero difference stays a zero-length arc, anything else becomes exactly
/// one full revolution. The two cases share a canonical angle but must not
/// collapse into each other.
pub fn normalize_sweep(theta1: f64, theta2: f64, direct: bool) -> (f64, f64) {
    if is_full_turn(theta1 - theta2, f64::EPSILON) {
        let delta = if is_null(theta1 - theta2, f64::EPSILON) {
            0.0
        } else {
            2.0 * PI
        };
        let theta1 = wrap_two_pi(theta1);
        (theta1, theta1 + delta)
    } else {
        let mut theta1 = wrap_two_pi(theta1);
        let mut theta2 = wrap_two_pi(theta2);
        if !direct {
            std::mem::swap(&mut theta1, &mut theta2);
        }
        if theta2 < theta1 {
            theta2 += 2.0 * PI;
        }
        (theta1, theta2)
    }
}

/// Normalize an arc angle pair using the signed-delta strategy.
///
/// Unlike [`normalize_sweep`] this keeps `theta1` as the sweep start and
/// adds or subtracts a revolution from the delta until its sign agrees with
/// `direct`, so the result may be decreasing when `direct` is false.
pub fn normalize_sweep_signed(theta1: f64, theta2: f64, direct: bool) -> (f64, f64) {
    if is_full_turn(theta1 - theta2, f64::EPSILON) {
        let delta = if is_null(theta1 - theta2, f64::EPSILON) {
            0.0
        } else {
            2.0 * PI
        };
        let theta1 = wrap_two_pi(theta1);
        (theta1, theta1 + delta)
    } else {
        let theta1 = wrap_two_pi(theta1);
        let theta2 = wrap_two_pi(theta2);

        let mut delta = theta2 - theta1;
        if delta > 0.0 && !direct {
            delta -= 2.0 * PI;
        } else if delta < 0.0 && direct {
            delta += 2.0 * PI;
        }

        (theta1, theta1 + delta)
    }
}
