//! Fixed bend-angle to loss-factor table.
//!
//! Keys are exact angles in degrees. There is no interpolation: an angle
//! that is not listed is rejected.

use crate::error::{DispatchError, Result};

/// Largest bend angle a connector may have [degrees].
pub const MAX_BEND_ANGLE: f64 = 45.0;

const BEND_LOSS_FACTORS: [(f64, f64); 8] = [
    (3.0, 0.0118),
    (4.0, 0.012),
    (12.0, 0.047),
    (16.0, 0.051),
    (21.0, 0.02),
    (22.0, 0.03),
    (28.0, 0.08),
    (30.0, 0.1),
];

/// Looks up the tabulated loss factor for a bend angle [degrees].
///
/// # Errors
/// [`DispatchError::AngleNotInTable`] if `angle` is not an exact key.
pub fn loss_factor(angle: f64) -> Result<f64> {
    BEND_LOSS_FACTORS
        .iter()
        .find(|(key, _)| *key == angle)
        .map(|&(_, factor)| factor)
        .ok_or(DispatchError::AngleNotInTable { angle })
}

/// Angles present in the table, ascending.
pub fn tabulated_angles() -> impl Iterator<Item = f64> {
    BEND_LOSS_FACTORS.iter().map(|&(angle, _)| angle)
}
