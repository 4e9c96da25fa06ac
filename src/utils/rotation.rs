use crate::math::{Real, Rotation};

/// Returns `true` if the two rotations differ by an angle of at most `tol`
/// radians.
#[inline]
pub fn rotation_within_tolerance(a: &Rotation<Real>, b: &Rotation<Real>, tol: Real) -> bool {
    a.angle_to(b) <= tol
}
