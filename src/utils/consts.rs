use crate::math::Real;

// Smallest distance the physics world resolves; sweeping anything shorter
// than a few multiples of this is pointless.
pub(crate) const KINDA_SMALL_NUMBER: Real = 1.0e-4;
