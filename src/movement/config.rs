use crate::math::Real;
use crate::utils::KINDA_SMALL_NUMBER;

/// Tunable parameters of the movement pipeline.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovementConfig {
    /// Tolerance of the initial-overlap exit test.
    ///
    /// Dot product of movement direction and impact normal; normals within
    /// this tolerance are ignored when moving out of an object a sweep
    /// started inside of.
    pub initial_overlap_tolerance: Real,
    /// Inflation added to a volume's shape when checking whether a location
    /// is free of blocking collision during penetration resolution.
    pub penetration_overlap_inflation: Real,
    /// Penetration depth assumed for hits that do not report one.
    pub penetration_pull_back_depth: Real,
    /// Extra distance added to penetration adjustments so the resolved pose
    /// is not flush with the surface it escaped.
    pub penetration_pull_back_distance: Real,
    /// Translations shorter than this are not worth a physics sweep.
    pub min_move_distance: Real,
    /// Angular tolerance (radians) under which a requested rotation is
    /// considered already reached.
    pub rotation_tolerance: Real,
}

impl Default for MovementConfig {
    fn default() -> MovementConfig {
        MovementConfig {
            initial_overlap_tolerance: 0.0,
            penetration_overlap_inflation: 0.1,
            penetration_pull_back_depth: 0.125,
            penetration_pull_back_distance: 0.125,
            min_move_distance: 4.0 * KINDA_SMALL_NUMBER,
            rotation_tolerance: 1.0e-4,
        }
    }
}
