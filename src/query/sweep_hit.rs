use crate::math::{Point, Real, UnitVector, Vector};
use crate::query::{BodyHandle, ColliderHandle};

/// The result of a shape sweep against world geometry.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug)]
pub struct SweepHit {
    /// Normalized time-of-impact along the sweep path, in `[0, 1]`.
    ///
    /// `0.0` means the sweep started overlapping the hit geometry; `1.0`
    /// means nothing was hit along the whole path.
    pub time: Real,
    /// The impact normal at the contact, pointing out of the hit geometry.
    pub impact_normal: UnitVector<Real>,
    /// `true` if this contact physically halts motion, as opposed to an
    /// overlap-only contact that only triggers notifications.
    pub is_blocking: bool,
    /// `true` if the swept shape already overlapped the hit geometry at the
    /// start of the sweep.
    pub started_penetrating: bool,
    /// Penetration depth at the start of the sweep, `0.0` when the sweep did
    /// not start overlapping (or the world does not report depths).
    pub penetration_depth: Real,
    /// World-space start of the sweep path.
    pub trace_start: Point<Real>,
    /// World-space end of the sweep path.
    pub trace_end: Point<Real>,
    /// The collider that was hit, if the world identifies it.
    pub collider: Option<ColliderHandle>,
    /// The body owning the hit collider, if the world identifies it.
    pub body: Option<BodyHandle>,
}

impl SweepHit {
    /// The "no hit" sentinel: a non-blocking result at time `1.0`.
    pub fn cleared() -> SweepHit {
        SweepHit {
            time: 1.0,
            impact_normal: Vector::y_axis(),
            is_blocking: false,
            started_penetrating: false,
            penetration_depth: 0.0,
            trace_start: Point::origin(),
            trace_end: Point::origin(),
            collider: None,
            body: None,
        }
    }

    /// Pulls the hit time slightly backwards along a sweep of length `dist`.
    ///
    /// The pulled-back time is nudged by an epsilon scaled with the sweep
    /// distance (never below the world's minimum representable step, never
    /// above a full step), then clamped back into `[0, 1]`. Stopping exactly
    /// flush with the obstruction would re-penetrate it on the next step.
    pub fn pull_back(&mut self, dist: Real) {
        let desired_time_back = na::clamp(0.1, 0.1 / dist, 1.0 / dist) + 0.001;
        self.time = na::clamp(self.time - desired_time_back, 0.0, 1.0);
    }
}

impl Default for SweepHit {
    fn default() -> SweepHit {
        SweepHit::cleared()
    }
}
