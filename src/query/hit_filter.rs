use crate::math::{Real, Vector, DEFAULT_EPSILON};
use crate::query::{BodyHandle, PhysicsWorld, SweepHit};

bitflags::bitflags! {
    /// Flags modifying the semantics of one movement sweep.
    ///
    /// Flags are immutable for the duration of a movement step; penetration
    /// resolution temporarily clears
    /// [`MoveFlags::NEVER_IGNORE_BLOCKING_OVERLAPS`] while it sweeps out of
    /// overlapping geometry.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub struct MoveFlags: u8 {
        /// Ignore blocking hits against objects that are in a basing
        /// relationship with the moving body (either supports the other).
        const IGNORE_BASES = 1 << 0;
        /// Never ignore blocking hits that started in penetration, even when
        /// the body is moving out of them.
        const NEVER_IGNORE_BLOCKING_OVERLAPS = 1 << 1;
    }
}

/// Decides whether a candidate contact should be ignored by a movement
/// sweep.
#[derive(Copy, Clone, Debug)]
pub struct HitFilter {
    /// Tolerance for the initial-overlap exit test.
    ///
    /// Dot product of movement direction and impact normal; hits whose
    /// normal is within this tolerance of the movement direction are ignored
    /// when moving out of an object the sweep started inside of.
    pub initial_overlap_tolerance: Real,
}

impl HitFilter {
    /// Creates a filter with the given initial-overlap exit tolerance.
    pub fn new(initial_overlap_tolerance: Real) -> HitFilter {
        HitFilter {
            initial_overlap_tolerance,
        }
    }

    /// Returns `true` if `hit` must not be treated as blocking the move.
    ///
    /// Non-blocking (overlap-only) hits are never filtered here: they always
    /// pass through so overlap notification can see them. Filtering only
    /// governs whether a blocking hit actually blocks.
    pub fn should_ignore<W: PhysicsWorld + ?Sized>(
        &self,
        world: &W,
        hit: &SweepHit,
        movement_dir: &Vector<Real>,
        moving_body: BodyHandle,
        flags: MoveFlags,
    ) -> bool {
        if !hit.is_blocking {
            return false;
        }

        if flags.contains(MoveFlags::IGNORE_BASES) {
            if let Some(hit_body) = hit.body {
                if world.is_based_on(moving_body, hit_body)
                    || world.is_based_on(hit_body, moving_body)
                {
                    return true;
                }
            }
        }

        // A hit we started inside of is ignored when the movement direction
        // has a component along the exit normal: the body is on its way out
        // of the obstruction. This helps prevent getting stuck in walls.
        if hit.started_penetrating && !flags.contains(MoveFlags::NEVER_IGNORE_BLOCKING_OVERLAPS) {
            let movement_dir = movement_dir
                .try_normalize(DEFAULT_EPSILON)
                .unwrap_or_else(Vector::zeros);
            let move_dot = hit.impact_normal.dot(&movement_dir);

            if move_dot > self.initial_overlap_tolerance {
                return true;
            }
        }

        false
    }
}

impl Default for HitFilter {
    fn default() -> HitFilter {
        HitFilter::new(0.0)
    }
}
