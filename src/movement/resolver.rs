use num::Zero;

use crate::math::{Real, Rotation, Vector};
use crate::movement::{MovementConfig, MultiVolumeController};
use crate::query::{MoveFlags, PhysicsWorld, SweepHit};

/// The escape displacement suggested by a penetrating hit: its impact normal
/// scaled by the reported penetration depth plus a pull-back margin.
///
/// Hits that did not start in penetration need no escape and yield zero.
pub fn penetration_adjustment(hit: &SweepHit, config: &MovementConfig) -> Vector<Real> {
    if !hit.started_penetrating {
        return Vector::zeros();
    }

    let depth = if hit.penetration_depth > 0.0 {
        hit.penetration_depth
    } else {
        config.penetration_pull_back_depth
    };

    hit.impact_normal.into_inner() * (depth + config.penetration_pull_back_distance)
}

impl MultiVolumeController {
    /// Attempts to un-stick the root body from overlapping geometry.
    ///
    /// `proposed_adjustment` is the escape displacement to try (typically
    /// [`penetration_adjustment`] of `hit`), and `hit` the blocking hit of
    /// the failed move. The strategies run in order and stop at the first
    /// success:
    ///
    /// 1. if the adjusted location is free (probed with the blocked volume's
    ///    inflated shape), teleport there without sweeping;
    /// 2. otherwise sweep toward it, temporarily allowing the sweep to exit
    ///    through blocking overlaps;
    /// 3. if still stuck inside something else, combine both escape
    ///    directions and sweep along their sum;
    /// 4. finally, sweep along the adjustment plus the originally attempted
    ///    move.
    ///
    /// Without a blocked-volume record from the most recent coordinator
    /// failure this is a no-op. Returns the `just_teleported` latch, raised
    /// if any strategy moved the body.
    pub fn resolve_penetration<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &W,
        proposed_adjustment: Vector<Real>,
        hit: &SweepHit,
        new_rotation: Rotation<Real>,
    ) -> bool {
        let Some(record) = self.last_blocked else {
            return false;
        };
        let Some(blocked) = self.volumes.get(record.volume) else {
            return false;
        };

        let blocked_collider = blocked.collider;
        let blocked_shape = blocked.shape;
        let blocked_rotation = blocked.rotation;
        let blocked_channel = blocked.channel;
        let blocked_owner = blocked.owner;

        let mut moved = false;
        let adjustment = self.constrain_direction_to_plane(proposed_adjustment);

        if !adjustment.is_zero() {
            // The overlap probe is slightly more restrictive than the sweeps
            // around it, so precision differences between the two can never
            // report a blocked location as free.
            let inflated = blocked_shape.inflated(self.config.penetration_overlap_inflation);
            let encroached = world.overlap_test(
                &inflated,
                hit.trace_start + adjustment,
                blocked_rotation,
                blocked_channel,
                blocked_owner,
            );

            if !encroached {
                // The target spot is free: move there without sweeping.
                moved = self
                    .move_root(world, adjustment, new_rotation, false)
                    .completed;
            } else {
                // Sweeping out requires permission to exit through blocking
                // overlaps; the flag is restored on every path out of this
                // block.
                let saved_flags = self.move_flags;
                self.move_flags &= !MoveFlags::NEVER_IGNORE_BLOCKING_OVERLAPS;

                let result = self.move_root(world, adjustment, new_rotation, true);
                moved = result.completed;

                if !moved && result.hit.started_penetrating {
                    // Stuck inside a second surface: combine both escape
                    // directions to get out of multiple overlaps at once.
                    let second_mtd = penetration_adjustment(&result.hit, &self.config);
                    let combined = adjustment + second_mtd;
                    if second_mtd != adjustment && !combined.is_zero() {
                        moved = self
                            .move_root(world, combined, new_rotation, true)
                            .completed;
                    }
                }

                if !moved {
                    // Moving the adjustment plus the originally attempted
                    // delta can sometimes escape penetrations with multiple
                    // objects.
                    let move_delta =
                        self.constrain_direction_to_plane(hit.trace_end - hit.trace_start);
                    if !move_delta.is_zero() {
                        moved = self
                            .move_root(world, adjustment + move_delta, new_rotation, true)
                            .completed;
                    }
                }

                self.move_flags = saved_flags;

                if !moved {
                    log::debug!(
                        "all penetration resolution strategies failed for volume {:?}",
                        blocked_collider
                    );
                }
            }
        }

        self.just_teleported |= moved;
        self.just_teleported
    }
}
