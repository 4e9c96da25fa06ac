use ordered_float::OrderedFloat;

use crate::math::{Point, Real, Rotation, Vector};
use crate::query::{HitFilter, MoveFlags, PhysicsWorld, SweepHit};
use crate::volume::AuxiliaryVolume;

/// Simulates what `volume` would hit if its root moved by `delta` and
/// rotated to `new_root_rotation`, without moving anything.
///
/// Returns the blocking hit that truncates the motion, or `None` if the
/// volume can follow the root unimpeded. A volume that is not registered
/// with a world cannot be simulated and is assumed unblocked.
pub fn simulate_move<W: PhysicsWorld + ?Sized>(
    volume: &AuxiliaryVolume,
    world: &W,
    root_position: Point<Real>,
    root_rotation: Rotation<Real>,
    delta: Vector<Real>,
    new_root_rotation: Rotation<Real>,
    filter: &HitFilter,
    flags: MoveFlags,
) -> Option<SweepHit> {
    if !volume.registered {
        log::trace!(
            "skipping sweep simulation of unregistered volume {:?}",
            volume.collider
        );
        return None;
    }

    // The volume may hang off an arbitrarily deep attachment chain, so its
    // new orientation comes from the root's delta rotation, not from a
    // direct parent-child transform.
    let delta_rot = new_root_rotation * root_rotation.inverse();
    let new_rotation = delta_rot * volume.rotation;

    // Any turn of the root also relocates the volume: rotate its offset from
    // the root's center, then apply the root's own translation on top.
    let trace_start = volume.position;
    let offset: Vector<Real> = trace_start - root_position;
    let trace_end = root_position + delta_rot * offset + delta;

    let mut hits = world.sweep_multi(
        volume.collider,
        &volume.shape,
        trace_start,
        trace_end,
        new_rotation,
        &volume.move_ignore,
        volume.channel,
    );

    // An empty result means no hit test was attempted at all.
    if hits.is_empty() {
        return None;
    }

    let delta_len = delta.norm();
    for hit in &mut hits {
        hit.pull_back(delta_len);
    }

    // The collaborator's ordering is not trusted: sort so the first
    // surviving hit below is also the earliest one. The sort is stable, so
    // simultaneous hits keep the order the world reported them in.
    hits.sort_by_key(|hit| OrderedFloat(hit.time));

    let mut blocking: Option<&SweepHit> = None;
    let mut blocking_normal_dot_delta = Real::MAX;

    for hit in &hits {
        if !hit.is_blocking || filter.should_ignore(world, hit, &delta, volume.owner, flags) {
            continue;
        }

        if hit.time == 0.0 {
            // Several hits may share time 0; prefer the one whose normal is
            // most opposed to the movement.
            let normal_dot_delta = hit.impact_normal.dot(&delta);
            if normal_dot_delta < blocking_normal_dot_delta {
                blocking_normal_dot_delta = normal_dot_delta;
                blocking = Some(hit);
            }
        } else if blocking.is_none() {
            // Hits are time-sorted: the first surviving hit past time 0 is
            // the earliest obstruction on the path.
            blocking = Some(hit);
            break;
        }
    }

    blocking.copied()
}
