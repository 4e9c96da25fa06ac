use smallvec::SmallVec;

use crate::math::{Point, Real, Rotation, UnitVector, Vector};
use crate::movement::MovementConfig;
use crate::query::{
    BodyHandle, ColliderHandle, HitFilter, MoveFlags, PhysicsWorld, SweepHit,
};
use crate::shape::VolumeShape;
use crate::utils::rotation_within_tolerance;
use crate::volume::{simulate_move, AuxiliaryVolume, VolumeRegistry};

/// The primary moving entity of a movement pipeline.
#[derive(Clone, Debug)]
pub struct RootBody {
    /// The world body backing the root.
    pub body: BodyHandle,
    /// The root's own collision shape.
    ///
    /// The root is moved without sweeping its own shape. Register it as an
    /// auxiliary volume (see [`MultiVolumeController::attach_root_volume`])
    /// to have it participate in the same per-volume sweeps.
    pub shape: VolumeShape,
    /// Current world position.
    pub position: Point<Real>,
    /// Current world orientation.
    pub rotation: Rotation<Real>,
}

/// The outcome of one movement step.
#[derive(Copy, Clone, Debug)]
pub struct MoveResult {
    /// `true` if the full requested motion was applied unblocked.
    pub completed: bool,
    /// The worst blocking hit, or the cleared sentinel if nothing blocked.
    pub hit: SweepHit,
}

impl MoveResult {
    /// A fully completed, unobstructed move.
    pub fn unblocked() -> MoveResult {
        MoveResult {
            completed: true,
            hit: SweepHit::cleared(),
        }
    }

    /// A move truncated by `hit`.
    pub fn blocked(hit: SweepHit) -> MoveResult {
        MoveResult {
            completed: false,
            hit,
        }
    }

    /// A move that could not even be attempted.
    pub fn failed() -> MoveResult {
        MoveResult {
            completed: false,
            hit: SweepHit::cleared(),
        }
    }
}

/// Transient association between the volume that produced the worst blocking
/// hit and that hit; only drives the next penetration resolution.
#[derive(Copy, Clone, Debug)]
pub(super) struct BlockedVolumeRecord {
    pub(super) volume: usize,
    pub(super) hit: SweepHit,
}

/// Orchestrates swept movement of a root body and its auxiliary volumes.
///
/// One controller owns the volume set, the movement flags and tunables, and
/// the per-step blocked record. Movement is frame-stepped and synchronous: a
/// step fully completes (sweep, integrate, resolve, overlap refresh) before
/// the next one begins.
pub struct MultiVolumeController {
    root: Option<RootBody>,
    /// The auxiliary volumes moved along with the root.
    pub volumes: VolumeRegistry,
    /// Flags applied to every movement sweep of this controller.
    pub move_flags: MoveFlags,
    /// Tunable parameters.
    pub config: MovementConfig,
    plane_constraint: Option<UnitVector<Real>>,
    pub(super) last_blocked: Option<BlockedVolumeRecord>,
    pub(super) just_teleported: bool,
}

impl MultiVolumeController {
    /// Creates a controller with no bound root body.
    pub fn new(config: MovementConfig) -> MultiVolumeController {
        MultiVolumeController {
            root: None,
            volumes: VolumeRegistry::new(),
            move_flags: MoveFlags::empty(),
            config,
            plane_constraint: None,
            last_blocked: None,
            just_teleported: false,
        }
    }

    /// Binds the root body this controller moves.
    pub fn bind_root(&mut self, root: RootBody) {
        self.root = Some(root);
    }

    /// Unbinds the root body; subsequent steps fail as no-ops.
    pub fn unbind_root(&mut self) -> Option<RootBody> {
        self.root.take()
    }

    /// The currently bound root body.
    pub fn root(&self) -> Option<&RootBody> {
        self.root.as_ref()
    }

    /// Restricts movement to the plane orthogonal to `normal`, or lifts the
    /// restriction with `None`.
    pub fn set_plane_constraint(&mut self, normal: Option<UnitVector<Real>>) {
        self.plane_constraint = normal;
    }

    /// `true` if the last penetration resolution teleported the body, which
    /// callers typically use to suppress velocity-based side effects.
    pub fn just_teleported(&self) -> bool {
        self.just_teleported
    }

    /// Clears the teleport latch, typically once per frame after velocity
    /// bookkeeping consumed it.
    pub fn clear_just_teleported(&mut self) {
        self.just_teleported = false;
    }

    /// The registry key of the volume behind the most recent blocking hit,
    /// if a coordinator pass failed since the last post-update.
    pub fn last_blocked_volume(&self) -> Option<usize> {
        self.last_blocked.map(|record| record.volume)
    }

    /// The most recent worst blocking hit, paired with
    /// [`MultiVolumeController::last_blocked_volume`].
    pub fn last_blocked_hit(&self) -> Option<SweepHit> {
        self.last_blocked.map(|record| record.hit)
    }

    /// Registers the root body's own shape as one more auxiliary volume so
    /// the primary shape participates in the same per-volume sweeps.
    ///
    /// Returns the registry key, or `None` if no root is bound.
    pub fn attach_root_volume(&mut self, collider: ColliderHandle) -> Option<usize> {
        let root = self.root.as_ref()?;
        let volume = AuxiliaryVolume::new(
            root.body,
            collider,
            root.shape,
            root.position,
            root.rotation,
        );
        Some(self.volumes.attach(volume))
    }

    /// Projects `direction` onto the allowed movement plane.
    pub fn constrain_direction_to_plane(&self, direction: Vector<Real>) -> Vector<Real> {
        match &self.plane_constraint {
            Some(normal) => direction - normal.into_inner() * direction.dot(normal),
            None => direction,
        }
    }

    /// Applies one discrete motion step to the root body.
    ///
    /// The requested `delta` is projected on the movement plane, swept
    /// through every auxiliary volume when `sweep` is set, truncated to the
    /// worst hit's time-of-impact if anything blocks (the rotation is
    /// interpolated by the same fraction), and finally applied to the root
    /// without re-sweeping the root's own shape. The new transform is then
    /// propagated to every attached volume.
    ///
    /// With no bound root body this fails immediately.
    pub fn move_root<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &W,
        delta: Vector<Real>,
        rotation: Rotation<Real>,
        sweep: bool,
    ) -> MoveResult {
        let (old_position, old_rotation) = match &self.root {
            Some(root) => (root.position, root.rotation),
            None => return MoveResult::failed(),
        };

        let mut new_delta = self.constrain_direction_to_plane(delta);
        let mut new_rotation = rotation;

        // The world does nothing for sweeps below its resolution, so don't
        // attempt one: a small enough move is either a pure rotation update
        // or a zero-op.
        let min_move_dist_sq = self.config.min_move_distance * self.config.min_move_distance;
        if new_delta.norm_squared() <= min_move_dist_sq {
            if rotation_within_tolerance(&new_rotation, &old_rotation, self.config.rotation_tolerance)
            {
                return MoveResult::unblocked();
            }

            new_delta = Vector::zeros();
        }

        let blocking = if sweep {
            self.move_auxiliary_volumes(world, new_delta, new_rotation)
        } else {
            None
        };

        if let Some(hit) = &blocking {
            // Move as far as possible toward the requested pose: scale the
            // translation by the hit time and interpolate the rotation by
            // the same fraction.
            new_delta *= hit.time;
            new_rotation = old_rotation.slerp(&rotation, hit.time);
        }

        // The root itself moves without a sweep; sweeping is the business of
        // the auxiliary volumes.
        let new_position = old_position + new_delta;
        if let Some(root) = &mut self.root {
            root.position = new_position;
            root.rotation = new_rotation;
        }

        self.volumes
            .propagate_root_move(old_position, old_rotation, new_position, new_rotation);

        match blocking {
            Some(hit) => MoveResult::blocked(hit),
            None => MoveResult::unblocked(),
        }
    }

    /// Simulates the proposed root motion on every auxiliary volume and
    /// returns the worst blocking hit, or `None` if all volumes are clear.
    ///
    /// The worst hit is the one with the smallest time-of-impact across all
    /// volumes, independent of enumeration order: on a large delta a
    /// forward-leading wingtip must block the motion even when the trailing
    /// trunk is enumerated (and penetrates) first. The blocked volume is
    /// recorded to drive a subsequent penetration resolution.
    pub fn move_auxiliary_volumes<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &W,
        delta: Vector<Real>,
        new_rotation: Rotation<Real>,
    ) -> Option<SweepHit> {
        self.last_blocked = None;

        let root = self.root.as_ref()?;
        let filter = HitFilter::new(self.config.initial_overlap_tolerance);

        let mut blocked: SmallVec<[(usize, SweepHit); 4]> = SmallVec::new();
        for (key, volume) in self.volumes.iter() {
            if let Some(hit) = simulate_move(
                volume,
                world,
                root.position,
                root.rotation,
                delta,
                new_rotation,
                &filter,
                self.move_flags,
            ) {
                blocked.push((key, hit));
            }
        }

        let mut worst: Option<(usize, SweepHit)> = None;
        let mut worst_time = Real::MAX;
        for (key, hit) in blocked {
            if hit.time < worst_time {
                worst_time = hit.time;
                worst = Some((key, hit));
            }
        }

        let (volume, hit) = worst?;
        self.last_blocked = Some(BlockedVolumeRecord { volume, hit });
        Some(hit)
    }

    /// Refreshes the overlap state and physics-volume membership of every
    /// auxiliary volume after a completed movement update, then drops the
    /// per-step blocked record.
    ///
    /// The volumes moved with the root but were never independently swept
    /// for overlap bookkeeping, so the world must be told where they ended
    /// up.
    pub fn post_movement_update<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        for (_, volume) in self.volumes.iter() {
            world.refresh_overlaps(volume.collider);
            world.update_physics_volume(volume.collider);
        }

        self.last_blocked = None;
    }
}
