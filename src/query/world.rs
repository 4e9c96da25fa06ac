use crate::math::{Point, Real, Rotation};
use crate::query::SweepHit;
use crate::shape::VolumeShape;
use smallvec::SmallVec;

/// Identifier of a body (an actor-level entity) inside the physics world.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle(pub u64);

/// Identifier of a single collider inside the physics world.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderHandle(pub u64);

/// The collision profile a sweep or overlap query runs against.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CollisionChannel {
    /// Characters and character-like volumes.
    Pawn,
    /// Static level geometry.
    WorldStatic,
    /// Movable, non-simulated world geometry.
    WorldDynamic,
    /// Fully simulated physics bodies.
    PhysicsBody,
}

/// A physics world able to answer the queries the movement pipeline relies
/// on.
///
/// All queries are synchronous and re-entrant-safe: world geometry does not
/// mutate while a movement step is in flight. The ordering of
/// [`PhysicsWorld::sweep_multi`] results is *not* relied upon — callers sort
/// hits by time before selecting one.
pub trait PhysicsWorld {
    /// Sweeps `shape` from `start` to `end` at the given `rotation` and
    /// returns every contact found along the path.
    ///
    /// `collider` identifies the swept volume so the world can exclude it
    /// from its own results; bodies in `ignore` never generate hits. An
    /// empty result means no hit test was attempted at all (degenerate
    /// path).
    fn sweep_multi(
        &self,
        collider: ColliderHandle,
        shape: &VolumeShape,
        start: Point<Real>,
        end: Point<Real>,
        rotation: Rotation<Real>,
        ignore: &[BodyHandle],
        channel: CollisionChannel,
    ) -> Vec<SweepHit>;

    /// Returns `true` if placing `shape` at `position` with `rotation`
    /// overlaps any blocking geometry on `channel`, ignoring colliders owned
    /// by `ignore_body`.
    fn overlap_test(
        &self,
        shape: &VolumeShape,
        position: Point<Real>,
        rotation: Rotation<Real>,
        channel: CollisionChannel,
        ignore_body: BodyHandle,
    ) -> bool;

    /// Returns `true` if `body` stands on (is supported by) `base`.
    fn is_based_on(&self, body: BodyHandle, base: BodyHandle) -> bool;

    /// Recomputes the overlap state of `collider` after it was moved without
    /// a sweep.
    fn refresh_overlaps(&mut self, collider: ColliderHandle);

    /// Recomputes which physics volume `collider` belongs to.
    fn update_physics_volume(&mut self, collider: ColliderHandle);
}

/// Registration surface for begin-overlap notifications.
///
/// Both operations are idempotent: subscribing an already-subscribed
/// collider, or unsubscribing an unknown one, is a no-op. The return value
/// tells whether the subscription state actually changed.
pub trait OverlapEvents {
    /// Starts delivering begin-overlap notifications for `collider`.
    ///
    /// Returns `true` if a new subscription was added.
    fn subscribe(&mut self, collider: ColliderHandle) -> bool;

    /// Stops delivering begin-overlap notifications for `collider`.
    ///
    /// Returns `true` if an existing subscription was removed.
    fn unsubscribe(&mut self, collider: ColliderHandle) -> bool;
}

/// A plain, duplicate-free subscription set.
///
/// This is the simplest useful [`OverlapEvents`] implementation; richer
/// hosts can route subscriptions to their own event delivery instead.
#[derive(Clone, Debug, Default)]
pub struct OverlapSubscriptions {
    colliders: SmallVec<[ColliderHandle; 4]>,
}

impl OverlapSubscriptions {
    /// Creates an empty subscription set.
    pub fn new() -> OverlapSubscriptions {
        OverlapSubscriptions::default()
    }

    /// The currently subscribed colliders.
    pub fn colliders(&self) -> &[ColliderHandle] {
        &self.colliders
    }

    /// The number of active subscriptions.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Returns `true` if no subscription is active.
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Returns `true` if `collider` is subscribed.
    pub fn contains(&self, collider: ColliderHandle) -> bool {
        self.colliders.contains(&collider)
    }
}

impl OverlapEvents for OverlapSubscriptions {
    fn subscribe(&mut self, collider: ColliderHandle) -> bool {
        if self.colliders.contains(&collider) {
            return false;
        }

        self.colliders.push(collider);
        true
    }

    fn unsubscribe(&mut self, collider: ColliderHandle) -> bool {
        match self.colliders.iter().position(|c| *c == collider) {
            Some(i) => {
                let _ = self.colliders.swap_remove(i);
                true
            }
            None => false,
        }
    }
}
