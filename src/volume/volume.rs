use crate::math::{Isometry, Point, Real, Rotation};
use crate::query::{BodyHandle, ColliderHandle, CollisionChannel};
use crate::shape::VolumeShape;
use smallvec::SmallVec;

/// A secondary collision volume rigidly attached to a moving root body.
///
/// An auxiliary volume never moves on its own: its pose is always derivable
/// from the root's pose plus the relative offset established when it was
/// attached. It holds a back-reference to its owning body, not ownership.
#[derive(Clone, Debug)]
pub struct AuxiliaryVolume {
    /// The body this volume is attached to.
    pub owner: BodyHandle,
    /// The world collider backing this volume.
    pub collider: ColliderHandle,
    /// The swept shape of this volume.
    pub shape: VolumeShape,
    /// Current world position.
    pub position: Point<Real>,
    /// Current world orientation.
    pub rotation: Rotation<Real>,
    /// The collision profile this volume sweeps against.
    pub channel: CollisionChannel,
    /// Whether begin-overlap notifications should be wired for this volume.
    pub physics_interaction: bool,
    /// Whether this volume is currently registered with a world.
    ///
    /// The simulator skips unregistered volumes: with no world to query they
    /// are assumed unblocked.
    pub registered: bool,
    /// Bodies that never generate hits when this volume sweeps.
    pub move_ignore: SmallVec<[BodyHandle; 4]>,
}

impl AuxiliaryVolume {
    /// Creates a registered volume at the given world pose, sweeping the
    /// `Pawn` channel.
    pub fn new(
        owner: BodyHandle,
        collider: ColliderHandle,
        shape: VolumeShape,
        position: Point<Real>,
        rotation: Rotation<Real>,
    ) -> AuxiliaryVolume {
        AuxiliaryVolume {
            owner,
            collider,
            shape,
            position,
            rotation,
            channel: CollisionChannel::Pawn,
            physics_interaction: false,
            registered: true,
            move_ignore: SmallVec::new(),
        }
    }

    /// Sets the collision profile this volume sweeps against.
    pub fn with_channel(mut self, channel: CollisionChannel) -> AuxiliaryVolume {
        self.channel = channel;
        self
    }

    /// Enables or disables overlap-driven physics interaction.
    pub fn with_physics_interaction(mut self, enabled: bool) -> AuxiliaryVolume {
        self.physics_interaction = enabled;
        self
    }

    /// The world pose of this volume.
    pub fn pose(&self) -> Isometry<Real> {
        Isometry::from_parts(self.position.coords.into(), self.rotation)
    }

    /// Adds `body` to the move-ignore set if it is not already present.
    pub fn add_move_ignore(&mut self, body: BodyHandle) {
        if !self.move_ignore.contains(&body) {
            self.move_ignore.push(body);
        }
    }
}
