use slab::Slab;

use crate::math::{Point, Real, Rotation, Vector};
use crate::query::{BodyHandle, OverlapEvents};
use crate::volume::AuxiliaryVolume;

/// Bookkeeping for the set of auxiliary volumes attached to one root body.
///
/// Keys handed out by [`VolumeRegistry::attach`] stay valid until the volume
/// is detached or the registry is rebuilt.
#[derive(Default)]
pub struct VolumeRegistry {
    volumes: Slab<AuxiliaryVolume>,
}

impl VolumeRegistry {
    /// Creates an empty registry.
    pub fn new() -> VolumeRegistry {
        VolumeRegistry::default()
    }

    /// The number of attached volumes.
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// Returns `true` if no volume is attached.
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// The volume stored under `key`, if any.
    pub fn get(&self, key: usize) -> Option<&AuxiliaryVolume> {
        self.volumes.get(key)
    }

    /// Mutable access to the volume stored under `key`, if any.
    pub fn get_mut(&mut self, key: usize) -> Option<&mut AuxiliaryVolume> {
        self.volumes.get_mut(key)
    }

    /// Iterates over all attached volumes, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &AuxiliaryVolume)> {
        self.volumes.iter()
    }

    /// Attaches one volume and returns its registry key.
    pub fn attach(&mut self, volume: AuxiliaryVolume) -> usize {
        self.volumes.insert(volume)
    }

    /// Detaches the volume stored under `key`, returning it.
    pub fn detach(&mut self, key: usize) -> Option<AuxiliaryVolume> {
        self.volumes.try_remove(key)
    }

    /// Replaces the whole volume set after the owning body was reconfigured.
    ///
    /// The previous set is torn down first: its ignore lists are emptied and
    /// its overlap subscriptions removed, so repeated rebuilds never leave
    /// stale ignores or duplicate subscriptions behind. Every new volume
    /// then ignores its `owner` and the owner's own `base_ignores`, and is
    /// subscribed for overlap events when it interacts with physics.
    pub fn rebuild<E: OverlapEvents + ?Sized>(
        &mut self,
        owner: BodyHandle,
        base_ignores: &[BodyHandle],
        volumes: impl IntoIterator<Item = AuxiliaryVolume>,
        events: &mut E,
    ) {
        for (_, volume) in self.volumes.iter_mut() {
            volume.move_ignore.clear();
            if volume.physics_interaction {
                let _ = events.unsubscribe(volume.collider);
            }
        }

        self.volumes.clear();

        for mut volume in volumes {
            volume.add_move_ignore(owner);
            for body in base_ignores {
                volume.add_move_ignore(*body);
            }

            if volume.physics_interaction {
                let _ = events.subscribe(volume.collider);
            }

            let _ = self.volumes.insert(volume);
        }
    }

    /// Applies a root pose change to every attached volume.
    ///
    /// Each volume keeps its rigid offset from the root: the offset is
    /// rotated by the root's delta rotation, then re-anchored at the new
    /// root position. This reproduces "rotate about the root, then
    /// translate" for arbitrarily deep attachment chains.
    pub fn propagate_root_move(
        &mut self,
        old_root_position: Point<Real>,
        old_root_rotation: Rotation<Real>,
        new_root_position: Point<Real>,
        new_root_rotation: Rotation<Real>,
    ) {
        let delta_rot = new_root_rotation * old_root_rotation.inverse();

        for (_, volume) in self.volumes.iter_mut() {
            let offset: Vector<Real> = volume.position - old_root_position;
            volume.position = new_root_position + delta_rot * offset;
            volume.rotation = delta_rot * volume.rotation;
        }
    }
}

#[cfg(test)]
mod test {
    use super::VolumeRegistry;
    use crate::math::{Point, Real, Rotation, Vector};
    use crate::query::{BodyHandle, ColliderHandle};
    use crate::shape::VolumeShape;
    use crate::volume::AuxiliaryVolume;

    fn ball_volume(collider: u64, position: Point<Real>) -> AuxiliaryVolume {
        AuxiliaryVolume::new(
            BodyHandle(1),
            ColliderHandle(collider),
            VolumeShape::ball(0.5),
            position,
            Rotation::identity(),
        )
    }

    #[test]
    fn attach_detach_round_trip() {
        let mut registry = VolumeRegistry::new();
        let key = registry.attach(ball_volume(1, Point::origin()));

        assert_eq!(registry.len(), 1);
        assert!(registry.get(key).is_some());
        assert!(registry.detach(key).is_some());
        assert!(registry.is_empty());
        assert!(registry.detach(key).is_none());
    }

    #[test]
    fn propagation_rotates_offsets_about_the_root() {
        let mut registry = VolumeRegistry::new();
        let _ = registry.attach(ball_volume(1, Point::new(2.0, 0.0, 0.0)));

        let quarter_turn =
            Rotation::from_axis_angle(&Vector::z_axis(), core::f64::consts::FRAC_PI_2 as Real);
        registry.propagate_root_move(
            Point::origin(),
            Rotation::identity(),
            Point::new(0.0, 0.0, 1.0),
            quarter_turn,
        );

        let volume = registry.get(0).unwrap();
        // The offset (2, 0, 0) turned into (0, 2, 0), then followed the root
        // up by one unit.
        assert_relative_eq!(volume.position, Point::new(0.0, 2.0, 1.0), epsilon = 1.0e-5);
        assert_relative_eq!(volume.rotation.angle(), quarter_turn.angle(), epsilon = 1.0e-5);
    }
}
