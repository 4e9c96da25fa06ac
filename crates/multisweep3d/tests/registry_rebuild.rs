mod common;

use common::{ball_volume, OWNER};
use multisweep3d::math::Point;
use multisweep3d::query::{
    BodyHandle, ColliderHandle, CollisionChannel, OverlapEvents, OverlapSubscriptions,
};
use multisweep3d::volume::VolumeRegistry;

/// Counts raw subscribe/unsubscribe traffic on top of the idempotent set.
#[derive(Default)]
struct CountingEvents {
    inner: OverlapSubscriptions,
    subscribe_calls: usize,
    unsubscribe_calls: usize,
}

impl OverlapEvents for CountingEvents {
    fn subscribe(&mut self, collider: ColliderHandle) -> bool {
        self.subscribe_calls += 1;
        self.inner.subscribe(collider)
    }

    fn unsubscribe(&mut self, collider: ColliderHandle) -> bool {
        self.unsubscribe_calls += 1;
        self.inner.unsubscribe(collider)
    }
}

fn interactive_volumes() -> Vec<multisweep3d::volume::AuxiliaryVolume> {
    vec![
        ball_volume(10, 0.5, Point::origin()).with_physics_interaction(true),
        ball_volume(11, 0.3, Point::new(0.0, 1.0, 0.0)).with_physics_interaction(true),
    ]
}

#[test]
fn repeated_rebuilds_never_duplicate_subscriptions() {
    let mut registry = VolumeRegistry::new();
    let mut events = CountingEvents::default();

    registry.rebuild(OWNER, &[], interactive_volumes(), &mut events);
    assert_eq!(registry.len(), 2);
    assert_eq!(events.inner.len(), 2);
    assert_eq!(events.subscribe_calls, 2);
    assert_eq!(events.unsubscribe_calls, 0);

    // Reconfigure with the same set: the old subscriptions are removed
    // before the new ones are added, leaving no duplicates behind.
    registry.rebuild(OWNER, &[], interactive_volumes(), &mut events);
    assert_eq!(registry.len(), 2);
    assert_eq!(events.inner.len(), 2);
    assert_eq!(events.subscribe_calls, 4);
    assert_eq!(events.unsubscribe_calls, 2);
    assert!(events.inner.contains(ColliderHandle(10)));
    assert!(events.inner.contains(ColliderHandle(11)));
}

#[test]
fn rebuild_wires_ignore_lists_exactly_once() {
    let mut registry = VolumeRegistry::new();
    let mut events = OverlapSubscriptions::new();

    // One volume arrives already ignoring its owner; the rebuild must not
    // duplicate that entry.
    let mut seeded = ball_volume(10, 0.5, Point::origin());
    seeded.add_move_ignore(OWNER);

    registry.rebuild(
        OWNER,
        &[BodyHandle(7)],
        vec![seeded, ball_volume(11, 0.3, Point::origin())],
        &mut events,
    );

    for (_, volume) in registry.iter() {
        assert_eq!(&volume.move_ignore[..], &[OWNER, BodyHandle(7)]);
    }
}

#[test]
fn only_interactive_volumes_are_subscribed() {
    let mut registry = VolumeRegistry::new();
    let mut events = OverlapSubscriptions::new();

    registry.rebuild(
        OWNER,
        &[],
        vec![
            ball_volume(10, 0.5, Point::origin()).with_physics_interaction(true),
            ball_volume(11, 0.3, Point::origin()),
        ],
        &mut events,
    );

    assert_eq!(events.colliders(), &[ColliderHandle(10)]);

    // Dropping physics interaction on the next configuration also drops the
    // subscription.
    registry.rebuild(
        OWNER,
        &[],
        vec![ball_volume(10, 0.5, Point::origin())],
        &mut events,
    );
    assert!(events.is_empty());
}

#[test]
fn volumes_keep_their_collision_channel() {
    let mut registry = VolumeRegistry::new();
    let key = registry.attach(
        ball_volume(10, 0.5, Point::origin()).with_channel(CollisionChannel::PhysicsBody),
    );

    assert_eq!(
        registry.get(key).map(|volume| volume.channel),
        Some(CollisionChannel::PhysicsBody)
    );
}
