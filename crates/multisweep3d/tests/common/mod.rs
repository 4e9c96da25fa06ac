#![allow(dead_code)] // Not every test binary uses every helper.

use std::cell::Cell;

use multisweep3d::math::{Point, Real, Rotation, UnitVector, Vector};
use multisweep3d::movement::{MovementConfig, MultiVolumeController, RootBody};
use multisweep3d::query::{BodyHandle, ColliderHandle, CollisionChannel, PhysicsWorld, SweepHit};
use multisweep3d::shape::VolumeShape;
use multisweep3d::volume::AuxiliaryVolume;

/// An infinite half-space obstruction. The free side is where
/// `normal . p > offset`.
pub struct Wall {
    pub body: BodyHandle,
    pub collider: ColliderHandle,
    pub normal: UnitVector<Real>,
    pub offset: Real,
}

/// A minimal analytic physics world made of half-space walls.
///
/// Sweeps solve the linear crossing time of the shape's support point along
/// each wall normal, which is exact for balls and capsules against planes.
#[derive(Default)]
pub struct MockWorld {
    pub walls: Vec<Wall>,
    pub bases: Vec<(BodyHandle, BodyHandle)>,
    /// When set, forces the result of every `overlap_test` call.
    pub forced_overlap: Option<bool>,
    pub sweep_calls: Cell<usize>,
    pub overlap_calls: Cell<usize>,
    pub refreshed: Vec<ColliderHandle>,
    pub volume_updates: Vec<ColliderHandle>,
}

impl MockWorld {
    pub fn new() -> MockWorld {
        MockWorld::default()
    }

    /// Adds a wall whose plane satisfies `normal . p = offset`.
    pub fn with_wall(mut self, body: u64, normal: Vector<Real>, offset: Real) -> MockWorld {
        self.walls.push(Wall {
            body: BodyHandle(body),
            collider: ColliderHandle(1_000 + body),
            normal: UnitVector::new_normalize(normal),
            offset,
        });
        self
    }
}

impl PhysicsWorld for MockWorld {
    fn sweep_multi(
        &self,
        _collider: ColliderHandle,
        shape: &VolumeShape,
        start: Point<Real>,
        end: Point<Real>,
        rotation: Rotation<Real>,
        ignore: &[BodyHandle],
        _channel: CollisionChannel,
    ) -> Vec<SweepHit> {
        self.sweep_calls.set(self.sweep_calls.get() + 1);

        let mut hits = Vec::new();
        for wall in &self.walls {
            if ignore.contains(&wall.body) {
                continue;
            }

            let support = shape.support_extent(&rotation, &wall.normal);
            let sep_start = wall.normal.dot(&start.coords) - wall.offset - support;
            let sep_end = wall.normal.dot(&end.coords) - wall.offset - support;

            if sep_start <= 0.0 {
                hits.push(SweepHit {
                    time: 0.0,
                    impact_normal: wall.normal,
                    is_blocking: true,
                    started_penetrating: true,
                    penetration_depth: -sep_start,
                    trace_start: start,
                    trace_end: end,
                    collider: Some(wall.collider),
                    body: Some(wall.body),
                });
            } else if sep_end < 0.0 {
                hits.push(SweepHit {
                    time: sep_start / (sep_start - sep_end),
                    impact_normal: wall.normal,
                    is_blocking: true,
                    started_penetrating: false,
                    penetration_depth: 0.0,
                    trace_start: start,
                    trace_end: end,
                    collider: Some(wall.collider),
                    body: Some(wall.body),
                });
            }
        }

        hits
    }

    fn overlap_test(
        &self,
        shape: &VolumeShape,
        position: Point<Real>,
        rotation: Rotation<Real>,
        _channel: CollisionChannel,
        _ignore_body: BodyHandle,
    ) -> bool {
        self.overlap_calls.set(self.overlap_calls.get() + 1);

        if let Some(forced) = self.forced_overlap {
            return forced;
        }

        self.walls.iter().any(|wall| {
            let support = shape.support_extent(&rotation, &wall.normal);
            wall.normal.dot(&position.coords) - wall.offset - support < 0.0
        })
    }

    fn is_based_on(&self, body: BodyHandle, base: BodyHandle) -> bool {
        self.bases.contains(&(body, base))
    }

    fn refresh_overlaps(&mut self, collider: ColliderHandle) {
        self.refreshed.push(collider);
    }

    fn update_physics_volume(&mut self, collider: ColliderHandle) {
        self.volume_updates.push(collider);
    }
}

pub const OWNER: BodyHandle = BodyHandle(1);

/// A controller bound to a ball-shaped root at the origin.
pub fn ball_controller() -> MultiVolumeController {
    let mut controller = MultiVolumeController::new(MovementConfig::default());
    controller.bind_root(RootBody {
        body: OWNER,
        shape: VolumeShape::ball(0.5),
        position: Point::origin(),
        rotation: Rotation::identity(),
    });
    controller
}

/// A ball volume owned by [`OWNER`].
pub fn ball_volume(collider: u64, radius: Real, position: Point<Real>) -> AuxiliaryVolume {
    AuxiliaryVolume::new(
        OWNER,
        ColliderHandle(collider),
        VolumeShape::ball(radius),
        position,
        Rotation::identity(),
    )
}
