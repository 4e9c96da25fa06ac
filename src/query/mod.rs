//! Swept-movement queries and the collaborators that answer them.

pub use self::hit_filter::{HitFilter, MoveFlags};
pub use self::sweep_hit::SweepHit;
pub use self::world::{
    BodyHandle, ColliderHandle, CollisionChannel, OverlapEvents, OverlapSubscriptions,
    PhysicsWorld,
};

mod hit_filter;
mod sweep_hit;
mod world;
