//! Collision volume shapes swept by the movement pipeline.

pub use self::ball::Ball;
pub use self::capsule::Capsule;
pub use self::volume_shape::{InvalidShapeError, VolumeShape};

mod ball;
mod capsule;
mod volume_shape;
