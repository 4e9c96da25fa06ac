use crate::math::{Real, Rotation, UnitVector, Vector};
use crate::shape::{Ball, Capsule};

/// Error raised by shape constructors when given degenerate parameters.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvalidShapeError {
    /// The radius was zero, negative, or not finite.
    #[error("the shape radius must be strictly positive and finite")]
    NonPositiveRadius,
    /// The half-height was negative or not finite.
    #[error("the capsule half-height must be non-negative and finite")]
    NegativeHalfHeight,
}

/// The shape of one collision volume swept by the movement pipeline.
///
/// This is the geometric payload handed to the physics-world collaborator for
/// sweeps and overlap tests; the volume's pose is carried separately.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub enum VolumeShape {
    /// A ball volume.
    Ball(Ball),
    /// A capsule volume aligned with its local `y` axis.
    Capsule(Capsule),
}

impl VolumeShape {
    /// A ball volume with the given radius.
    #[inline]
    pub fn ball(radius: Real) -> VolumeShape {
        VolumeShape::Ball(Ball::new(radius))
    }

    /// A capsule volume with the given half-height and radius.
    #[inline]
    pub fn capsule(half_height: Real, radius: Real) -> VolumeShape {
        VolumeShape::Capsule(Capsule::new(half_height, radius))
    }

    /// This shape grown by `margin` in every direction.
    ///
    /// Penetration resolution probes the world with a slightly inflated shape
    /// so that precision differences between overlap tests and sweeps cannot
    /// report a blocked location as free.
    pub fn inflated(&self, margin: Real) -> VolumeShape {
        match self {
            VolumeShape::Ball(ball) => VolumeShape::Ball(ball.inflated(margin)),
            VolumeShape::Capsule(capsule) => VolumeShape::Capsule(capsule.inflated(margin)),
        }
    }

    /// Half-extent of this shape along the world direction `dir` when posed
    /// with the given `rotation`.
    ///
    /// This is the support function restricted to an axis, which is all a
    /// half-space sweep needs to know about the shape.
    pub fn support_extent(&self, rotation: &Rotation<Real>, dir: &UnitVector<Real>) -> Real {
        match self {
            VolumeShape::Ball(ball) => ball.radius,
            VolumeShape::Capsule(capsule) => {
                let axis: Vector<Real> = rotation * Vector::y();
                capsule.radius + capsule.half_height * axis.dot(dir).abs()
            }
        }
    }
}
