use crate::math::Real;
use crate::shape::InvalidShapeError;

/// A capsule shape aligned with the local `y` axis.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Capsule {
    /// Half the distance between the capsule's two hemisphere centers.
    pub half_height: Real,
    /// The radius of the capsule.
    pub radius: Real,
}

impl Capsule {
    /// Creates a new capsule with the given half-height and radius.
    #[inline]
    pub fn new(half_height: Real, radius: Real) -> Capsule {
        Capsule {
            half_height,
            radius,
        }
    }

    /// Creates a new capsule, checking that its radius is strictly positive
    /// and its half-height non-negative (both finite).
    pub fn try_new(half_height: Real, radius: Real) -> Result<Capsule, InvalidShapeError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(InvalidShapeError::NonPositiveRadius);
        }

        if !half_height.is_finite() || half_height < 0.0 {
            return Err(InvalidShapeError::NegativeHalfHeight);
        }

        Ok(Capsule {
            half_height,
            radius,
        })
    }

    /// The distance between the capsule's two hemisphere centers.
    #[inline]
    pub fn height(&self) -> Real {
        self.half_height * 2.0
    }

    /// The total length of the capsule along its axis, caps included.
    #[inline]
    pub fn total_height(&self) -> Real {
        self.height() + self.radius * 2.0
    }

    /// This capsule grown by `margin` in every direction.
    #[inline]
    pub fn inflated(&self, margin: Real) -> Capsule {
        Capsule::new(self.half_height + margin, self.radius + margin)
    }
}
