use crate::math::Real;
use crate::shape::InvalidShapeError;

/// A ball shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Ball {
    /// The radius of the ball.
    pub radius: Real,
}

impl Ball {
    /// Creates a new ball with the given radius.
    #[inline]
    pub fn new(radius: Real) -> Ball {
        Ball { radius }
    }

    /// Creates a new ball, checking that its radius is strictly positive and
    /// finite.
    pub fn try_new(radius: Real) -> Result<Ball, InvalidShapeError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(InvalidShapeError::NonPositiveRadius);
        }

        Ok(Ball { radius })
    }

    /// This ball grown by `margin` in every direction.
    #[inline]
    pub fn inflated(&self, margin: Real) -> Ball {
        Ball::new(self.radius + margin)
    }
}
