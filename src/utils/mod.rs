//! Various unsorted geometrical and logical operators.

pub use self::rotation::rotation_within_tolerance;

pub(crate) use self::consts::*;

mod consts;
mod rotation;
