use serde::{Deserialize, Serialize};
use std::fmt;

use crate::structs3d::Vector3;

/// A rotation described by a unit axis and an angle in radians.
///
/// The angle is 2*acos(w) of the equivalent quaternion. The axis is expected
/// to be unit length; [`crate::Quaternion::from_axis_angle`] normalizes, so a
/// sloppy axis still produces a proper rotation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct AxisAngle {
    pub axis: Vector3,
    pub angle: f32,
}

impl fmt::Display for AxisAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AxisAngle(axis:{}, angle:{})", self.axis, self.angle)
    }
}

impl AxisAngle {
    pub const fn new(axis: Vector3, angle: f32) -> Self {
        Self { axis, angle }
    }
}
